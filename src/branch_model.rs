//! Data model definitions for the branch registry.
//!
//! This module defines the central [`BranchRecord`] entity together with the
//! input shapes used by the create and edit flows. Records are persisted as
//! JSON documents whose field names match the wire form used by registry
//! clients (`branchName`, `branchCode`, `type`, `status`, `createdAt`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Hierarchy position of a branch inside the network.
///
/// The registry allows at most one `Main` record in the collection at any
/// committed instant; everything else is a `Sub` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchType {
    Main,
    Sub,
}

impl Display for BranchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchType::Main => write!(f, "Main"),
            BranchType::Sub => write!(f, "Sub"),
        }
    }
}

/// Operational status of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchStatus {
    Active,
    Inactive,
}

impl Display for BranchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchStatus::Active => write!(f, "Active"),
            BranchStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A committed branch record as stored in the registry.
///
/// `id` is assigned by the store on insert and `branch_code` is generated
/// once during the create flow; neither changes afterwards. `created_at` is
/// stamped by the store at insert time. All remaining fields are mutable
/// through the edit flow.
///
/// # Examples
///
/// ```rust
/// use branch_registry_core::branch_model::{BranchRecord, BranchStatus, BranchType};
/// use chrono::Utc;
///
/// let record = BranchRecord {
///     id: "000000000000002a".to_string(),
///     branch_name: "Downtown Flagship".to_string(),
///     branch_code: "NX-DO-4821-S".to_string(),
///     address: "21 Harbor Road, Pier District".to_string(),
///     kind: BranchType::Sub,
///     status: BranchStatus::Active,
///     created_at: Utc::now(),
/// };
///
/// let json = serde_json::to_string(&record).unwrap();
/// assert!(json.contains("\"branchName\""));
/// assert!(json.contains("\"type\":\"Sub\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecord {
    /// Store-assigned key, immutable once created.
    pub id: String,

    /// Display name of the branch, trimmed, at least 3 characters.
    pub branch_name: String,

    /// Generated human-readable code, immutable after creation.
    pub branch_code: String,

    /// Physical address, trimmed, at least 10 characters.
    pub address: String,

    /// Hierarchy position. Serialized as `type` in the document form.
    #[serde(rename = "type")]
    pub kind: BranchType,

    pub status: BranchStatus,

    /// Stamped by the store at insert time, set once.
    pub created_at: DateTime<Utc>,
}

/// Client input for the create flow, before validation and code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDraft {
    pub branch_name: String,
    pub address: String,
    pub kind: BranchType,
}

/// A validated, normalized create payload ready for insertion.
///
/// Produced by [`crate::validate::check_draft`]; the name and address are
/// trimmed and the code has been generated. The store fills in `id`,
/// `status` (always `Active` for new records) and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBranch {
    pub branch_name: String,
    pub branch_code: String,
    pub address: String,
    pub kind: BranchType,
}

/// Client input for the edit flow.
///
/// The code and creation timestamp of a record are immutable, so they have
/// no counterpart here; status is editable alongside the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEdit {
    pub branch_name: String,
    pub address: String,
    pub kind: BranchType,
    pub status: BranchStatus,
}
