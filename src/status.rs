//! Status lifecycle control and operator confirmation gates.
//!
//! Toggling flips a record between `Active` and `Inactive`. Deactivating
//! the `Main` branch is a guarded transition: the operator must confirm
//! through a [`ConfirmationGate`] before any store write is issued. A
//! declined confirmation is a no-op outcome, not an error. Deletion runs
//! through the same gate with a per-type prompt.

use crate::branch_model::{BranchRecord, BranchStatus, BranchType};

/// Warning shown before deactivating the `Main` branch.
pub const MAIN_DEACTIVATE_WARNING: &str =
    "Deactivating the Main HQ may restrict system-wide access. Continue?";

const MAIN_DELETE_WARNING: &str =
    "Warning: Deleting the Main branch may disrupt the network. Proceed?";
const SUB_DELETE_PROMPT: &str = "Confirm removal of this branch node?";

/// Decides guarded actions on behalf of the operator.
///
/// Interactive frontends forward the prompt to the user; headless callers
/// can plug in [`AlwaysConfirm`].
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that approves every guarded action. Meant for unattended callers
/// that have already obtained consent out of band.
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Result of a status toggle attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The transition was committed; carries the updated record.
    Applied(BranchRecord),
    /// The operator declined the guarded transition; nothing was written.
    Declined,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator declined; the record is untouched.
    Declined,
}

pub fn next_status(current: BranchStatus) -> BranchStatus {
    match current {
        BranchStatus::Active => BranchStatus::Inactive,
        BranchStatus::Inactive => BranchStatus::Active,
    }
}

/// Only deactivating a `Main` record is guarded; `Sub` toggles and
/// reactivations go through unprompted.
pub fn requires_confirmation(kind: BranchType, next: BranchStatus) -> bool {
    kind == BranchType::Main && next == BranchStatus::Inactive
}

pub fn delete_prompt(kind: BranchType) -> &'static str {
    match kind {
        BranchType::Main => MAIN_DELETE_WARNING,
        BranchType::Sub => SUB_DELETE_PROMPT,
    }
}
