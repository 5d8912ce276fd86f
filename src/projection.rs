//! Pure derivations over a registry snapshot.
//!
//! Everything here is a function of (snapshot, filter state) alone; there
//! is no memoized state that could drift from the record set. Callers are
//! expected to re-derive on every snapshot notification.

use serde::Serialize;

use crate::branch_model::{BranchRecord, BranchStatus, BranchType};

/// Aggregate counts over the full record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    pub main: usize,
    pub sub: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Type restriction applied on top of the free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(BranchType),
}

/// Filter state for the registry view.
#[derive(Debug, Clone, Default)]
pub struct BranchFilter {
    /// Case-insensitive substring matched against name or code. Empty
    /// matches everything.
    pub search: String,
    pub kind: TypeFilter,
}

pub fn stats(records: &[BranchRecord]) -> RegistryStats {
    RegistryStats {
        total: records.len(),
        main: records.iter().filter(|r| r.kind == BranchType::Main).count(),
        sub: records.iter().filter(|r| r.kind == BranchType::Sub).count(),
        active: records
            .iter()
            .filter(|r| r.status == BranchStatus::Active)
            .count(),
        inactive: records
            .iter()
            .filter(|r| r.status == BranchStatus::Inactive)
            .count(),
    }
}

fn matches(record: &BranchRecord, filter: &BranchFilter) -> bool {
    let needle = filter.search.to_lowercase();
    let matches_search = needle.is_empty()
        || record.branch_name.to_lowercase().contains(&needle)
        || record.branch_code.to_lowercase().contains(&needle);
    let matches_kind = match filter.kind {
        TypeFilter::All => true,
        TypeFilter::Only(kind) => record.kind == kind,
    };
    matches_search && matches_kind
}

/// Returns the subsequence of `records` matching the filter, preserving
/// snapshot order.
pub fn filter_records<'a>(
    records: &'a [BranchRecord],
    filter: &BranchFilter,
) -> Vec<&'a BranchRecord> {
    records.iter().filter(|r| matches(r, filter)).collect()
}
