//! Single-main invariant enforcement.
//!
//! The store offers no cross-document transactional constraint, so the
//! invariant is enforced here as a query-then-write sequence: read the
//! current `Main` records, reject the write if another one exists. The
//! check and the subsequent write are not atomic across concurrent
//! writers, so the guarantee is best-effort; two writers that both pass
//! the check before either commits can land two `Main` records. A stricter
//! scheme would reserve a singleton marker document with a conditional
//! write.

use log::warn;

use crate::branch_model::BranchType;
use crate::registry_error::RegistryError;
use crate::registry_store::RegistryStore;

/// Conflict code reported when a second `Main` branch is attempted.
pub const MAIN_BRANCH_EXISTS: &str = "main-branch-exists";

/// Rejects a pending write that would produce a second `Main` record.
///
/// `exclude_id` names the record being edited, so promoting a record that
/// is already the `Main` branch passes. Writes that target `Sub` never
/// consult the store. On conflict no mutation is performed and the
/// existing `Main` record is named in the error; it is never silently
/// demoted.
///
/// # Errors
///
/// Returns [`RegistryError::Conflict`] with code [`MAIN_BRANCH_EXISTS`]
/// when another `Main` record exists, or [`RegistryError::Store`] if the
/// lookup itself fails.
pub fn ensure_single_main(
    store: &RegistryStore,
    kind: BranchType,
    exclude_id: Option<&str>,
) -> Result<(), RegistryError> {
    if kind != BranchType::Main {
        return Ok(());
    }

    let mains = store.find_by_type(BranchType::Main)?;
    if let Some(existing) = mains.iter().find(|r| Some(r.id.as_str()) != exclude_id) {
        warn!(
            "rejected main-branch write: record {} already holds the main position",
            existing.id
        );
        return Err(RegistryError::Conflict {
            code: MAIN_BRANCH_EXISTS.to_string(),
            existing_id: existing.id.clone(),
        });
    }

    Ok(())
}
