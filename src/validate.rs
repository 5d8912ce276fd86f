//! Structural validation of candidate branch records.
//!
//! Checks are field-independent: every violated field is reported in the
//! same [`RegistryError::Validation`] so a form can surface all errors at
//! once. On success the returned payload carries the trimmed field values;
//! validation never partially applies.

use crate::branch_code;
use crate::branch_model::{BranchDraft, BranchEdit, NewBranch};
use crate::registry_error::{FieldError, RegistryError};

/// Minimum length of a trimmed branch name.
pub const NAME_MIN_LEN: usize = 3;

/// Minimum length of a trimmed address.
pub const ADDRESS_MIN_LEN: usize = 10;

fn check_common(branch_name: &str, address: &str, address_message: &str, errors: &mut Vec<FieldError>) {
    if branch_name.chars().count() < NAME_MIN_LEN {
        errors.push(FieldError::new(
            "branchName",
            "Branch name must be at least 3 characters",
        ));
    }
    if address.chars().count() < ADDRESS_MIN_LEN {
        errors.push(FieldError::new("address", address_message));
    }
}

/// Validates a create draft and derives its branch code.
///
/// An empty code (name shorter than 2 characters) is itself a validation
/// failure, reported together with any other violations.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] carrying every violated field.
pub fn check_draft(draft: &BranchDraft) -> Result<NewBranch, RegistryError> {
    let branch_name = draft.branch_name.trim();
    let address = draft.address.trim();
    let mut errors = Vec::new();

    check_common(
        branch_name,
        address,
        "Please provide a more detailed address",
        &mut errors,
    );

    let branch_code = branch_code::generate(branch_name, draft.kind).unwrap_or_default();
    if branch_code.is_empty() {
        errors.push(FieldError::new("branchCode", "Branch code is required"));
    }

    if !errors.is_empty() {
        return Err(RegistryError::Validation(errors));
    }

    Ok(NewBranch {
        branch_name: branch_name.to_string(),
        branch_code,
        address: address.to_string(),
        kind: draft.kind,
    })
}

/// Validates an edit payload, returning it with trimmed field values.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] carrying every violated field.
pub fn check_edit(edit: &BranchEdit) -> Result<BranchEdit, RegistryError> {
    let branch_name = edit.branch_name.trim();
    let address = edit.address.trim();
    let mut errors = Vec::new();

    check_common(
        branch_name,
        address,
        "Detailed address is required",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(RegistryError::Validation(errors));
    }

    Ok(BranchEdit {
        branch_name: branch_name.to_string(),
        address: address.to_string(),
        kind: edit.kind,
        status: edit.status,
    })
}
