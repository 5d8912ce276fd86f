//! Branch code generation.
//!
//! Codes take the shape `NX-<prefix>-<4 digits>-<M|S>`: the uppercased first
//! two characters of the branch name, a random number in `1000..=9999` and a
//! letter for the branch type. The random suffix makes codes unique-looking,
//! not guaranteed unique; a collision-free scheme would need a monotonic
//! counter or a content hash tied to the store.

use rand::Rng;

use crate::branch_model::BranchType;

/// Network prefix carried by every generated code.
pub const CODE_PREFIX: &str = "NX";

/// Derives a branch code from the (normalized) branch name and type.
///
/// Returns `None` when the name is shorter than 2 characters; the create
/// flow then fails validation on the missing code instead of persisting an
/// incomplete one.
///
/// # Examples
///
/// ```rust
/// use branch_registry_core::branch_code::generate;
/// use branch_registry_core::branch_model::BranchType;
///
/// let code = generate("Westside Hub", BranchType::Sub).unwrap();
/// assert!(code.starts_with("NX-WE-"));
/// assert!(code.ends_with("-S"));
///
/// assert!(generate("W", BranchType::Sub).is_none());
/// ```
pub fn generate(branch_name: &str, kind: BranchType) -> Option<String> {
    let prefix: String = branch_name.chars().take(2).collect();
    if prefix.chars().count() < 2 {
        return None;
    }

    let prefix = prefix.to_uppercase();
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    let type_tag = match kind {
        BranchType::Main => 'M',
        BranchType::Sub => 'S',
    };

    Some(format!("{CODE_PREFIX}-{prefix}-{suffix}-{type_tag}"))
}
