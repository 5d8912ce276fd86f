//! # Branch Registry Core
//!
//! An embedded registry engine for organizational branch records (physical
//! locations in a network), built on sled for stable local storage. The
//! registry keeps the collection consistent under uncoordinated edits:
//! exactly one `Main` branch at any committed instant, generated unique
//! branch codes, and guarded status transitions.
//!
//! ## Features
//!
//! - **Sled-based storage**: one flat keyed collection of JSON documents,
//!   store-assigned ids and creation timestamps
//! - **Live snapshots**: subscribe to the record set and receive a full
//!   replacement snapshot after every committed change
//! - **Invariant engine**: single-main enforcement via query-then-write,
//!   field validation that reports every violation at once, confirmation
//!   gates for risky transitions
//! - **Pure projections**: stats and filtered views derived from the
//!   snapshot alone
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use branch_registry_core::{BranchDraft, BranchRegistry, BranchType, RegistryConfig};
//!
//! let registry = BranchRegistry::open(RegistryConfig::default())?;
//!
//! let record = registry.create(BranchDraft {
//!     branch_name: "Westside Hub".to_string(),
//!     address: "12 Long Avenue, District 4".to_string(),
//!     kind: BranchType::Sub,
//! })?;
//! println!("registered {} as {}", record.branch_name, record.branch_code);
//!
//! let watcher = registry.subscribe(|records| {
//!     println!("registry now holds {} branches", records.len());
//! });
//! // ... the view stays live until the watcher is dropped
//! watcher.unsubscribe();
//! # Ok::<(), branch_registry_core::RegistryError>(())
//! ```
//!
//! ## Operations
//!
//! - [`BranchRegistry::create`] - validate, generate a code, enforce the
//!   single-main invariant, insert
//! - [`BranchRegistry::edit`] - revalidate and update mutable fields
//! - [`BranchRegistry::toggle_status`] - flip Active/Inactive with the
//!   main-deactivation confirmation gate
//! - [`BranchRegistry::delete`] - remove a record behind a confirmation
//!   prompt
//! - [`BranchRegistry::subscribe`] - live full-snapshot delivery

pub mod branch_code;
pub mod branch_model;
pub mod projection;
pub mod registry_error;
pub mod registry_store;
pub mod status;
pub mod uniqueness;
pub mod validate;

pub use branch_model::{BranchDraft, BranchEdit, BranchRecord, BranchStatus, BranchType};
pub use registry_error::{FieldError, RegistryError};
pub use registry_store::{RegistryConfig, RegistryStore, RegistryWatcher};
pub use status::{AlwaysConfirm, ConfirmationGate, DeleteOutcome, ToggleOutcome};

use log::{info, warn};

/// The registry operation surface.
///
/// Every write flows validator → uniqueness guard → store; reads flow
/// through subscriptions feeding the pure projection functions in
/// [`projection`]. The store is the sole system of record: the registry
/// holds no cached state of its own.
pub struct BranchRegistry {
    store: RegistryStore,
}

impl BranchRegistry {
    /// Opens the registry over the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] when the database cannot be
    /// opened.
    pub fn open(config: RegistryConfig) -> Result<Self, RegistryError> {
        let store = RegistryStore::open(config)?;
        Ok(Self { store })
    }

    /// Wraps an already-open store.
    pub fn from_store(store: RegistryStore) -> Self {
        Self { store }
    }

    /// Direct access to the underlying document store.
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Registers a new branch.
    ///
    /// The draft is validated (all violations reported together), a branch
    /// code is generated from the normalized name, and the single-main
    /// invariant is checked before the insert. New records start `Active`
    /// with a store-assigned id and creation timestamp.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] when a field constraint fails,
    ///   including a name too short to derive a code from
    /// - [`RegistryError::Conflict`] when a `Main` record already exists
    ///   and the draft targets `Main`
    /// - [`RegistryError::Store`] when the write fails; nothing is
    ///   partially applied
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use branch_registry_core::{BranchDraft, BranchRegistry, BranchType, RegistryConfig};
    ///
    /// let registry = BranchRegistry::open(RegistryConfig::default())?;
    /// let record = registry.create(BranchDraft {
    ///     branch_name: "North Hub".to_string(),
    ///     address: "4 Summit Way, Hill Quarter".to_string(),
    ///     kind: BranchType::Sub,
    /// })?;
    /// assert!(record.branch_code.starts_with("NX-NO-"));
    /// # Ok::<(), branch_registry_core::RegistryError>(())
    /// ```
    pub fn create(&self, draft: BranchDraft) -> Result<BranchRecord, RegistryError> {
        let branch = validate::check_draft(&draft)?;
        uniqueness::ensure_single_main(&self.store, branch.kind, None)?;

        let record = self.store.insert(branch)?;
        info!(
            "branch {} registered with code {}",
            record.id, record.branch_code
        );
        Ok(record)
    }

    /// Applies an edit to the mutable fields of a record.
    ///
    /// The payload is revalidated and, when it targets `Main`, the
    /// single-main invariant is rechecked excluding the record itself. The
    /// id, branch code and creation timestamp never change.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] when a field constraint fails
    /// - [`RegistryError::Conflict`] when promoting to `Main` while
    ///   another `Main` record exists; the existing record's id is named
    /// - [`RegistryError::NotFound`] when no record has this id
    pub fn edit(&self, id: &str, changes: BranchEdit) -> Result<BranchRecord, RegistryError> {
        let changes = validate::check_edit(&changes)?;
        uniqueness::ensure_single_main(&self.store, changes.kind, Some(id))?;

        let mut record = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| RegistryError::NotFound(format!("no branch with id: {id}")))?;

        record.branch_name = changes.branch_name;
        record.address = changes.address;
        record.kind = changes.kind;
        record.status = changes.status;

        match self.store.update(record)? {
            Some(updated) => {
                info!("branch {} updated", updated.id);
                Ok(updated)
            }
            None => Err(RegistryError::NotFound(format!(
                "branch {id} disappeared before the update was written"
            ))),
        }
    }

    /// Flips a record's status.
    ///
    /// Deactivating the `Main` branch asks `gate` first; a declined
    /// confirmation returns [`ToggleOutcome::Declined`] and issues no
    /// store write. There is no optimistic cache to roll back: the live
    /// subscription remains the source of truth either way.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] when no record has this id
    /// - [`RegistryError::Store`] when the confirmed write fails; the
    ///   error is logged and the last committed snapshot stands
    pub fn toggle_status(
        &self,
        id: &str,
        gate: &dyn ConfirmationGate,
    ) -> Result<ToggleOutcome, RegistryError> {
        let mut record = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| RegistryError::NotFound(format!("no branch with id: {id}")))?;

        let next = status::next_status(record.status);
        if status::requires_confirmation(record.kind, next)
            && !gate.confirm(status::MAIN_DEACTIVATE_WARNING)
        {
            info!("main branch deactivation declined for {}", record.id);
            return Ok(ToggleOutcome::Declined);
        }

        record.status = next;
        match self.store.update(record) {
            Ok(Some(updated)) => {
                info!("branch {} is now {}", updated.id, updated.status);
                Ok(ToggleOutcome::Applied(updated))
            }
            Ok(None) => Err(RegistryError::NotFound(format!(
                "branch {id} disappeared before the status was written"
            ))),
            Err(e) => {
                warn!("status update failed for {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Deletes a record behind a confirmation prompt.
    ///
    /// The prompt is stronger for the `Main` branch. A declined
    /// confirmation returns [`DeleteOutcome::Declined`] and leaves the
    /// record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no record has this id.
    pub fn delete(
        &self,
        id: &str,
        gate: &dyn ConfirmationGate,
    ) -> Result<DeleteOutcome, RegistryError> {
        let record = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| RegistryError::NotFound(format!("no branch with id: {id}")))?;

        if !gate.confirm(status::delete_prompt(record.kind)) {
            info!("deletion declined for branch {}", record.id);
            return Ok(DeleteOutcome::Declined);
        }

        if self.store.delete_by_id(id)? {
            info!("branch {} deleted", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Err(RegistryError::NotFound(format!(
                "branch {id} disappeared before the delete was written"
            )))
        }
    }

    /// One-shot read of the full record set, for callers that do not hold
    /// a live subscription.
    pub fn records(&self) -> Result<Vec<BranchRecord>, RegistryError> {
        self.store.all()
    }

    /// Subscribes to live full-snapshot delivery; see
    /// [`RegistryStore::subscribe`].
    pub fn subscribe<F>(&self, on_snapshot: F) -> RegistryWatcher
    where
        F: Fn(Vec<BranchRecord>) + Send + 'static,
    {
        self.store.subscribe(on_snapshot)
    }
}
