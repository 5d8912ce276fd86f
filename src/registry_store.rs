//! Sled-backed document store for branch records.
//!
//! One flat keyed collection of JSON documents; the store assigns record
//! ids and creation timestamps. Live consumers subscribe through
//! [`RegistryStore::subscribe`], which replays the full record set on every
//! committed change. There are no secondary indexes; the type lookup used
//! by the uniqueness guard scans the collection.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use sled::Db;

use crate::branch_model::{BranchRecord, BranchStatus, BranchType, NewBranch};
use crate::registry_error::RegistryError;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Open options for the registry database.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Directory the database lives in.
    pub path: PathBuf,

    /// Background flush cadence in milliseconds; `None` flushes only on
    /// write.
    pub flush_every_ms: Option<u64>,

    /// Delete the database directory when the store is dropped.
    pub temporary: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("branch_registry.db"),
            flush_every_ms: Some(1000),
            temporary: false,
        }
    }
}

pub struct RegistryStore {
    db: Db,
}

impl RegistryStore {
    /// Opens (or creates) the registry database described by `config`.
    pub fn open(config: RegistryConfig) -> Result<Self, RegistryError> {
        let db = sled::Config::new()
            .path(&config.path)
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(config.flush_every_ms)
            .temporary(config.temporary)
            .open()?;

        // Force an initial flush so a freshly created directory is durable.
        db.flush()?;

        info!("registry store opened at {}", config.path.display());
        Ok(Self { db })
    }

    /// Inserts a validated new branch, assigning id, creation timestamp
    /// and the initial `Active` status.
    pub fn insert(&self, branch: NewBranch) -> Result<BranchRecord, RegistryError> {
        let id = format!("{:016x}", self.db.generate_id()?);
        let record = BranchRecord {
            id: id.clone(),
            branch_name: branch.branch_name,
            branch_code: branch.branch_code,
            address: branch.address,
            kind: branch.kind,
            status: BranchStatus::Active,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&record)?;
        self.db.insert(id, json.as_bytes())?;
        self.db.flush()?;
        Ok(record)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<BranchRecord>, RegistryError> {
        match self.db.get(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Reads the full record set in key order.
    pub fn all(&self) -> Result<Vec<BranchRecord>, RegistryError> {
        let mut records = Vec::new();
        for item in self.db.iter() {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }

    /// Scans the collection for records of the given type.
    pub fn find_by_type(&self, kind: BranchType) -> Result<Vec<BranchRecord>, RegistryError> {
        Ok(self.all()?.into_iter().filter(|r| r.kind == kind).collect())
    }

    /// Replaces the stored document for `record.id`. Returns `Ok(None)`
    /// when no record with that id exists; nothing is written in that case.
    pub fn update(&self, record: BranchRecord) -> Result<Option<BranchRecord>, RegistryError> {
        if self.db.contains_key(&record.id)? {
            let json = serde_json::to_string(&record)?;
            self.db.insert(record.id.as_str(), json.as_bytes())?;
            self.db.flush()?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Removes the record, reporting whether it existed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, RegistryError> {
        match self.db.remove(id)? {
            Some(_) => {
                self.db.flush()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn flush(&self) -> Result<(), RegistryError> {
        self.db.flush()?;
        Ok(())
    }

    /// Subscribes `on_snapshot` to the record set.
    ///
    /// The callback receives the current full record set immediately, then
    /// a fresh replacement snapshot after every committed change, in the
    /// store's commit order. A burst of writes may collapse into a single
    /// snapshot. Reads that fail mid-subscription are logged and skipped;
    /// the subscription itself stays up.
    ///
    /// The returned [`RegistryWatcher`] owns the delivery thread; dropping
    /// it (or calling [`RegistryWatcher::unsubscribe`]) tears the
    /// subscription down and joins the thread.
    pub fn subscribe<F>(&self, on_snapshot: F) -> RegistryWatcher
    where
        F: Fn(Vec<BranchRecord>) + Send + 'static,
    {
        let db = self.db.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            // The subscriber must exist before the initial read so changes
            // landing in between still trigger a re-read.
            let mut events = db.watch_prefix(vec![]);

            deliver_snapshot(&db, &on_snapshot);

            while !stop_flag.load(Ordering::Relaxed) {
                match events.next_timeout(EVENT_POLL_INTERVAL) {
                    Ok(_event) => {
                        // Drain whatever else is already queued so one
                        // burst becomes one snapshot.
                        while events.next_timeout(Duration::from_millis(0)).is_ok() {}
                        deliver_snapshot(&db, &on_snapshot);
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        RegistryWatcher {
            stop,
            handle: Some(handle),
        }
    }
}

fn deliver_snapshot<F>(db: &Db, on_snapshot: &F)
where
    F: Fn(Vec<BranchRecord>),
{
    let mut records = Vec::new();
    for item in db.iter() {
        let decoded = item
            .map_err(RegistryError::from)
            .and_then(|(_key, value)| serde_json::from_slice(&value).map_err(RegistryError::from));
        match decoded {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("skipping snapshot delivery, record read failed: {}", e);
                return;
            }
        }
    }
    on_snapshot(records);
}

/// Live subscription handle.
///
/// Holds the background delivery thread; the subscription is released when
/// the handle is dropped, so a watcher scoped to a view cannot leak past
/// it.
pub struct RegistryWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RegistryWatcher {
    /// Stops snapshot delivery and waits for the delivery thread to exit.
    pub fn unsubscribe(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("registry watcher thread panicked during shutdown");
            }
        }
    }
}

impl Drop for RegistryWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
