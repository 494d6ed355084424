//! Baseline Store
//!
//! Persists the single most recent snapshot between cycles. Only one baseline
//! survives; every save replaces the previous one wholesale.

pub mod persistence;

use crate::error::StorageError;
use crate::snapshot::Snapshot;
use std::path::Path;

pub use persistence::JsonBaselineStore;

/// Baseline Store interface
pub trait BaselineStore: Send + Sync {
    /// Load the persisted baseline. A missing baseline is `Ok` and empty.
    fn load(&self) -> Result<Snapshot, StorageError>;

    /// Replace the persisted baseline with `snapshot`
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;

    /// Where the baseline lives, for log messages
    fn location(&self) -> &Path;
}

/// Load a baseline, degrading to an empty snapshot on any error
pub fn load_or_empty(store: &dyn BaselineStore) -> Snapshot {
    match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(
                baseline = %store.location().display(),
                error = %e,
                "Failed to load baseline, starting with empty baseline"
            );
            Snapshot::new()
        }
    }
}
