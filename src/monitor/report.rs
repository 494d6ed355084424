//! Per-cycle and per-run summaries.

use crate::diff::ChangeSet;
use crate::scan::walker::ScanStats;

/// What one monitoring cycle observed and did
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub changes: ChangeSet,
    pub scan: ScanStats,
    /// Files in the snapshot that became the new baseline
    pub files: usize,
    pub alerts_sent: usize,
    pub alerts_skipped: usize,
    pub alerts_failed: usize,
    /// False when the baseline could not be written; the in-memory baseline
    /// still advanced
    pub baseline_saved: bool,
}

impl CycleReport {
    pub fn event_count(&self) -> usize {
        self.changes.len()
    }
}

/// Totals for a monitor run that ended by operator cancellation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub bootstrapped: bool,
    pub cycles_completed: u64,
    pub events_reported: u64,
}
