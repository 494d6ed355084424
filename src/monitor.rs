//! Monitor runtime: cycle orchestration and per-cycle reporting.

mod report;
mod runtime;

pub use crate::concurrency::CancellationToken;
pub use report::{CycleReport, RunSummary};
pub use runtime::{MonitorDaemon, MonitorState};
