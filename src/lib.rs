//! Fimon: Polling File-Integrity Monitor
//!
//! Fingerprints every regular file under a watched root, persists the result as a
//! baseline, and on each poll classifies paths as new, modified, or deleted before
//! alerting and advancing the baseline.

pub mod alert;
pub mod concurrency;
pub mod config;
pub mod diff;
pub mod error;
pub mod event_log;
pub mod logging;
pub mod monitor;
pub mod scan;
pub mod snapshot;
pub mod store;
pub mod tooling;
pub mod types;
