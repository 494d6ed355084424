//! Event Log
//!
//! Append-only, line-oriented record of monitor lifecycle and detected changes.
//! Each line is `[YYYY-MM-DD HH:MM:SS] message` in local time. This is the
//! operator-facing audit trail; diagnostic output goes through `tracing`.

use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line-oriented event sink backed by a file
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line. Write failures are reported and swallowed.
    pub fn append(&self, message: &str) {
        if let Err(e) = self.try_append(message) {
            tracing::warn!(
                log_file = %self.path.display(),
                error = %e,
                "Could not write to event log"
            );
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        let line = format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), message);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
