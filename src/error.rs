//! Error types
//!
//! Each boundary in the monitoring cycle owns its own error enum so callers can
//! decide what is contained locally and what escapes to the top-level loop.

use std::path::PathBuf;
use thiserror::Error;

/// Baseline persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt baseline {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to serialize baseline: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Snapshot build errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Watched root {path} is unavailable: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Scan cancelled")]
    Cancelled,
}

/// Alert delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Alert transport failed: {0}")]
    Transport(String),

    #[error("Alert relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Alert runtime error: {0}")]
    Runtime(String),
}

/// Top-level error for monitor and CLI operations
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Scan error: {0}")]
    ScanError(#[from] ScanError),

    #[error("Notify error: {0}")]
    NotifyError(#[from] NotifyError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for MonitorError {
    fn from(err: config::ConfigError) -> Self {
        MonitorError::ConfigError(err.to_string())
    }
}

impl MonitorError {
    /// True when the error only reports an operator-requested stop.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MonitorError::ScanError(ScanError::Cancelled))
    }
}
