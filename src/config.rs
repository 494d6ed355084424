//! Configuration
//!
//! A single `MonitorConfig` value is loaded at startup and passed explicitly into
//! the monitor. Core logic never reads the environment or global state.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::MonitorError;
use crate::logging::LoggingConfig;
use crate::scan::{HashAlgorithm, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub monitor: MonitorSettings,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from("watched_folder")
}

fn default_interval_secs() -> u64 {
    10
}

/// What to watch and how often
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Watched root; created if missing
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Pause between the end of one cycle and the start of the next
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Glob patterns (relative to root) excluded from snapshots
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            interval_secs: default_interval_secs(),
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
            max_depth: None,
            hash_algorithm: HashAlgorithm::default(),
        }
    }
}

fn default_baseline_file() -> PathBuf {
    PathBuf::from("baseline.json")
}

fn default_event_log_file() -> PathBuf {
    PathBuf::from("fim_events.log")
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Baseline JSON file
    #[serde(default = "default_baseline_file")]
    pub baseline_file: PathBuf,

    /// Append-only event log
    #[serde(default = "default_event_log_file")]
    pub event_log_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            baseline_file: default_baseline_file(),
            event_log_file: default_event_log_file(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}

/// Alert relay configuration. Without endpoint and credentials alerts are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Defaults to `username`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Defaults to `username`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            password: None,
            recipient: None,
            sender: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Command-line values that take precedence over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub baseline_file: Option<PathBuf>,
    pub event_log_file: Option<PathBuf>,
}

impl MonitorConfig {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(root) = &overrides.root {
            self.monitor.root = root.clone();
        }
        if let Some(interval) = overrides.interval_secs {
            self.monitor.interval_secs = interval;
        }
        if let Some(path) = &overrides.baseline_file {
            self.storage.baseline_file = path.clone();
        }
        if let Some(path) = &overrides.event_log_file {
            self.storage.event_log_file = path.clone();
        }
    }

    /// Reject values the monitor cannot run with
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.monitor.interval_secs == 0 {
            return Err(MonitorError::ConfigError(
                "monitor.interval_secs must be at least 1".to_string(),
            ));
        }
        if self.monitor.root.as_os_str().is_empty() {
            return Err(MonitorError::ConfigError(
                "monitor.root must not be empty".to_string(),
            ));
        }
        self.walker_config()
            .compile_ignore_set()
            .map_err(|e| MonitorError::ConfigError(e.to_string()))?;
        if let Some(endpoint) = self.notify.endpoint.as_deref() {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty()
                && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
            {
                return Err(MonitorError::ConfigError(format!(
                    "notify.endpoint must start with http:// or https://, got {}",
                    endpoint
                )));
            }
        }
        if self.notify.timeout_secs == 0 {
            return Err(MonitorError::ConfigError(
                "notify.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Walker settings, excluding the monitor's own state files from snapshots
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.monitor.follow_symlinks,
            ignore_patterns: self.monitor.ignore_patterns.clone(),
            max_depth: self.monitor.max_depth,
            exclude_paths: vec![
                self.storage.baseline_file.clone(),
                self.storage.event_log_file.clone(),
            ],
        }
    }

    /// Copy safe to print: the relay password is masked
    pub fn redacted(&self) -> MonitorConfig {
        let mut copy = self.clone();
        if copy.notify.password.is_some() {
            copy.notify.password = Some("********".to_string());
        }
        copy
    }
}
