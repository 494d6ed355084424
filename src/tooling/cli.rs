//! CLI Tooling
//!
//! Command-line interface for the file-integrity monitor.

use crate::concurrency::CancellationToken;
use crate::config::{ConfigLoader, ConfigOverrides, MonitorConfig};
use crate::error::MonitorError;
use crate::monitor::MonitorDaemon;
use crate::tooling::format::{format_changes_text, ChangeSummary};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Fimon CLI - polling file-integrity monitor
#[derive(Parser)]
#[command(name = "fimon")]
#[command(about = "Fingerprint a directory tree and alert on new, modified, and deleted files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (default: ./fimon.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to monitor
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Baseline file location
    #[arg(long, global = true)]
    pub baseline: Option<PathBuf>,

    /// Event log file location
    #[arg(long, global = true)]
    pub event_log: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Monitor continuously until interrupted
    Watch {
        /// Seconds to wait between the end of one cycle and the start of the next
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Build and store a baseline from the current tree
    Init {
        /// Rebuild even if a baseline already exists
        #[arg(long)]
        force: bool,
    },
    /// Run a single cycle against the stored baseline
    Check {
        /// Report changes without alerting or updating the baseline
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Command-line values that override file and environment configuration
    pub fn overrides(&self) -> ConfigOverrides {
        let interval_secs = match &self.command {
            Commands::Watch { interval } => *interval,
            _ => None,
        };
        ConfigOverrides {
            root: self.root.clone(),
            interval_secs,
            baseline_file: self.baseline.clone(),
            event_log_file: self.event_log.clone(),
        }
    }

    /// Fold the logging flags into the loaded logging configuration
    pub fn apply_logging_flags(&self, config: &mut MonitorConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

/// CLI context holding the loaded configuration and the shutdown token
pub struct CliContext {
    config: MonitorConfig,
    cancel: CancellationToken,
}

impl CliContext {
    /// Load configuration from files and environment, then apply overrides
    pub fn new(
        config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, MonitorError> {
        let config = ConfigLoader::load_with_overrides(config_path.as_deref(), overrides)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: MonitorConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MonitorConfig {
        &mut self.config
    }

    /// Token to trip from a signal handler
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, MonitorError> {
        match command {
            Commands::Watch { .. } => {
                let mut daemon = MonitorDaemon::from_config(self.config.clone())?;
                info!(
                    interval_secs = self.config.monitor.interval_secs,
                    "Starting monitor"
                );
                let summary = daemon.run(&self.cancel)?;
                Ok(format!(
                    "Monitoring stopped after {} cycle(s), {} event(s) reported.",
                    summary.cycles_completed, summary.events_reported
                ))
            }
            Commands::Init { force } => {
                let mut daemon = MonitorDaemon::from_config(self.config.clone())?;
                let existing = daemon.load_baseline()?;
                if !force && !existing.is_empty() {
                    return Ok(format!(
                        "Baseline already exists ({} files at {}). Use --force to rebuild.",
                        existing.len(),
                        self.config.storage.baseline_file.display()
                    ));
                }
                let snapshot = daemon.bootstrap(&self.cancel)?;
                Ok(format!(
                    "Baseline created ({} files) at {}",
                    snapshot.len(),
                    self.config.storage.baseline_file.display()
                ))
            }
            Commands::Check { dry_run, format } => self.handle_check(*dry_run, format),
            Commands::Config => toml::to_string_pretty(&self.config.redacted()).map_err(|e| {
                MonitorError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
        }
    }

    fn handle_check(&self, dry_run: bool, format: &str) -> Result<String, MonitorError> {
        if format != "text" && format != "json" {
            return Err(MonitorError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                format
            )));
        }

        match self.run_check(dry_run, format) {
            Err(e) if e.is_cancelled() => Ok("Check cancelled.".to_string()),
            result => result,
        }
    }

    fn run_check(&self, dry_run: bool, format: &str) -> Result<String, MonitorError> {
        let mut daemon = MonitorDaemon::from_config(self.config.clone())?;
        let mut baseline = daemon.load_baseline()?;

        let (changes, summary, footer) = if dry_run {
            let changes = daemon.preview(&baseline, &self.cancel)?;
            let files = baseline.len() + changes.new.len() - changes.deleted.len();
            let summary = ChangeSummary::from_changes(&changes, files, true);
            (changes, summary, "Dry run, baseline not updated.")
        } else if baseline.is_empty() {
            let snapshot = daemon.bootstrap(&self.cancel)?;
            return Ok(format!(
                "No baseline found. Baseline created ({} files).",
                snapshot.len()
            ));
        } else {
            let report = daemon.run_cycle(&mut baseline, &self.cancel)?;
            let footer = if report.baseline_saved {
                "Baseline updated."
            } else {
                "Baseline could not be saved."
            };
            let summary = ChangeSummary::from_report(&report);
            (report.changes, summary, footer)
        };

        if format == "json" {
            return serde_json::to_string_pretty(&summary)
                .map_err(|e| MonitorError::ConfigError(format!("Failed to render JSON: {}", e)));
        }
        Ok(format_changes_text(&changes, footer))
    }
}
