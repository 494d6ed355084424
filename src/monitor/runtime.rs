//! Monitor daemon and cycle logic.

use super::report::{CycleReport, RunSummary};
use crate::alert::{build_notifier, Delivery, Notifier};
use crate::concurrency::CancellationToken;
use crate::config::MonitorConfig;
use crate::diff::{classify, ChangeSet};
use crate::error::{MonitorError, ScanError};
use crate::event_log::EventLog;
use crate::scan::hasher::Fingerprinter;
use crate::scan::SnapshotBuilder;
use crate::snapshot::Snapshot;
use crate::store::{load_or_empty, BaselineStore, JsonBaselineStore};
use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Orchestrator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Initializing,
    Bootstrapping,
    Monitoring,
    Stopped,
}

/// Polling monitor: snapshot, classify, alert, persist, wait, repeat.
///
/// One cycle completes fully before the next begins; the interval is measured
/// from the end of one cycle to the start of the next.
pub struct MonitorDaemon {
    config: MonitorConfig,
    builder: SnapshotBuilder,
    store: Box<dyn BaselineStore>,
    notifier: Box<dyn Notifier>,
    event_log: EventLog,
    state: MonitorState,
}

impl MonitorDaemon {
    pub fn new(
        config: MonitorConfig,
        store: Box<dyn BaselineStore>,
        notifier: Box<dyn Notifier>,
        event_log: EventLog,
    ) -> Self {
        let builder = SnapshotBuilder::new(config.monitor.root.clone())
            .with_walker_config(config.walker_config())
            .with_fingerprinter(Arc::new(config.monitor.hash_algorithm));
        Self {
            config,
            builder,
            store,
            notifier,
            event_log,
            state: MonitorState::Initializing,
        }
    }

    /// Wire the JSON baseline store, configured notifier, and event log
    pub fn from_config(config: MonitorConfig) -> Result<Self, MonitorError> {
        let store = Box::new(JsonBaselineStore::new(config.storage.baseline_file.clone()));
        let notifier = build_notifier(&config.notify)?;
        let event_log = EventLog::new(config.storage.event_log_file.clone());
        Ok(Self::new(config, store, notifier, event_log))
    }

    pub fn with_fingerprinter(mut self, fingerprinter: Arc<dyn Fingerprinter>) -> Self {
        self.builder = self.builder.with_fingerprinter(fingerprinter);
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Run until cancelled. Returns `Err` only for fatal errors, which are also
    /// written to the event log.
    pub fn run(&mut self, cancel: &CancellationToken) -> Result<RunSummary, MonitorError> {
        match self.run_inner(cancel) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                self.state = MonitorState::Stopped;
                error!(error = %e, "Monitor stopped by fatal error");
                self.event_log.append(&format!("Fatal error: {}", e));
                Err(e)
            }
        }
    }

    fn run_inner(&mut self, cancel: &CancellationToken) -> Result<RunSummary, MonitorError> {
        let mut summary = RunSummary::default();
        let mut baseline = self.initialize()?;

        if baseline.is_empty() {
            match self.bootstrap(cancel) {
                Ok(snapshot) => {
                    baseline = snapshot;
                    summary.bootstrapped = true;
                }
                Err(e) if e.is_cancelled() => return Ok(self.stop(summary)),
                Err(e) => return Err(e),
            }
        }

        self.state = MonitorState::Monitoring;
        let interval = Duration::from_secs(self.config.monitor.interval_secs);

        loop {
            if cancel.is_cancelled() {
                break;
            }
            match self.run_cycle(&mut baseline, cancel) {
                Ok(report) => {
                    summary.cycles_completed += 1;
                    summary.events_reported += report.event_count() as u64;
                }
                Err(e) if e.is_cancelled() => break,
                Err(e) => return Err(e),
            }
            if cancel.wait_timeout(interval) {
                break;
            }
        }

        Ok(self.stop(summary))
    }

    fn stop(&mut self, summary: RunSummary) -> RunSummary {
        self.state = MonitorState::Stopped;
        info!(
            cycles = summary.cycles_completed,
            events = summary.events_reported,
            "Monitoring stopped by user"
        );
        self.event_log.append("Monitoring stopped by user.");
        summary
    }

    /// Ensure the watched root exists and load the baseline.
    ///
    /// An unavailable root is fatal; an unreadable baseline degrades to empty.
    pub fn initialize(&mut self) -> Result<Snapshot, MonitorError> {
        self.state = MonitorState::Initializing;
        let root = self.builder.ensure_root()?;
        info!(
            root = %root.display(),
            baseline = %self.store.location().display(),
            alerts = %self.notifier.describe(),
            "Monitoring folder"
        );
        self.event_log
            .append(&format!("Monitoring started for {}", root.display()));
        Ok(load_or_empty(self.store.as_ref()))
    }

    /// As `initialize`, without the lifecycle log line (one-shot commands)
    pub fn load_baseline(&self) -> Result<Snapshot, MonitorError> {
        self.builder.ensure_root()?;
        Ok(load_or_empty(self.store.as_ref()))
    }

    /// Build and persist the first baseline. No events are emitted.
    pub fn bootstrap(&mut self, cancel: &CancellationToken) -> Result<Snapshot, MonitorError> {
        self.state = MonitorState::Bootstrapping;
        info!("No baseline found, creating baseline from current files");
        let snapshot = self.builder.build(cancel)?;
        if let Err(e) = self.store.save(&snapshot) {
            warn!(
                baseline = %self.store.location().display(),
                error = %e,
                "Failed to save baseline"
            );
        }
        self.event_log.append("Baseline created.");
        info!(files = snapshot.len(), "Baseline created");
        Ok(snapshot)
    }

    /// Classify the current tree against `baseline` without alerting or persisting
    pub fn preview(
        &self,
        baseline: &Snapshot,
        cancel: &CancellationToken,
    ) -> Result<ChangeSet, MonitorError> {
        let current = self.builder.build(cancel)?;
        Ok(classify(baseline, &current))
    }

    /// One full cycle: build, classify, dispatch, persist.
    ///
    /// Cancellation is honored during the walk and before dispatch. Once the
    /// first event is dispatched the cycle runs to completion, and `baseline`
    /// always advances to the new snapshot even if alerts or the save failed.
    pub fn run_cycle(
        &mut self,
        baseline: &mut Snapshot,
        cancel: &CancellationToken,
    ) -> Result<CycleReport, MonitorError> {
        let started = Instant::now();
        let (current, scan) = self.builder.build_with_stats(cancel)?;
        let changes = classify(baseline, &current);

        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled.into());
        }

        let mut report = CycleReport {
            scan,
            files: current.len(),
            ..CycleReport::default()
        };

        for event in changes.events() {
            info!(kind = %event.kind(), path = %event.path(), "{}", event.log_message());
            self.event_log.append(&event.log_message());

            let body = event.alert_body(Local::now());
            match self.notifier.send(event.alert_subject(), &body) {
                Ok(Delivery::Sent) => report.alerts_sent += 1,
                Ok(Delivery::Skipped) => report.alerts_skipped += 1,
                Err(e) => {
                    report.alerts_failed += 1;
                    warn!(path = %event.path(), error = %e, "Failed to send alert");
                }
            }
        }

        report.baseline_saved = match self.store.save(&current) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    baseline = %self.store.location().display(),
                    error = %e,
                    "Failed to save baseline, keeping it in memory"
                );
                false
            }
        };
        *baseline = current;
        report.changes = changes;

        debug!(
            files = report.files,
            events = report.event_count(),
            alerts_failed = report.alerts_failed,
            duration_ms = started.elapsed().as_millis() as u64,
            "Cycle completed"
        );
        Ok(report)
    }
}
