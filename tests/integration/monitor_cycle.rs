use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fimon::alert::{Delivery, Notifier};
use fimon::config::MonitorConfig;
use fimon::diff::ChangeKind;
use fimon::error::NotifyError;
use fimon::event_log::EventLog;
use fimon::monitor::{CancellationToken, MonitorDaemon};
use fimon::scan::hasher::Fingerprinter;
use fimon::scan::HashAlgorithm;
use fimon::snapshot::Snapshot;
use fimon::store::{BaselineStore, JsonBaselineStore};
use fimon::types::Digest;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Records every alert it is asked to send
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<Delivery, NotifyError> {
        self.sent.lock().push((subject.to_string(), body.to_string()));
        Ok(Delivery::Sent)
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// Fails every send
#[derive(Clone, Default)]
struct FailingNotifier {
    attempts: Arc<AtomicUsize>,
}

impl Notifier for FailingNotifier {
    fn send(&self, _subject: &str, _body: &str) -> Result<Delivery, NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Transport("connection refused".to_string()))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Refuses to read files whose name matches while `blocked` is set
struct Gate {
    name: &'static str,
    blocked: Arc<Mutex<bool>>,
}

impl Fingerprinter for Gate {
    fn fingerprint(&self, path: &Path) -> std::io::Result<Option<Digest>> {
        let hit = path.file_name().and_then(|n| n.to_str()) == Some(self.name);
        if hit && *self.blocked.lock() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "blocked",
            ));
        }
        HashAlgorithm::Sha256.fingerprint(path)
    }
}

fn setup(temp: &TempDir, notifier: Box<dyn Notifier>) -> MonitorDaemon {
    let mut config = MonitorConfig::default();
    config.monitor.root = temp.path().join("watched");
    config.storage.baseline_file = temp.path().join("baseline.json");
    config.storage.event_log_file = temp.path().join("fim_events.log");
    fs::create_dir_all(&config.monitor.root).unwrap();
    MonitorDaemon::new(
        config.clone(),
        Box::new(JsonBaselineStore::new(config.storage.baseline_file.clone())),
        notifier,
        EventLog::new(config.storage.event_log_file.clone()),
    )
}

fn names(paths: Vec<&str>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn modify_add_delete_are_classified_and_alerted() {
    let temp = TempDir::new().unwrap();
    let notifier = RecordingNotifier::default();
    let mut daemon = setup(&temp, Box::new(notifier.clone()));
    let watched = temp.path().join("watched");
    fs::write(watched.join("a"), "hello").unwrap();
    fs::write(watched.join("b"), "world").unwrap();

    let cancel = CancellationToken::new();
    let mut baseline = daemon.bootstrap(&cancel).unwrap();
    assert_eq!(baseline.len(), 2);
    assert!(notifier.sent.lock().is_empty());

    fs::write(watched.join("a"), "hellx").unwrap();
    fs::write(watched.join("c"), "new").unwrap();
    fs::remove_file(watched.join("b")).unwrap();

    let report = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert_eq!(names(report.changes.paths_of(ChangeKind::New)), vec!["c"]);
    assert_eq!(names(report.changes.paths_of(ChangeKind::Modified)), vec!["a"]);
    assert_eq!(names(report.changes.paths_of(ChangeKind::Deleted)), vec!["b"]);
    assert_eq!(report.alerts_sent, 3);
    assert!(report.baseline_saved);

    let subjects: Vec<String> = notifier.sent.lock().iter().map(|(s, _)| s.clone()).collect();
    assert_eq!(
        subjects,
        vec![
            "FIM Alert: New file detected",
            "FIM Alert: File modified",
            "FIM Alert: File deleted",
        ]
    );

    let log = fs::read_to_string(temp.path().join("fim_events.log")).unwrap();
    assert!(log.contains("New file detected:"));
    assert!(log.contains("Modified file:"));
    assert!(log.contains("Deleted file:"));

    let stored = JsonBaselineStore::new(temp.path().join("baseline.json"))
        .load()
        .unwrap();
    assert_eq!(stored, baseline);
    assert_eq!(stored.len(), 2);

    let quiet = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert!(quiet.changes.is_empty());
    assert_eq!(notifier.sent.lock().len(), 3);
}

#[test]
fn failed_alerts_do_not_hold_back_the_baseline() {
    let temp = TempDir::new().unwrap();
    let notifier = FailingNotifier::default();
    let mut daemon = setup(&temp, Box::new(notifier.clone()));
    let watched = temp.path().join("watched");

    let cancel = CancellationToken::new();
    let mut baseline = Snapshot::new();
    fs::write(watched.join("x"), "1").unwrap();
    fs::write(watched.join("y"), "2").unwrap();

    let report = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert_eq!(report.alerts_failed, 2);
    assert_eq!(notifier.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(baseline.len(), 2);

    let next = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert!(next.changes.is_empty());
}

#[test]
fn unreadable_file_is_absent_until_it_can_be_read() {
    let temp = TempDir::new().unwrap();
    let blocked = Arc::new(Mutex::new(true));
    let gate = Gate {
        name: "secret",
        blocked: blocked.clone(),
    };
    let mut daemon = setup(&temp, Box::new(RecordingNotifier::default()))
        .with_fingerprinter(Arc::new(gate));
    let watched = temp.path().join("watched");
    fs::write(watched.join("open"), "visible").unwrap();
    fs::write(watched.join("secret"), "hidden").unwrap();

    let cancel = CancellationToken::new();
    let mut baseline = daemon.bootstrap(&cancel).unwrap();
    assert_eq!(baseline.len(), 1);

    *blocked.lock() = false;
    let report = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert_eq!(names(report.changes.paths_of(ChangeKind::New)), vec!["secret"]);
    assert_eq!(report.changes.len(), 1);
}

#[test]
fn state_files_inside_the_root_are_not_fingerprinted() {
    let temp = TempDir::new().unwrap();
    let watched = temp.path().join("watched");
    fs::create_dir_all(&watched).unwrap();
    let mut config = MonitorConfig::default();
    config.monitor.root = watched.clone();
    config.storage.baseline_file = watched.join("baseline.json");
    config.storage.event_log_file = watched.join("fim_events.log");
    let mut daemon = MonitorDaemon::new(
        config.clone(),
        Box::new(JsonBaselineStore::new(config.storage.baseline_file.clone())),
        Box::new(RecordingNotifier::default()),
        EventLog::new(config.storage.event_log_file.clone()),
    );
    fs::write(watched.join("data.txt"), "payload").unwrap();

    let cancel = CancellationToken::new();
    let mut baseline = daemon.bootstrap(&cancel).unwrap();
    assert_eq!(baseline.len(), 1);

    let report = daemon.run_cycle(&mut baseline, &cancel).unwrap();
    assert!(report.changes.is_empty());
}

#[test]
fn ignore_patterns_exclude_matching_files() {
    let temp = TempDir::new().unwrap();
    let watched = temp.path().join("watched");
    fs::create_dir_all(watched.join("cache")).unwrap();
    let mut config = MonitorConfig::default();
    config.monitor.root = watched.clone();
    config.monitor.ignore_patterns = vec!["*.tmp".to_string(), "cache".to_string()];
    config.storage.baseline_file = temp.path().join("baseline.json");
    config.storage.event_log_file = temp.path().join("fim_events.log");
    let mut daemon = MonitorDaemon::from_config(config).unwrap();

    fs::write(watched.join("keep.txt"), "k").unwrap();
    fs::write(watched.join("scratch.tmp"), "s").unwrap();
    fs::write(watched.join("cache").join("blob"), "b").unwrap();

    let baseline = daemon.bootstrap(&CancellationToken::new()).unwrap();
    let kept: Vec<String> = names(baseline.paths().collect());
    assert_eq!(kept, vec!["keep.txt"]);
}

#[test]
fn restart_with_stored_baseline_reports_offline_changes() {
    let temp = TempDir::new().unwrap();
    let watched = temp.path().join("watched");
    {
        let mut daemon = setup(&temp, Box::new(RecordingNotifier::default()));
        fs::write(watched.join("a"), "hello").unwrap();
        daemon.bootstrap(&CancellationToken::new()).unwrap();
    }

    fs::write(watched.join("a"), "changed while stopped").unwrap();

    let notifier = RecordingNotifier::default();
    let mut daemon = setup(&temp, Box::new(notifier.clone()));
    let mut baseline = daemon.initialize().unwrap();
    assert_eq!(baseline.len(), 1);
    let report = daemon
        .run_cycle(&mut baseline, &CancellationToken::new())
        .unwrap();
    assert_eq!(names(report.changes.paths_of(ChangeKind::Modified)), vec!["a"]);
    assert_eq!(notifier.sent.lock().len(), 1);
}
