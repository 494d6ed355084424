//! Snapshot comparison and change classification
//!
//! `classify` partitions the union of baseline and current paths into new,
//! modified, deleted, and unchanged. Unchanged paths produce no event.

use crate::snapshot::Snapshot;
use crate::types::Digest;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Kind of detected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    New,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::New => "new",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// One classified path, carrying the digests needed for alerting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    New { path: String, digest: Digest },
    Modified { path: String, old: Digest, new: Digest },
    Deleted { path: String, last: Digest },
}

impl ChangeEvent {
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::New { .. } => ChangeKind::New,
            ChangeEvent::Modified { .. } => ChangeKind::Modified,
            ChangeEvent::Deleted { .. } => ChangeKind::Deleted,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ChangeEvent::New { path, .. }
            | ChangeEvent::Modified { path, .. }
            | ChangeEvent::Deleted { path, .. } => path,
        }
    }

    /// Line written to the event log
    pub fn log_message(&self) -> String {
        match self {
            ChangeEvent::New { path, .. } => format!("New file detected: {}", path),
            ChangeEvent::Modified { path, .. } => format!("Modified file: {}", path),
            ChangeEvent::Deleted { path, .. } => format!("Deleted file: {}", path),
        }
    }

    pub fn alert_subject(&self) -> &'static str {
        match self {
            ChangeEvent::New { .. } => "FIM Alert: New file detected",
            ChangeEvent::Modified { .. } => "FIM Alert: File modified",
            ChangeEvent::Deleted { .. } => "FIM Alert: File deleted",
        }
    }

    pub fn alert_body(&self, at: DateTime<Local>) -> String {
        let time = at.format("%Y-%m-%d %H:%M:%S");
        match self {
            ChangeEvent::New { path, digest } => format!(
                "New file detected:\n\nPath: {}\nTime: {}\nHash: {}\n",
                path,
                time,
                hex::encode(digest)
            ),
            ChangeEvent::Modified { path, old, new } => format!(
                "File modified:\n\nPath: {}\nTime: {}\n\nOld hash: {}\nNew hash: {}\n",
                path,
                time,
                hex::encode(old),
                hex::encode(new)
            ),
            ChangeEvent::Deleted { path, last } => format!(
                "File deleted:\n\nPath: {}\nTime: {}\n\nLast known hash: {}\n",
                path,
                time,
                hex::encode(last)
            ),
        }
    }
}

/// Result of comparing a baseline against a current snapshot.
///
/// Each list is sorted by path; the three lists are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub new: Vec<ChangeEvent>,
    pub modified: Vec<ChangeEvent>,
    pub deleted: Vec<ChangeEvent>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.new.len() + self.modified.len() + self.deleted.len()
    }

    /// All events in dispatch order: new, then modified, then deleted
    pub fn events(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.new
            .iter()
            .chain(self.modified.iter())
            .chain(self.deleted.iter())
    }

    pub fn paths_of(&self, kind: ChangeKind) -> Vec<&str> {
        let list = match kind {
            ChangeKind::New => &self.new,
            ChangeKind::Modified => &self.modified,
            ChangeKind::Deleted => &self.deleted,
        };
        list.iter().map(ChangeEvent::path).collect()
    }
}

/// Compare `baseline` against `current`. Pure and deterministic.
pub fn classify(baseline: &Snapshot, current: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, digest) in current.iter() {
        match baseline.get(path) {
            None => changes.new.push(ChangeEvent::New {
                path: path.to_string(),
                digest: *digest,
            }),
            Some(old) if old != digest => changes.modified.push(ChangeEvent::Modified {
                path: path.to_string(),
                old: *old,
                new: *digest,
            }),
            Some(_) => {}
        }
    }

    for (path, digest) in baseline.iter() {
        if !current.contains(path) {
            changes.deleted.push(ChangeEvent::Deleted {
                path: path.to_string(),
                last: *digest,
            });
        }
    }

    changes
}
