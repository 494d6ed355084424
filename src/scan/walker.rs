//! Directory traversal and snapshot assembly

use crate::concurrency::CancellationToken;
use crate::error::ScanError;
use crate::scan::hasher::{Fingerprinter, HashAlgorithm};
use crate::snapshot::Snapshot;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    pub follow_symlinks: bool,
    /// Glob patterns matched against paths relative to the root
    pub ignore_patterns: Vec<String>,
    pub max_depth: Option<usize>,
    /// Absolute paths never recorded (the monitor's own baseline and event log)
    pub exclude_paths: Vec<PathBuf>,
}

impl WalkerConfig {
    /// Compile ignore patterns into a single matcher.
    ///
    /// Patterns without a separator match at any depth (`*.swp` -> `**/*.swp`).
    pub fn compile_ignore_set(&self) -> Result<GlobSet, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for raw in &self.ignore_patterns {
            let pattern = normalize_ignore_pattern(raw);
            let glob = GlobBuilder::new(&pattern)
                .literal_separator(false)
                .build()
                .map_err(|e| ScanError::InvalidPattern {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ScanError::InvalidPattern {
            pattern: self.ignore_patterns.join(","),
            reason: e.to_string(),
        })
    }
}

fn normalize_ignore_pattern(raw: &str) -> String {
    let pattern = raw.trim().trim_start_matches('/').replace('\\', "/");
    if !pattern.contains('/') && !pattern.starts_with("**") {
        format!("**/{}", pattern)
    } else {
        pattern
    }
}

/// Counters for one snapshot build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_hashed: usize,
    /// Files that vanished between listing and reading
    pub skipped_absent: usize,
    /// Files that could not be read
    pub skipped_unreadable: usize,
    pub skipped_ignored: usize,
}

/// Builds a `Snapshot` of every regular file under a root directory
pub struct SnapshotBuilder {
    root: PathBuf,
    walker_config: WalkerConfig,
    fingerprinter: Arc<dyn Fingerprinter>,
}

impl SnapshotBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
            fingerprinter: Arc::new(HashAlgorithm::default()),
        }
    }

    pub fn with_walker_config(mut self, walker_config: WalkerConfig) -> Self {
        self.walker_config = walker_config;
        self
    }

    pub fn with_fingerprinter(mut self, fingerprinter: Arc<dyn Fingerprinter>) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root if needed and return its canonical absolute form
    pub fn ensure_root(&self) -> Result<PathBuf, ScanError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| ScanError::RootUnavailable {
                path: self.root.clone(),
                source: e,
            })?;
            info!(root = %self.root.display(), "Created watched root");
        }
        let canonical = dunce::canonicalize(&self.root).map_err(|e| ScanError::RootUnavailable {
            path: self.root.clone(),
            source: e,
        })?;
        if !canonical.is_dir() {
            return Err(ScanError::RootUnavailable {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "watched root is not a directory",
                ),
            });
        }
        Ok(canonical)
    }

    pub fn build(&self, cancel: &CancellationToken) -> Result<Snapshot, ScanError> {
        self.build_with_stats(cancel).map(|(snapshot, _)| snapshot)
    }

    /// Walk the tree and fingerprint each regular file.
    ///
    /// Unreadable files and unlistable directories are skipped. The cancellation
    /// token is polled before each entry.
    pub fn build_with_stats(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(Snapshot, ScanStats), ScanError> {
        let root = self.ensure_root()?;
        let ignore_set = self.walker_config.compile_ignore_set()?;
        let excluded: HashSet<PathBuf> = self
            .walker_config
            .exclude_paths
            .iter()
            .map(|p| absolutize(p))
            .collect();

        let mut walker = WalkDir::new(&root).follow_links(self.walker_config.follow_symlinks);
        if let Some(depth) = self.walker_config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut snapshot = Snapshot::new();
        let mut stats = ScanStats::default();

        let entries = walker.into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            match entry.path().strip_prefix(&root) {
                Ok(rel) => !ignore_set.is_match(rel),
                Err(_) => true,
            }
        });

        for entry in entries {
            if cancel.is_cancelled() {
                debug!(files_hashed = stats.files_hashed, "Walk interrupted by cancellation");
                return Err(ScanError::Cancelled);
            }

            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if excluded.contains(path) {
                stats.skipped_ignored += 1;
                continue;
            }
            let Some(key) = path.to_str() else {
                warn!(path = ?path, "Skipping non UTF-8 path");
                stats.skipped_unreadable += 1;
                continue;
            };

            match self.fingerprinter.fingerprint(path) {
                Ok(Some(digest)) => {
                    snapshot.insert(key, digest);
                    stats.files_hashed += 1;
                }
                Ok(None) => {
                    debug!(path = %key, "File vanished before it could be read");
                    stats.skipped_absent += 1;
                }
                Err(e) => {
                    warn!(path = %key, error = %e, "Skipping unreadable file");
                    stats.skipped_unreadable += 1;
                }
            }
        }

        debug!(
            root = %root.display(),
            files = stats.files_hashed,
            absent = stats.skipped_absent,
            unreadable = stats.skipped_unreadable,
            "Snapshot built"
        );
        Ok((snapshot, stats))
    }
}

/// Resolve a possibly relative, possibly not-yet-existing path to the absolute
/// form the walker reports.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    if let Ok(canonical) = dunce::canonicalize(&absolute) {
        return canonical;
    }
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => dunce::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    }
}
