//! JSON file baseline persistence
//!
//! On-disk form is a pretty-printed JSON object mapping absolute path to lowercase
//! hex digest. Saves go to a sibling temp file first and are renamed into place.

use crate::error::StorageError;
use crate::snapshot::Snapshot;
use crate::store::BaselineStore;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Baseline store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonBaselineStore {
    path: PathBuf,
}

impl JsonBaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "baseline".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt(&self, reason: impl Into<String>) -> StorageError {
        StorageError::Corrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl BaselineStore for JsonBaselineStore {
    fn load(&self) -> Result<Snapshot, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Snapshot::new()),
            Err(e) => return Err(StorageError::IoError(e)),
        };

        let map: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;

        Snapshot::from_hex_map(map)
            .map_err(|(path, reason)| self.corrupt(format!("entry {}: {}", path, reason)))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&snapshot.to_hex_map())?;
        let temp = self.temp_path();
        let written = write_synced(&temp, json.as_bytes())
            .and_then(|()| std::fs::rename(&temp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    file.sync_all()
}
