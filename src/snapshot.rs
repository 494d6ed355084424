//! Snapshot
//!
//! An in-memory mapping from absolute file path to content digest, captured by one
//! scan. Keys are unique and carry no ordering significance; a `BTreeMap` is used so
//! every rendering of a snapshot (baseline file, reports) is stable.

use crate::types::Digest;
use std::collections::BTreeMap;

/// Path-to-digest mapping captured at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<String, Digest>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a digest for a path, replacing any previous value
    pub fn insert(&mut self, path: impl Into<String>, digest: Digest) -> Option<Digest> {
        self.entries.insert(path.into(), digest)
    }

    pub fn get(&self, path: &str) -> Option<&Digest> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Digest)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as path -> lowercase hex digest
    pub fn to_hex_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(path, digest)| (path.clone(), hex::encode(digest)))
            .collect()
    }

    /// Parse a path -> hex digest mapping. Hex case is not significant.
    ///
    /// Returns the offending path and reason on the first malformed digest.
    pub fn from_hex_map<I>(map: I) -> Result<Self, (String, String)>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut snapshot = Snapshot::new();
        for (path, hex_digest) in map {
            match parse_digest(&hex_digest) {
                Ok(digest) => {
                    snapshot.insert(path, digest);
                }
                Err(reason) => return Err((path, reason)),
            }
        }
        Ok(snapshot)
    }
}

impl FromIterator<(String, Digest)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, Digest)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Parse a 64-character hex digest (either case)
pub fn parse_digest(hex_digest: &str) -> Result<Digest, String> {
    let bytes = hex::decode(hex_digest.trim()).map_err(|e| format!("invalid hex: {}", e))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("expected 32-byte digest, got {} bytes", b.len()))
}
