//! Scanning: per-file fingerprints and whole-tree snapshots.

pub mod hasher;
pub mod walker;

pub use hasher::{fingerprint_file, HashAlgorithm};
pub use walker::{SnapshotBuilder, WalkerConfig};
