//! Content fingerprinting for individual files
//!
//! Files are streamed through the digest accumulator in fixed-size chunks so memory
//! use does not depend on file size.

use crate::types::{Digest, CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Digest function used for fingerprints. Both produce 256-bit values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

/// Source of per-file fingerprints used by the snapshot builder.
///
/// `Ok(None)` means the file is expectedly absent (vanished, or not a file);
/// `Err` is a read failure. Either way the path is left out of the snapshot.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, path: &Path) -> io::Result<Option<Digest>>;
}

impl Fingerprinter for HashAlgorithm {
    fn fingerprint(&self, path: &Path) -> io::Result<Option<Digest>> {
        fingerprint_file(path, *self)
    }
}

enum Accumulator {
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Accumulator::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Blake3 => Accumulator::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Accumulator::Sha256(h) => h.update(chunk),
            Accumulator::Blake3(h) => {
                h.update(chunk);
            }
        }
    }

    fn finalize(self) -> Digest {
        match self {
            Accumulator::Sha256(h) => h.finalize().into(),
            Accumulator::Blake3(h) => *h.finalize().as_bytes(),
        }
    }
}

/// Stream a reader through the digest accumulator in `CHUNK_SIZE` chunks
pub fn fingerprint_reader<R: Read>(mut reader: R, algorithm: HashAlgorithm) -> io::Result<Digest> {
    let mut acc = Accumulator::new(algorithm);
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => acc.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(acc.finalize())
}

/// Fingerprint a file's contents.
///
/// Returns `Ok(None)` when the path no longer exists or names a directory.
/// Any other I/O failure (permission denied, device error) is returned as `Err`.
/// No retries are attempted.
pub fn fingerprint_file(path: &Path, algorithm: HashAlgorithm) -> io::Result<Option<Digest>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    match file.metadata() {
        Ok(meta) if meta.is_dir() => return Ok(None),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    }
    match fingerprint_reader(file, algorithm) {
        Ok(digest) => Ok(Some(digest)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
