//! Core types for the file-integrity monitor.

/// Digest: 256-bit content fingerprint of a single file
pub type Digest = [u8; 32];

/// Size of the read buffer fed to the digest accumulator
pub const CHUNK_SIZE: usize = 8192;
