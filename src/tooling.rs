//! Tooling
//!
//! Command-line surface over the monitor. Every command is a thin wrapper around
//! `MonitorDaemon` operations.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
