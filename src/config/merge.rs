//! Source composition for `MonitorConfig`.

pub(crate) mod merge_policy;
pub mod service;
