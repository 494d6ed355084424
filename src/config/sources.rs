//! Configuration sources, lowest to highest precedence: global file, local file,
//! legacy environment names, `FIMON__` environment.

pub mod environment;
pub mod files;
pub mod legacy_env;
