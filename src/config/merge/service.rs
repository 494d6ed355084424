//! MergeService: orchestrates sources, applies merge policy, deserializes to MonitorConfig.

use crate::config::sources::{environment, files, legacy_env::LegacyEnvironment};
use crate::config::MonitorConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the standard sources.
    /// Precedence: defaults (lowest) -> global file -> local or explicit file ->
    /// legacy environment -> FIMON__ environment (highest).
    pub fn load(explicit_file: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
        Self::load_with_legacy(explicit_file, LegacyEnvironment::new())
    }

    /// As `load`, with the legacy environment source supplied by the caller.
    pub fn load_with_legacy(
        explicit_file: Option<&Path>,
        legacy: LegacyEnvironment,
    ) -> Result<MonitorConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = files::add_global(builder)?;
        let builder = files::add_local(builder, explicit_file)?;
        let builder = builder.add_source(legacy);
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
