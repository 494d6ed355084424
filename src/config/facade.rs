//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::{ConfigOverrides, MonitorConfig};
use crate::error::MonitorError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(explicit_file: Option<&Path>) -> Result<MonitorConfig, MonitorError> {
        Ok(MergeService::load(explicit_file)?)
    }

    /// Load, apply command-line overrides, and validate.
    pub fn load_with_overrides(
        explicit_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<MonitorConfig, MonitorError> {
        let mut config = Self::load(explicit_file)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> MonitorConfig {
        MonitorConfig::default()
    }
}
