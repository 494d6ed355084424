//! Builder seeded with the built-in defaults.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Start a builder with defaults for the keys every deployment relies on.
/// Remaining fields fall back to their serde defaults.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("monitor.root", "watched_folder")?
        .set_default("monitor.interval_secs", 10)?
        .set_default("storage.baseline_file", "baseline.json")?
        .set_default("storage.event_log_file", "fim_events.log")?
        .set_default("notify.timeout_secs", 20)
}
