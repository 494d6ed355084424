//! Environment variable source: FIMON_ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Build the `FIMON__SECTION__KEY` source.
/// `FIMON__MONITOR__IGNORE_PATTERNS` is parsed as a comma separated list.
pub fn source() -> Environment {
    Environment::with_prefix("FIMON")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("monitor.ignore_patterns")
}

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source()))
}
