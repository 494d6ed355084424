//! File sources: the optional global file and a local or explicit file.

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Local configuration file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "fimon.toml";

/// Add `$XDG_CONFIG_HOME/fimon/config.toml` if it exists.
pub fn add_global(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg::global_config_path() {
        Some(path) => Ok(builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )),
        None => Ok(builder),
    }
}

/// Add an explicitly requested file (must exist), or `./fimon.toml` if present.
pub fn add_local(
    builder: ConfigBuilder<DefaultState>,
    explicit: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Ok(builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(true),
            ))
        }
        None => Ok(builder.add_source(
            File::from(Path::new(LOCAL_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        )),
    }
}
