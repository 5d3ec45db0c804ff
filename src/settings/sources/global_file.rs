//! Global settings file: `<config dir>/ommcfg/settings.toml` as reported by
//! the platform, e.g. `$XDG_CONFIG_HOME/ommcfg/settings.toml` on Linux.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

pub fn global_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ommcfg").map(|dirs| dirs.config_dir().join("settings.toml"))
}

/// Add the global settings file to `builder` if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_settings_path() else {
        warn!("No home directory found; skipping global settings");
        return Ok(builder);
    };
    if !path.exists() {
        warn!(
            settings_path = %path.display(),
            "Global settings file not found; using defaults"
        );
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
