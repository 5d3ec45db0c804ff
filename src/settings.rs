//! Settings of the `ommcfg` tool itself: logging and command defaults.
//!
//! Session configuration trees never go through here; see [`crate::source`].

use crate::config::RoleKind;
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge_policy;
mod sources;

pub use sources::global_file::global_settings_path;
pub use sources::workspace_file::WORKSPACE_SETTINGS_FILE;

/// Tool settings after every source has been layered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Role kind used when `--role` is not given: consumer, niprovider, iprovider
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Configuration file read when `--file` is not given
    #[serde(default)]
    pub config_file: Option<PathBuf>,
}

fn default_role() -> String {
    "consumer".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            default_role: default_role(),
            config_file: None,
        }
    }
}

impl ToolSettings {
    /// Layer defaults, the global settings file, `./ommcfg.toml` under
    /// `workspace_root` and `OMMCFG__*` environment variables, later wins.
    pub fn load(workspace_root: &Path) -> Result<ToolSettings, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(
            config::Environment::with_prefix("OMMCFG")
                .separator("__")
                .try_parsing(true),
        );
        let settings: ToolSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        debug!(default_role = %settings.default_role, "Loaded tool settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.role_kind().map(|_| ())
    }

    pub fn role_kind(&self) -> Result<RoleKind, ConfigError> {
        parse_role_kind(&self.default_role)
    }
}

/// Role kind from its command-line spelling.
pub fn parse_role_kind(raw: &str) -> Result<RoleKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "consumer" => Ok(RoleKind::Consumer),
        "niprovider" => Ok(RoleKind::NiProvider),
        "iprovider" => Ok(RoleKind::IProvider),
        _ => Err(ConfigError::Settings(format!(
            "Unknown role kind '{}' (must be consumer, niprovider or iprovider)",
            raw
        ))),
    }
}
