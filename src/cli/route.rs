//! CLI route: single route table and run context.

use crate::cli::parse::{Cli, Commands, OutputFormat};
use crate::cli::presentation;
use crate::config::{MethodOverride, RoleKind};
use crate::logging::LoggingConfig;
use crate::resolve::{resolve, ConfigLayers, Snapshot};
use crate::settings::ToolSettings;
use crate::source::load_tree;
use crate::validate::verify_configuration;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Everything a command needs: the three configuration layers, the role kind
/// and the output format.
pub struct RunContext {
    layers: ConfigLayers,
    kind: RoleKind,
    format: OutputFormat,
}

impl RunContext {
    /// Read the file and overlay trees named on the command line and turn the
    /// remaining flags into method overrides.
    pub fn new(cli: &Cli, settings: &ToolSettings) -> Result<Self> {
        let kind = match cli.role {
            Some(role) => role.into(),
            None => settings.role_kind()?,
        };

        let mut layers = ConfigLayers::new();
        let file = cli.file.as_deref().or(settings.config_file.as_deref());
        if let Some(path) = file {
            layers.set_file(path.display().to_string(), read_tree(path)?);
        }
        for path in &cli.overlays {
            layers.add_programmatic(read_tree(path)?);
        }
        for record in method_overrides(cli) {
            layers.add_override(record);
        }
        debug!(kind = %kind, overlays = cli.overlays.len(), "Run context ready");

        Ok(RunContext {
            layers,
            kind,
            format: cli.format,
        })
    }

    pub fn layers(&self) -> &ConfigLayers {
        &self.layers
    }

    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Tool logging taken from the Logger entity the selected role resolves to.
    pub fn configured_logging(&self) -> Result<LoggingConfig> {
        let snapshot = self.snapshot()?;
        Ok(LoggingConfig::from(&snapshot.logger))
    }

    pub fn execute(&self, command: &Commands) -> Result<String> {
        info!(command = ?command, kind = %self.kind, "Executing command");
        match command {
            Commands::Verify => {
                let set = self.layers.merged()?;
                let selection =
                    verify_configuration(&set, self.kind, self.layers.method().role_name())?;
                match self.format {
                    OutputFormat::Json => to_json(&selection),
                    OutputFormat::Text => Ok(presentation::format_verify_text(&selection)),
                }
            }
            Commands::Show => {
                let snapshot = self.snapshot()?;
                match self.format {
                    OutputFormat::Json => to_json(&snapshot),
                    OutputFormat::Text => Ok(presentation::format_snapshot_text(&snapshot)),
                }
            }
            Commands::Connections => {
                let list = self.snapshot()?.connection_list();
                match self.format {
                    OutputFormat::Json => to_json(&list),
                    OutputFormat::Text => Ok(presentation::format_connections_text(&list)),
                }
            }
            Commands::Login => {
                let request = self.snapshot()?.login_request();
                match self.format {
                    OutputFormat::Json => to_json(&request),
                    OutputFormat::Text => Ok(presentation::format_login_text(&request)),
                }
            }
            Commands::Directory => {
                let refresh = self.snapshot()?.directory_refresh()?;
                match self.format {
                    OutputFormat::Json => to_json(&refresh),
                    OutputFormat::Text => Ok(presentation::format_directory_text(refresh.as_ref())),
                }
            }
        }
    }

    fn snapshot(&self) -> Result<Snapshot> {
        resolve(self.kind, &self.layers)
            .with_context(|| format!("resolving {} configuration", self.kind))
    }
}

fn read_tree(path: &Path) -> Result<serde_json::Value> {
    load_tree(path).with_context(|| format!("reading configuration {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Flags that map onto method-level override records, in a fixed order.
fn method_overrides(cli: &Cli) -> Vec<MethodOverride> {
    let mut records = Vec::new();
    if let Some(name) = &cli.name {
        records.push(MethodOverride::RoleName(name.clone()));
    }
    if let Some(host) = &cli.host {
        records.push(MethodOverride::Host(host.clone()));
    }
    if let Some(port) = &cli.port {
        records.push(MethodOverride::Port(port.clone()));
    }
    if let Some(user) = &cli.user {
        records.push(MethodOverride::UserName(user.clone()));
    }
    if let Some(password) = &cli.password {
        records.push(MethodOverride::Password(password.clone()));
    }
    if let Some(app_id) = &cli.app_id {
        records.push(MethodOverride::ApplicationId(app_id.clone()));
    }
    if let Some(position) = &cli.position {
        records.push(MethodOverride::Position(position.clone()));
    }
    records
}
