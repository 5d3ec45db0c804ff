//! CLI parse: clap types for ommcfg. No behavior; definitions only.

use crate::config::RoleKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ommcfg - resolve layered OMM session configuration
#[derive(Parser, Debug)]
#[command(name = "ommcfg", version)]
#[command(about = "Resolve, validate and inspect layered OMM session configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding ommcfg.toml tool settings
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file (TOML or JSON), applied first
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Programmatic configuration trees, applied in order after the file
    #[arg(long = "overlay", global = true)]
    pub overlays: Vec<PathBuf>,

    /// Role kind to resolve (default from settings, else consumer)
    #[arg(long, global = true, value_enum)]
    pub role: Option<RoleArg>,

    /// Role name instead of the configured default
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// host:port override for channel roles
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Listening port override for interactive providers
    #[arg(long, global = true)]
    pub port: Option<String>,

    /// Login user name
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Login password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Login application id
    #[arg(long = "app-id", global = true)]
    pub app_id: Option<String>,

    /// Login position (address/host)
    #[arg(long, global = true)]
    pub position: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log the way the resolved role's Logger entity asks; other log flags still win
    #[arg(long, global = true)]
    pub log_from_config: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Check role selection and every cross reference of the selected role
    Verify,
    /// Show the resolved snapshot
    Show,
    /// Show the connection list
    Connections,
    /// Show the login request
    Login,
    /// Show the source directory refresh of a provider role
    Directory,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Consumer,
    #[value(name = "niprovider")]
    NiProvider,
    #[value(name = "iprovider")]
    IProvider,
}

impl From<RoleArg> for RoleKind {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Consumer => RoleKind::Consumer,
            RoleArg::NiProvider => RoleKind::NiProvider,
            RoleArg::IProvider => RoleKind::IProvider,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
