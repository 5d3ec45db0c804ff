//! ommcfg: Layered Configuration Resolution for OMM Sessions
//!
//! Merges a configuration file, programmatic trees and method-level overrides
//! into one validated snapshot per consumer or provider role, and generates the
//! connection list, login request and source directory artifacts a session
//! starts from.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod generate;
pub mod logging;
pub mod protocol;
pub mod resolve;
pub mod settings;
pub mod source;
pub mod validate;

pub use config::{MethodOverride, RoleKind};
pub use directory::DirectoryCache;
pub use error::{ConfigError, EntityKind};
pub use resolve::{resolve, ConfigLayers, Snapshot};
pub use validate::verify_configuration;
