//! Error types for configuration resolution.

use std::fmt;
use thiserror::Error;

/// Kinds of named entity that can be referenced from another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Consumer,
    NiProvider,
    IProvider,
    Channel,
    Server,
    Logger,
    Dictionary,
    Directory,
    Service,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Consumer => "Consumer",
            EntityKind::NiProvider => "NiProvider",
            EntityKind::IProvider => "IProvider",
            EntityKind::Channel => "Channel",
            EntityKind::Server => "Server",
            EntityKind::Logger => "Logger",
            EntityKind::Dictionary => "Dictionary",
            EntityKind::Directory => "Directory",
            EntityKind::Service => "Service",
        };
        f.write_str(name)
    }
}

/// Errors raised while reading, merging, validating or generating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source tree is not well-formed or has the wrong shape.
    #[error("Parse failure at {path}: {message}")]
    ParseFailure { path: String, message: String },

    /// An enum-like or range-checked value was not recognized.
    #[error("Invalid configuration value for {field}: '{value}'. {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("{kind} '{name}' referenced by {referenced_by} is not configured")]
    UnresolvedReference {
        kind: EntityKind,
        name: String,
        referenced_by: String,
    },

    #[error(
        "Service '{second}' in directory '{directory}' specifies the same ServiceId ({service_id}) as service '{first}'"
    )]
    DuplicateIdentity {
        directory: String,
        service_id: u16,
        first: String,
        second: String,
    },

    #[error("Directory '{directory}' ran out of assignable service ids for service '{service}'")]
    ServiceIdsExhausted { directory: String, service: String },

    /// A method-level override was applied to a role that cannot use it.
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure loading the tool's own settings.
    #[error("Settings error: {0}")]
    Settings(String),
}

impl ConfigError {
    pub(crate) fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ParseFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn unresolved(
        kind: EntityKind,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Self {
        ConfigError::UnresolvedReference {
            kind,
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Settings(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_message_names_kind_and_referrer() {
        let err = ConfigError::unresolved(EntityKind::Channel, "bad", "Consumer 'Consumer_1'");
        assert_eq!(
            err.to_string(),
            "Channel 'bad' referenced by Consumer 'Consumer_1' is not configured"
        );
    }

    #[test]
    fn test_duplicate_identity_message() {
        let err = ConfigError::DuplicateIdentity {
            directory: "Directory_1".to_string(),
            service_id: 10,
            first: "S1".to_string(),
            second: "S2".to_string(),
        };
        assert!(err.to_string().contains("specifies the same ServiceId (10)"));
    }
}
