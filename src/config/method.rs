//! Method-level overrides: an ordered list of override records applied to
//! the selected role after every tree layer has been merged.

use super::defaults::DEFAULT_HOST;
use super::model::RoleKind;
use super::vocabulary::{AdminControl, OperationModel};
use crate::error::ConfigError;
use crate::protocol::{FilterFlags, ProxyOptions, Service, State, TlsOptions};
use serde::Serialize;

/// Login fields supplied verbatim by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminLoginRequest {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub position: Option<String>,
    pub application_id: Option<String>,
    pub application_name: Option<String>,
    pub single_open: Option<bool>,
    pub allow_suspect_data: Option<bool>,
    pub provide_permission_profile: Option<bool>,
}

/// Directory refresh fields supplied verbatim by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminDirectoryRefresh {
    pub filter: Option<FilterFlags>,
    pub clear_cache: Option<bool>,
    pub state: Option<State>,
    pub services: Option<Vec<Service>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodOverride {
    /// Select a role by name instead of the configured default.
    RoleName(String),
    /// `host:port` for channel based roles.
    Host(String),
    /// Listening port for interactive providers.
    Port(String),
    UserName(String),
    Password(String),
    Position(String),
    ApplicationId(String),
    ApplicationName(String),
    ProxyHost(String),
    ProxyPort(String),
    ProxyUserName(String),
    ProxyPassword(String),
    ProxyDomain(String),
    ServerCert(String),
    ServerPrivateKey(String),
    CipherSuite(String),
    OperationModel(OperationModel),
    AdminControlDirectory(AdminControl),
    AdminLoginRequest(AdminLoginRequest),
    AdminDirectoryRefresh(AdminDirectoryRefresh),
}

impl MethodOverride {
    fn label(&self) -> &'static str {
        match self {
            MethodOverride::RoleName(_) => "RoleName",
            MethodOverride::Host(_) => "Host",
            MethodOverride::Port(_) => "Port",
            MethodOverride::UserName(_) => "UserName",
            MethodOverride::Password(_) => "Password",
            MethodOverride::Position(_) => "Position",
            MethodOverride::ApplicationId(_) => "ApplicationId",
            MethodOverride::ApplicationName(_) => "ApplicationName",
            MethodOverride::ProxyHost(_) => "ProxyHost",
            MethodOverride::ProxyPort(_) => "ProxyPort",
            MethodOverride::ProxyUserName(_) => "ProxyUserName",
            MethodOverride::ProxyPassword(_) => "ProxyPassword",
            MethodOverride::ProxyDomain(_) => "ProxyDomain",
            MethodOverride::ServerCert(_) => "ServerCert",
            MethodOverride::ServerPrivateKey(_) => "ServerPrivateKey",
            MethodOverride::CipherSuite(_) => "CipherSuite",
            MethodOverride::OperationModel(_) => "OperationModel",
            MethodOverride::AdminControlDirectory(_) => "AdminControlDirectory",
            MethodOverride::AdminLoginRequest(_) => "AdminLoginRequest",
            MethodOverride::AdminDirectoryRefresh(_) => "AdminDirectoryRefresh",
        }
    }

    /// Whether a role of `kind` can take this override.
    fn applies_to(&self, kind: RoleKind) -> bool {
        match self {
            MethodOverride::Host(_)
            | MethodOverride::ProxyHost(_)
            | MethodOverride::ProxyPort(_)
            | MethodOverride::ProxyUserName(_)
            | MethodOverride::ProxyPassword(_)
            | MethodOverride::ProxyDomain(_) => !kind.uses_server(),
            MethodOverride::Port(_)
            | MethodOverride::ServerCert(_)
            | MethodOverride::ServerPrivateKey(_)
            | MethodOverride::CipherSuite(_) => kind.uses_server(),
            MethodOverride::AdminControlDirectory(_) | MethodOverride::AdminDirectoryRefresh(_) => {
                kind.is_provider()
            }
            _ => true,
        }
    }
}

/// Host and port split from a `host:port` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPort {
    pub host: String,
    pub port: String,
}

impl HostPort {
    /// `""` gives the defaults, `h` or `h:` keeps the default port, `:p`
    /// keeps the default host.
    pub fn parse(raw: &str, default_port: &str) -> HostPort {
        let raw = raw.trim();
        let (host, port) = match raw.find(':') {
            Some(index) => (&raw[..index], &raw[index + 1..]),
            None => (raw, ""),
        };
        HostPort {
            host: if host.is_empty() { DEFAULT_HOST } else { host }.to_string(),
            port: if port.is_empty() { default_port } else { port }.to_string(),
        }
    }
}

/// The method layer folded into per-field values; later records win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodSettings {
    pub host: Option<HostPort>,
    pub server_port: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub position: Option<String>,
    pub application_id: Option<String>,
    pub application_name: Option<String>,
    pub proxy: ProxyOptions,
    pub tls: TlsOptions,
    pub operation_model: Option<OperationModel>,
    pub admin_control_directory: Option<AdminControl>,
    pub admin_login: Option<AdminLoginRequest>,
    pub admin_directory: Option<AdminDirectoryRefresh>,
}

impl MethodSettings {
    pub fn admin_control(&self) -> AdminControl {
        self.admin_control_directory.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodLayer {
    records: Vec<MethodOverride>,
}

impl MethodLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MethodOverride) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MethodOverride] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last explicitly requested role name.
    pub fn role_name(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|record| match record {
            MethodOverride::RoleName(name) if !name.trim().is_empty() => Some(name.as_str()),
            _ => None,
        })
    }

    /// Fold the records for a role of `kind`.
    pub fn settings(&self, kind: RoleKind) -> Result<MethodSettings, ConfigError> {
        let mut settings = MethodSettings::default();
        for record in &self.records {
            if !record.applies_to(kind) {
                return Err(ConfigError::InvalidUsage(format!(
                    "{} cannot be applied to a {} role",
                    record.label(),
                    kind
                )));
            }
            match record {
                MethodOverride::RoleName(_) => {}
                MethodOverride::Host(raw) => {
                    settings.host = Some(HostPort::parse(raw, kind.default_port()))
                }
                MethodOverride::Port(port) => settings.server_port = Some(port.clone()),
                MethodOverride::UserName(value) => settings.user_name = Some(value.clone()),
                MethodOverride::Password(value) => settings.password = Some(value.clone()),
                MethodOverride::Position(value) => settings.position = Some(value.clone()),
                MethodOverride::ApplicationId(value) => {
                    settings.application_id = Some(value.clone())
                }
                MethodOverride::ApplicationName(value) => {
                    settings.application_name = Some(value.clone())
                }
                MethodOverride::ProxyHost(value) => settings.proxy.host = Some(value.clone()),
                MethodOverride::ProxyPort(value) => settings.proxy.port = Some(value.clone()),
                MethodOverride::ProxyUserName(value) => {
                    settings.proxy.user_name = Some(value.clone())
                }
                MethodOverride::ProxyPassword(value) => {
                    settings.proxy.password = Some(value.clone())
                }
                MethodOverride::ProxyDomain(value) => settings.proxy.domain = Some(value.clone()),
                MethodOverride::ServerCert(value) => settings.tls.server_cert = Some(value.clone()),
                MethodOverride::ServerPrivateKey(value) => {
                    settings.tls.server_private_key = Some(value.clone())
                }
                MethodOverride::CipherSuite(value) => {
                    settings.tls.cipher_suite = Some(value.clone())
                }
                MethodOverride::OperationModel(model) => settings.operation_model = Some(*model),
                MethodOverride::AdminControlDirectory(control) => {
                    settings.admin_control_directory = Some(*control)
                }
                MethodOverride::AdminLoginRequest(login) => {
                    settings.admin_login = Some(login.clone())
                }
                MethodOverride::AdminDirectoryRefresh(refresh) => {
                    settings.admin_directory = Some(refresh.clone())
                }
            }
        }
        Ok(settings)
    }
}

impl FromIterator<MethodOverride> for MethodLayer {
    fn from_iter<I: IntoIterator<Item = MethodOverride>>(iter: I) -> Self {
        MethodLayer {
            records: iter.into_iter().collect(),
        }
    }
}
