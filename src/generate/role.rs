use crate::config::{
    AdminControl, DictionaryConfig, OperationModel, ProviderPolicy, RoleKind, RoleTuning, XmlTrace,
};
use crate::directory::{service_dictionaries, ServiceDictionaryConfig};
use crate::error::ConfigError;
use crate::protocol::ReconnectPolicy;
use crate::resolve::Snapshot;
use serde::Serialize;

/// Role-level session options handed to the runtime alongside the
/// connection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOptions {
    pub kind: RoleKind,
    pub name: String,
    pub operation_model: OperationModel,
    pub tuning: RoleTuning,
    pub reconnect: ReconnectPolicy,
    pub xml_trace: XmlTrace,
    pub provider: Option<ProviderPolicy>,
    pub admin_control_directory: Option<AdminControl>,
    /// Dictionary a consumer downloads or loads.
    pub dictionary: Option<DictionaryConfig>,
    /// Dictionaries an interactive provider answers requests for.
    pub service_dictionaries: Vec<ServiceDictionaryConfig>,
}

pub fn role_options(snapshot: &Snapshot) -> Result<RoleOptions, ConfigError> {
    let role = &snapshot.role;
    let service_dictionaries = match (&snapshot.directory, role.kind) {
        (Some(directory), RoleKind::IProvider) => {
            service_dictionaries(directory, &snapshot.dictionaries)?
        }
        _ => Vec::new(),
    };
    Ok(RoleOptions {
        kind: role.kind,
        name: role.name.clone(),
        operation_model: role.method.operation_model.unwrap_or_default(),
        tuning: role.tuning.clone(),
        reconnect: role.reconnect,
        xml_trace: role.xml_trace.clone(),
        provider: role.kind.is_provider().then(|| role.provider.clone()),
        admin_control_directory: role
            .kind
            .is_provider()
            .then(|| role.method.admin_control()),
        dictionary: snapshot.dictionary.clone(),
        service_dictionaries,
    })
}
