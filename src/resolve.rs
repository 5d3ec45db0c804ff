//! `resolve`: three configuration layers in, one immutable snapshot out.

use crate::config::defaults::{
    self, DEFAULT_CHANNEL_NAME, DEFAULT_DICTIONARY_NAME, DEFAULT_LOGGER_NAME, DEFAULT_SERVER_NAME,
};
use crate::config::{
    apply_method_layer, merge_overlays, ChannelConfig, ConfigSet, DictionaryConfig,
    DirectoryConfig, EntityMap, LoggerConfig, MethodLayer, MethodOverride, Overlay, RoleConfig,
    RoleKind, RoleSelection, ServerConfig,
};
use crate::error::{ConfigError, EntityKind};
use crate::validate::{self, DirectoryChoice};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// The three inputs of a resolution run.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayers {
    file: Option<(String, Value)>,
    programmatic: Vec<Value>,
    method: MethodLayer,
}

impl ConfigLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree read from the configuration file; always applied first.
    pub fn set_file(&mut self, label: impl Into<String>, tree: Value) {
        self.file = Some((label.into(), tree));
    }

    /// Programmatic trees apply in the order they are added.
    pub fn add_programmatic(&mut self, tree: Value) {
        self.programmatic.push(tree);
    }

    pub fn add_override(&mut self, record: MethodOverride) {
        self.method.push(record);
    }

    pub fn method(&self) -> &MethodLayer {
        &self.method
    }

    /// Parse every tree layer, file first.
    pub fn overlays(&self) -> Result<Vec<Overlay>, ConfigError> {
        let mut overlays = Vec::with_capacity(self.programmatic.len() + 1);
        if let Some((label, tree)) = &self.file {
            overlays.push(Overlay::from_tree(label.clone(), tree)?);
        }
        for (position, tree) in self.programmatic.iter().enumerate() {
            overlays.push(Overlay::from_tree(
                format!("programmatic #{}", position + 1),
                tree,
            )?);
        }
        Ok(overlays)
    }

    /// Merge the tree layers without selecting a role.
    pub fn merged(&self) -> Result<ConfigSet, ConfigError> {
        merge_overlays(&self.overlays()?)
    }
}

/// Validated configuration restricted to what the selected role reaches.
///
/// Every reference in `role` names an entity held here; defaults fill the
/// references the configuration left empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub selection: RoleSelection,
    pub role: RoleConfig,
    /// In channel-set order. Empty for interactive providers.
    pub channels: EntityMap<ChannelConfig>,
    pub server: Option<ServerConfig>,
    pub logger: LoggerConfig,
    /// The consumer's dictionary.
    pub dictionary: Option<DictionaryConfig>,
    /// The provider's directory.
    pub directory: Option<DirectoryConfig>,
    /// Every dictionary reachable from the role or its services.
    pub dictionaries: EntityMap<DictionaryConfig>,
}

/// Resolve the configuration for one role of `kind`.
pub fn resolve(kind: RoleKind, layers: &ConfigLayers) -> Result<Snapshot, ConfigError> {
    let set = layers.merged()?;
    let selection = validate::select_role(&set, kind, layers.method().role_name())?;
    let role = apply_method_layer(&set, &selection, layers.method())?;
    validate::verify_role(&set, &role)?;
    let snapshot = Snapshot::materialize(&set, selection, role)?;
    info!(
        role = %snapshot.role.describe(),
        synthesized = snapshot.selection.synthesized,
        "Resolved configuration snapshot"
    );
    Ok(snapshot)
}

impl Snapshot {
    /// Copy the entities `role` reaches out of `set`, synthesizing defaults
    /// for references left empty.
    pub fn materialize(
        set: &ConfigSet,
        selection: RoleSelection,
        mut role: RoleConfig,
    ) -> Result<Snapshot, ConfigError> {
        let mut channels = EntityMap::new();
        let mut server = None;
        if role.kind.uses_server() {
            let name = role
                .server
                .get_or_insert_with(|| DEFAULT_SERVER_NAME.to_string())
                .clone();
            server = Some(match set.servers.get(&name) {
                Some(configured) => configured.clone(),
                None if name == DEFAULT_SERVER_NAME => defaults::server(&name),
                None => return Err(ConfigError::unresolved(EntityKind::Server, name, role.describe())),
            });
        } else {
            if role.channel_set.is_empty() {
                role.channel_set.push(DEFAULT_CHANNEL_NAME.to_string());
            }
            for name in &role.channel_set {
                let channel = match set.channels.get(name) {
                    Some(configured) => configured.clone(),
                    None if name == DEFAULT_CHANNEL_NAME => defaults::channel(name),
                    None => {
                        return Err(ConfigError::unresolved(
                            EntityKind::Channel,
                            name,
                            role.describe(),
                        ))
                    }
                };
                channels.insert(channel);
            }
        }

        let logger_name = role
            .logger
            .get_or_insert_with(|| DEFAULT_LOGGER_NAME.to_string())
            .clone();
        let logger = match set.loggers.get(&logger_name) {
            Some(configured) => configured.clone(),
            None if logger_name == DEFAULT_LOGGER_NAME => defaults::logger(&logger_name),
            None => {
                return Err(ConfigError::unresolved(
                    EntityKind::Logger,
                    logger_name,
                    role.describe(),
                ))
            }
        };

        let mut dictionaries = EntityMap::new();
        let mut dictionary = None;
        let mut directory = None;
        if role.kind == RoleKind::Consumer {
            let name = role
                .dictionary
                .get_or_insert_with(|| DEFAULT_DICTIONARY_NAME.to_string())
                .clone();
            let resolved = lookup_dictionary(set, &name, &role.describe())?;
            dictionaries.insert(resolved.clone());
            dictionary = Some(resolved);
        } else {
            let mut resolved = match validate::resolve_directory(set, &role)? {
                DirectoryChoice::Configured(name) => set
                    .directories
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| {
                        ConfigError::unresolved(EntityKind::Directory, name, role.describe())
                    })?,
                DirectoryChoice::Synthesized => defaults::default_directory(role.kind),
            };
            if resolved.services.is_empty() {
                warn!(
                    role = %role.describe(),
                    directory = %resolved.name,
                    "Directory contains no services; using the default service"
                );
                resolved.services.insert(defaults::default_service(role.kind));
            }
            for service in &resolved.services {
                let referrer = format!("Service '{}' in Directory '{}'", service.name, resolved.name);
                for name in service
                    .dictionaries_used
                    .iter()
                    .chain(&service.dictionaries_provided)
                {
                    if !dictionaries.contains(name) {
                        dictionaries.insert(lookup_dictionary(set, name, &referrer)?);
                    }
                }
            }
            role.directory = Some(resolved.name.clone());
            directory = Some(resolved);
        }

        debug!(
            role = %role.describe(),
            channels = channels.len(),
            dictionaries = dictionaries.len(),
            "Materialized snapshot"
        );
        Ok(Snapshot {
            selection,
            role,
            channels,
            server,
            logger,
            dictionary,
            directory,
            dictionaries,
        })
    }

    pub fn kind(&self) -> RoleKind {
        self.role.kind
    }
}

fn lookup_dictionary(
    set: &ConfigSet,
    name: &str,
    referrer: &str,
) -> Result<DictionaryConfig, ConfigError> {
    match set.dictionaries.get(name) {
        Some(configured) => Ok(configured.clone()),
        None if name == DEFAULT_DICTIONARY_NAME => Ok(defaults::dictionary(name)),
        None => Err(ConfigError::unresolved(EntityKind::Dictionary, name, referrer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_drops_unreferenced_entities() {
        let mut layers = ConfigLayers::new();
        layers.add_programmatic(json!({
            "ConsumerGroup": { "ConsumerList": { "Consumer_1": { "ChannelSet": "B, A" } } },
            "ChannelGroup": { "ChannelList": {
                "A": { "Host": "a" }, "B": { "Host": "b" }, "Unused": {}
            } },
            "LoggerGroup": { "LoggerList": { "Unused": {} } }
        }));

        let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
        assert_eq!(snapshot.channels.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(snapshot.logger.name, DEFAULT_LOGGER_NAME);
        assert_eq!(snapshot.role.logger.as_deref(), Some(DEFAULT_LOGGER_NAME));
        assert_eq!(snapshot.dictionaries.len(), 1);
        assert!(snapshot.directory.is_none());
    }

    #[test]
    fn test_empty_directory_gets_default_service() {
        let mut layers = ConfigLayers::new();
        layers.add_programmatic(json!({
            "NiProviderGroup": { "NiProviderList": { "P": {} } },
            "DirectoryGroup": { "DefaultDirectory": "D", "DirectoryList": { "D": {} } }
        }));

        let snapshot = resolve(RoleKind::NiProvider, &layers).unwrap();
        let directory = snapshot.directory.as_ref().unwrap();
        assert_eq!(directory.name, "D");
        assert_eq!(directory.services.len(), 1);
        let service = directory.services.first().unwrap();
        assert_eq!(service.name, defaults::default_service(RoleKind::NiProvider).name);
        assert!(service.info.is_some());
        assert!(snapshot.dictionaries.contains(DEFAULT_DICTIONARY_NAME));
    }

    #[test]
    fn test_file_layer_applies_before_programmatic() {
        let mut layers = ConfigLayers::new();
        layers.add_programmatic(json!({
            "ChannelGroup": { "ChannelList": { "C": { "Host": "programmatic" } } }
        }));
        layers.set_file(
            "EmaConfig.toml",
            json!({ "ChannelGroup": { "ChannelList": { "C": { "Host": "file", "Port": "1" } } } }),
        );
        let set = layers.merged().unwrap();
        let channel = set.channels.get("C").unwrap();
        assert_eq!(channel.host.as_deref(), Some("programmatic"));
        assert_eq!(channel.port.as_deref(), Some("1"));
    }
}
