//! Layered merge: overlays fold onto empty entity maps in order, then the
//! method layer applies to the one selected role.

use super::defaults;
use super::entity::EntityMap;
use super::method::MethodLayer;
use super::model::{
    ChannelConfig, DictionaryConfig, DirectoryConfig, LoggerConfig, RoleConfig, RoleKind,
    ServerConfig,
};
use super::tree::{DefaultNames, Overlay};
use crate::error::ConfigError;
use serde::Serialize;
use tracing::{debug, info};

/// Every merged entity map plus the configured default names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigSet {
    pub consumers: EntityMap<RoleConfig>,
    pub niproviders: EntityMap<RoleConfig>,
    pub iproviders: EntityMap<RoleConfig>,
    pub channels: EntityMap<ChannelConfig>,
    pub servers: EntityMap<ServerConfig>,
    pub loggers: EntityMap<LoggerConfig>,
    pub dictionaries: EntityMap<DictionaryConfig>,
    pub directories: EntityMap<DirectoryConfig>,
    #[serde(skip)]
    pub defaults: DefaultNames,
}

impl ConfigSet {
    pub fn roles(&self, kind: RoleKind) -> &EntityMap<RoleConfig> {
        match kind {
            RoleKind::Consumer => &self.consumers,
            RoleKind::NiProvider => &self.niproviders,
            RoleKind::IProvider => &self.iproviders,
        }
    }

    fn roles_mut(&mut self, kind: RoleKind) -> &mut EntityMap<RoleConfig> {
        match kind {
            RoleKind::Consumer => &mut self.consumers,
            RoleKind::NiProvider => &mut self.niproviders,
            RoleKind::IProvider => &mut self.iproviders,
        }
    }

    /// Apply one overlay. New names start from their template; existing
    /// names only take the fields the overlay sets.
    pub fn apply_overlay(&mut self, overlay: &Overlay) {
        debug!(source = %overlay.source, "Applying configuration overlay");
        self.defaults.apply(&overlay.defaults);

        for patch in &overlay.roles {
            let kind = patch.kind;
            let role = self
                .roles_mut(kind)
                .get_or_insert_with(&patch.name, || defaults::role(kind, &patch.name));
            patch.apply(role);
        }
        for patch in &overlay.channels {
            let channel = self
                .channels
                .get_or_insert_with(&patch.name, || defaults::channel(&patch.name));
            patch.apply(channel);
        }
        for patch in &overlay.servers {
            let server = self
                .servers
                .get_or_insert_with(&patch.name, || defaults::server(&patch.name));
            patch.apply(server);
        }
        for patch in &overlay.loggers {
            let logger = self
                .loggers
                .get_or_insert_with(&patch.name, || defaults::logger(&patch.name));
            patch.apply(logger);
        }
        for patch in &overlay.dictionaries {
            let dictionary = self
                .dictionaries
                .get_or_insert_with(&patch.name, || defaults::dictionary(&patch.name));
            patch.apply(dictionary);
        }
        for patch in &overlay.directories {
            let directory = self
                .directories
                .get_or_insert_with(&patch.name, || DirectoryConfig::new(patch.name.clone()));
            patch.apply(directory);
        }
    }

    /// Fill in service ids left unset by every layer.
    pub fn assign_service_ids(&mut self) -> Result<(), ConfigError> {
        for directory in self.directories.iter_mut() {
            for (service, id) in directory.assign_missing_service_ids()? {
                debug!(directory = %directory.name, service = %service, service_id = id, "Assigned service id");
            }
        }
        Ok(())
    }
}

/// Fold overlays in order into fresh entity maps.
pub fn merge_overlays<'a>(
    overlays: impl IntoIterator<Item = &'a Overlay>,
) -> Result<ConfigSet, ConfigError> {
    let mut set = ConfigSet::default();
    let mut layers = 0usize;
    for overlay in overlays {
        set.apply_overlay(overlay);
        layers += 1;
    }
    set.assign_service_ids()?;
    info!(
        layers,
        consumers = set.consumers.len(),
        niproviders = set.niproviders.len(),
        iproviders = set.iproviders.len(),
        channels = set.channels.len(),
        directories = set.directories.len(),
        "Merged configuration layers"
    );
    Ok(set)
}

/// Which role a run uses and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSelection {
    pub kind: RoleKind,
    pub name: String,
    /// No role of this kind is configured; a template role is used.
    pub synthesized: bool,
}

/// The selected role with the method layer applied on top.
pub fn apply_method_layer(
    set: &ConfigSet,
    selection: &RoleSelection,
    method: &MethodLayer,
) -> Result<RoleConfig, ConfigError> {
    let mut role = if selection.synthesized {
        defaults::role(selection.kind, &selection.name)
    } else {
        set.roles(selection.kind)
            .get(&selection.name)
            .cloned()
            .ok_or_else(|| {
                ConfigError::unresolved(
                    selection.kind.entity_kind(),
                    &selection.name,
                    "role selection",
                )
            })?
    };
    role.method = method.settings(selection.kind)?;
    if !method.is_empty() {
        debug!(role = %role.describe(), records = method.records().len(), "Applied method overrides");
    }
    Ok(role)
}
