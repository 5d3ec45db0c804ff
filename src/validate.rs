//! Cross-reference validation of merged configuration.
//!
//! Checks run in a fixed order and stop at the first failure, so fixing one
//! error and re-running surfaces the next one.

use crate::config::defaults;
use crate::config::{ConfigSet, DirectoryConfig, RoleConfig, RoleKind, RoleSelection};
use crate::error::{ConfigError, EntityKind};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Pick the role for `kind`: the requested name, else the group's default,
/// else the first configured role, else a synthesized one.
pub fn select_role(
    set: &ConfigSet,
    kind: RoleKind,
    requested: Option<&str>,
) -> Result<RoleSelection, ConfigError> {
    let roles = set.roles(kind);
    let configured = |name: &str| RoleSelection {
        kind,
        name: name.to_string(),
        synthesized: false,
    };

    if let Some(name) = requested {
        return if roles.contains(name) {
            Ok(configured(name))
        } else {
            Err(ConfigError::unresolved(
                kind.entity_kind(),
                name,
                "the requested role name",
            ))
        };
    }

    if let Some(name) = set.defaults.role(kind) {
        return if roles.contains(name) {
            Ok(configured(name))
        } else {
            Err(ConfigError::unresolved(
                kind.entity_kind(),
                name,
                format!("{}.{}", kind.group_key(), kind.default_key()),
            ))
        };
    }

    match roles.first() {
        Some(first) => Ok(configured(&first.name)),
        None => Ok(RoleSelection {
            kind,
            name: kind.default_role_name().to_string(),
            synthesized: true,
        }),
    }
}

/// Where a provider role's directory comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryChoice {
    /// A configured directory, by name.
    Configured(String),
    /// Nothing is configured; the default directory is synthesized.
    Synthesized,
}

/// Resolve the directory a provider role uses: its own directory name, else
/// the configured default directory, else the first configured directory.
pub fn resolve_directory(
    set: &ConfigSet,
    role: &RoleConfig,
) -> Result<DirectoryChoice, ConfigError> {
    if let Some(name) = &role.directory {
        return if set.directories.contains(name) {
            Ok(DirectoryChoice::Configured(name.clone()))
        } else {
            Err(ConfigError::unresolved(
                EntityKind::Directory,
                name,
                role.describe(),
            ))
        };
    }
    if let Some(name) = &set.defaults.directory {
        return if set.directories.contains(name) {
            Ok(DirectoryChoice::Configured(name.clone()))
        } else {
            Err(ConfigError::unresolved(
                EntityKind::Directory,
                name,
                "DirectoryGroup.DefaultDirectory",
            ))
        };
    }
    Ok(match set.directories.first() {
        Some(first) => DirectoryChoice::Configured(first.name.clone()),
        None => DirectoryChoice::Synthesized,
    })
}

/// Run every reference check for `role` against `set`.
pub fn verify_role(set: &ConfigSet, role: &RoleConfig) -> Result<(), ConfigError> {
    let result = run_checks(set, role);
    if let Err(err) = &result {
        warn!(role = %role.describe(), error = %err, "Configuration verification failed");
    }
    result
}

fn run_checks(set: &ConfigSet, role: &RoleConfig) -> Result<(), ConfigError> {
    if role.kind.uses_server() {
        if let Some(server) = &role.server {
            if !set.servers.contains(server) {
                return Err(ConfigError::unresolved(
                    EntityKind::Server,
                    server,
                    role.describe(),
                ));
            }
        }
    } else {
        // Positional: the first missing channel is reported.
        if let Some(missing) = role
            .channel_set
            .iter()
            .find(|channel| !set.channels.contains(channel))
        {
            return Err(ConfigError::unresolved(
                EntityKind::Channel,
                missing,
                role.describe(),
            ));
        }
    }
    debug!(role = %role.describe(), "Transport references resolved");

    if let Some(logger) = &role.logger {
        if !set.loggers.contains(logger) {
            return Err(ConfigError::unresolved(
                EntityKind::Logger,
                logger,
                role.describe(),
            ));
        }
    }

    if role.kind == RoleKind::Consumer {
        if let Some(dictionary) = &role.dictionary {
            if !set.dictionaries.contains(dictionary) {
                return Err(ConfigError::unresolved(
                    EntityKind::Dictionary,
                    dictionary,
                    role.describe(),
                ));
            }
        }
        return Ok(());
    }

    match resolve_directory(set, role)? {
        DirectoryChoice::Configured(name) => {
            if let Some(directory) = set.directories.get(&name) {
                debug!(role = %role.describe(), directory = %name, "Checking directory services");
                check_service_dictionaries(set, directory)?;
                check_unique_service_ids(directory)?;
            }
        }
        DirectoryChoice::Synthesized => {
            debug!(role = %role.describe(), "No directory configured; default directory will be used");
        }
    }
    Ok(())
}

fn check_service_dictionaries(
    set: &ConfigSet,
    directory: &DirectoryConfig,
) -> Result<(), ConfigError> {
    for service in &directory.services {
        let lists = [&service.dictionaries_used, &service.dictionaries_provided];
        for name in lists.into_iter().flatten() {
            if !set.dictionaries.contains(name) {
                return Err(ConfigError::unresolved(
                    EntityKind::Dictionary,
                    name,
                    format!(
                        "Service '{}' in Directory '{}'",
                        service.name, directory.name
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_unique_service_ids(directory: &DirectoryConfig) -> Result<(), ConfigError> {
    let mut seen: HashMap<u16, &str> = HashMap::new();
    for service in &directory.services {
        let Some(id) = service.service_id else {
            continue;
        };
        if let Some(first) = seen.insert(id, &service.name) {
            return Err(ConfigError::DuplicateIdentity {
                directory: directory.name.clone(),
                service_id: id,
                first: first.to_string(),
                second: service.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validation entry point: select the role and check everything it reaches.
pub fn verify_configuration(
    set: &ConfigSet,
    kind: RoleKind,
    requested: Option<&str>,
) -> Result<RoleSelection, ConfigError> {
    let selection = select_role(set, kind, requested).map_err(|err| {
        warn!(kind = %kind, error = %err, "Role selection failed");
        err
    })?;
    if selection.synthesized {
        verify_role(set, &defaults::role(kind, &selection.name))?;
    } else if let Some(role) = set.roles(kind).get(&selection.name) {
        verify_role(set, role)?;
    }
    debug!(kind = %kind, role = %selection.name, "Configuration verified");
    Ok(selection)
}
