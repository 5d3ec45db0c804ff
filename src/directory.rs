//! Directory cache: the protocol-ready service list for a provider.

use crate::config::{DictionaryConfig, DirectoryConfig, EntityMap, ServiceConfig};
use crate::error::{ConfigError, EntityKind};
use crate::protocol::{FilterFlags, Qos, Service, ServiceInfo};
use serde::Serialize;
use tracing::debug;

/// Services of one directory with dictionary names expanded to wire item
/// names, plus the union of the filter blocks they carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCache {
    pub directory_name: String,
    pub services: Vec<Service>,
    pub filter: FilterFlags,
}

impl DirectoryCache {
    pub fn empty(directory_name: impl Into<String>) -> Self {
        DirectoryCache {
            directory_name: directory_name.into(),
            services: Vec::new(),
            filter: FilterFlags::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn service_by_name(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.name() == Some(name))
    }

    pub fn service_by_id(&self, service_id: u16) -> Option<&Service> {
        self.services
            .iter()
            .find(|service| service.service_id == service_id)
    }
}

/// Dictionaries an interactive provider uses and serves for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDictionaryConfig {
    pub service_id: u16,
    pub service_name: String,
    pub dictionaries_used: Vec<DictionaryConfig>,
    pub dictionaries_provided: Vec<DictionaryConfig>,
}

/// Build the cache for `directory`, in service insertion order.
pub fn build_directory_cache(
    directory: &DirectoryConfig,
    dictionaries: &EntityMap<DictionaryConfig>,
) -> Result<DirectoryCache, ConfigError> {
    let mut cache = DirectoryCache::empty(directory.name.clone());
    for service in &directory.services {
        let record = build_service(directory, service, dictionaries)?;
        cache.filter |= record.filter();
        cache.services.push(record);
    }
    debug!(
        directory = %cache.directory_name,
        services = cache.services.len(),
        filter = cache.filter.bits(),
        "Built directory cache"
    );
    Ok(cache)
}

fn build_service(
    directory: &DirectoryConfig,
    service: &ServiceConfig,
    dictionaries: &EntityMap<DictionaryConfig>,
) -> Result<Service, ConfigError> {
    let service_id = service.service_id.ok_or_else(|| {
        ConfigError::InvalidUsage(format!(
            "service '{}' in directory '{}' has no service id",
            service.name, directory.name
        ))
    })?;

    let info = match &service.info {
        Some(info) => {
            let mut info = ServiceInfo {
                service_name: service.name.clone(),
                ..info.clone()
            };
            info.dictionaries_used =
                expand_item_names(directory, service, &service.dictionaries_used, dictionaries)?;
            info.dictionaries_provided = expand_item_names(
                directory,
                service,
                &service.dictionaries_provided,
                dictionaries,
            )?;
            if info.qos.is_empty() {
                info.qos.push(Qos::realtime_tick_by_tick());
            }
            Some(info)
        }
        None => None,
    };

    Ok(Service {
        service_id,
        info,
        state: service.state.clone(),
        load: service.load.clone(),
    })
}

/// Dictionary entity names to wire item names, field dictionary before enum
/// table, first occurrence kept.
fn expand_item_names(
    directory: &DirectoryConfig,
    service: &ServiceConfig,
    names: &[String],
    dictionaries: &EntityMap<DictionaryConfig>,
) -> Result<Vec<String>, ConfigError> {
    let mut items: Vec<String> = Vec::with_capacity(names.len() * 2);
    for dictionary in resolve_dictionaries(directory, service, names, dictionaries)? {
        for item in dictionary.item_names() {
            if !items.iter().any(|existing| existing == item) {
                items.push(item.to_string());
            }
        }
    }
    Ok(items)
}

fn resolve_dictionaries<'a>(
    directory: &DirectoryConfig,
    service: &ServiceConfig,
    names: &[String],
    dictionaries: &'a EntityMap<DictionaryConfig>,
) -> Result<Vec<&'a DictionaryConfig>, ConfigError> {
    names
        .iter()
        .map(|name| {
            dictionaries.get(name).ok_or_else(|| {
                ConfigError::unresolved(
                    EntityKind::Dictionary,
                    name,
                    format!("Service '{}' in Directory '{}'", service.name, directory.name),
                )
            })
        })
        .collect()
}

/// Per-service dictionary entities, for answering dictionary requests.
pub fn service_dictionaries(
    directory: &DirectoryConfig,
    dictionaries: &EntityMap<DictionaryConfig>,
) -> Result<Vec<ServiceDictionaryConfig>, ConfigError> {
    let mut configs = Vec::with_capacity(directory.services.len());
    for service in &directory.services {
        let Some(service_id) = service.service_id else {
            continue;
        };
        configs.push(ServiceDictionaryConfig {
            service_id,
            service_name: service.name.clone(),
            dictionaries_used: resolve_dictionaries(
                directory,
                service,
                &service.dictionaries_used,
                dictionaries,
            )?
            .into_iter()
            .cloned()
            .collect(),
            dictionaries_provided: resolve_dictionaries(
                directory,
                service,
                &service.dictionaries_provided,
                dictionaries,
            )?
            .into_iter()
            .cloned()
            .collect(),
        });
    }
    Ok(configs)
}
