//! Directories and the services they advertise.

use super::{set, set_some};
use crate::config::defaults;
use crate::config::entity::{EntityMap, Named};
use crate::config::tree::FieldReader;
use crate::config::vocabulary::parse_capability;
use crate::error::ConfigError;
use crate::protocol::{
    DataState, Qos, Rate, ServiceInfo, ServiceLoad, ServiceState, State, StatusCode, StreamState,
    Timeliness,
};
use serde::Serialize;
use std::collections::HashSet;

/// Largest service id representable on the wire.
pub const MAX_SERVICE_ID: u64 = 65535;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Assigned after merging when left unset.
    pub service_id: Option<u16>,
    pub info: Option<ServiceInfo>,
    pub state: Option<ServiceState>,
    pub load: Option<ServiceLoad>,
    /// Dictionary entity names, not wire item names.
    pub dictionaries_used: Vec<String>,
    pub dictionaries_provided: Vec<String>,
}

impl Named for ServiceConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryConfig {
    pub name: String,
    pub services: EntityMap<ServiceConfig>,
}

impl Named for DirectoryConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DirectoryConfig {
    pub fn new(name: impl Into<String>) -> Self {
        DirectoryConfig {
            name: name.into(),
            services: EntityMap::new(),
        }
    }

    /// Give every service without an id the lowest id not yet taken in
    /// this directory, in insertion order.
    pub fn assign_missing_service_ids(&mut self) -> Result<Vec<(String, u16)>, ConfigError> {
        let mut taken: HashSet<u16> = self
            .services
            .iter()
            .filter_map(|service| service.service_id)
            .collect();
        let mut assigned = Vec::new();
        let mut candidate: u32 = 0;
        for service in self.services.iter_mut() {
            if service.service_id.is_some() {
                continue;
            }
            let id = loop {
                let Ok(id) = u16::try_from(candidate) else {
                    return Err(ConfigError::ServiceIdsExhausted {
                        directory: self.name.clone(),
                        service: service.name.clone(),
                    });
                };
                candidate += 1;
                if taken.insert(id) {
                    break id;
                }
            };
            service.service_id = Some(id);
            assigned.push((service.name.clone(), id));
        }
        Ok(assigned)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoPatch {
    pub vendor: Option<String>,
    pub is_source: Option<bool>,
    pub capabilities: Option<Vec<u16>>,
    pub qos: Option<Vec<Qos>>,
    pub supports_qos_range: Option<bool>,
    pub item_list: Option<String>,
    pub accepting_consumer_status: Option<bool>,
    pub supports_out_of_band_snapshots: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub service_state: Option<u32>,
    pub accepting_requests: Option<bool>,
    pub status: Option<State>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadPatch {
    pub open_limit: Option<u64>,
    pub open_window: Option<u64>,
    pub load_factor: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicePatch {
    pub name: String,
    pub service_id: Option<u16>,
    pub info: Option<InfoPatch>,
    pub state: Option<StatePatch>,
    pub load: Option<LoadPatch>,
    pub dictionaries_used: Option<Vec<String>>,
    pub dictionaries_provided: Option<Vec<String>>,
}

impl ServicePatch {
    pub fn new(name: impl Into<String>) -> Self {
        ServicePatch {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read(name: &str, reader: &mut FieldReader<'_>) -> Result<Self, ConfigError> {
        let mut patch = ServicePatch::new(name);

        if let Some(mut info) = reader.object("InfoFilter")? {
            patch.service_id = match info.u64("ServiceId")? {
                Some(id) if id > MAX_SERVICE_ID => {
                    return Err(ConfigError::invalid_value(
                        info.field_path("ServiceId"),
                        id.to_string(),
                        "Service id must be between 0 and 65535.",
                    ));
                }
                Some(id) => Some(id as u16),
                None => None,
            };
            patch.dictionaries_used = info.name_list("DictionariesUsed")?;
            patch.dictionaries_provided = info.name_list("DictionariesProvided")?;
            patch.info = Some(InfoPatch {
                vendor: info.string("Vendor")?,
                is_source: info.bool("IsSource")?,
                capabilities: read_capabilities(&mut info)?,
                qos: read_qos(&mut info)?,
                supports_qos_range: info.bool("SupportsQoSRange")?,
                item_list: info.string("ItemList")?,
                accepting_consumer_status: info.bool("AcceptingConsumerStatus")?,
                supports_out_of_band_snapshots: info.bool("SupportsOutOfBandSnapshots")?,
            });
            info.finish();
        }

        if let Some(mut state) = reader.object("StateFilter")? {
            let status = match state.object("Status")? {
                Some(mut status) => {
                    let parsed = State::new(
                        status.keyword::<StreamState>("StreamState")?.unwrap_or(StreamState::Open),
                        status.keyword::<DataState>("DataState")?.unwrap_or(DataState::Ok),
                        status.keyword::<StatusCode>("StatusCode")?.unwrap_or(StatusCode::None),
                        status.string("StatusText")?.unwrap_or_default(),
                    );
                    status.finish();
                    Some(parsed)
                }
                None => None,
            };
            patch.state = Some(StatePatch {
                service_state: state.u32("ServiceState")?,
                accepting_requests: state.bool("AcceptingRequests")?,
                status,
            });
            state.finish();
        }

        if let Some(mut load) = reader.object("LoadFilter")? {
            patch.load = Some(LoadPatch {
                open_limit: load.u64("OpenLimit")?,
                open_window: load.u64("OpenWindow")?,
                load_factor: load.u64("LoadFactor")?,
            });
            load.finish();
        }

        Ok(patch)
    }

    pub fn apply(&self, service: &mut ServiceConfig) {
        set_some(&mut service.service_id, &self.service_id);
        set(&mut service.dictionaries_used, &self.dictionaries_used);
        set(&mut service.dictionaries_provided, &self.dictionaries_provided);

        if let Some(patch) = &self.info {
            let name = service.name.clone();
            let info = service.info.get_or_insert_with(|| ServiceInfo {
                service_name: name,
                ..ServiceInfo::default()
            });
            set(&mut info.vendor, &patch.vendor);
            set(&mut info.is_source, &patch.is_source);
            set(&mut info.capabilities, &patch.capabilities);
            set(&mut info.qos, &patch.qos);
            set(&mut info.supports_qos_range, &patch.supports_qos_range);
            set(&mut info.item_list, &patch.item_list);
            set(&mut info.accepting_consumer_status, &patch.accepting_consumer_status);
            set(
                &mut info.supports_out_of_band_snapshots,
                &patch.supports_out_of_band_snapshots,
            );
        }

        if let Some(patch) = &self.state {
            let state = service.state.get_or_insert_with(ServiceState::default);
            set(&mut state.service_state, &patch.service_state);
            set(&mut state.accepting_requests, &patch.accepting_requests);
            set_some(&mut state.status, &patch.status);
        }

        if let Some(patch) = &self.load {
            let load = service.load.get_or_insert_with(ServiceLoad::default);
            set_some(&mut load.open_limit, &patch.open_limit);
            set_some(&mut load.open_window, &patch.open_window);
            set_some(&mut load.load_factor, &patch.load_factor);
        }
    }
}

fn read_capabilities(info: &mut FieldReader<'_>) -> Result<Option<Vec<u16>>, ConfigError> {
    let field = info.field_path("Capabilities");
    let Some(raw) = info.scalar_list("Capabilities")? else {
        return Ok(None);
    };
    let mut capabilities = Vec::with_capacity(raw.len());
    for entry in raw {
        let capability = parse_capability(&field, &entry)?;
        if !capabilities.contains(&capability) {
            capabilities.push(capability);
        }
    }
    Ok(Some(capabilities))
}

fn read_qos(info: &mut FieldReader<'_>) -> Result<Option<Vec<Qos>>, ConfigError> {
    let Some(entries) = info.object_list("QoS")? else {
        return Ok(None);
    };
    let mut list = Vec::with_capacity(entries.len());
    for mut entry in entries {
        let timeliness = entry
            .keyword::<Timeliness>("Timeliness")?
            .unwrap_or(Timeliness::Realtime);
        let rate = entry.keyword::<Rate>("Rate")?.unwrap_or(Rate::TickByTick);
        entry.finish();
        let qos = Qos { timeliness, rate };
        if !list.contains(&qos) {
            list.push(qos);
        }
    }
    Ok(Some(list))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryPatch {
    pub name: String,
    pub services: Vec<ServicePatch>,
}

impl DirectoryPatch {
    pub fn new(name: impl Into<String>) -> Self {
        DirectoryPatch {
            name: name.into(),
            services: Vec::new(),
        }
    }

    /// Services merge by name, so re-adding a service updates it in place.
    pub fn apply(&self, directory: &mut DirectoryConfig) {
        for patch in &self.services {
            let service = directory
                .services
                .get_or_insert_with(&patch.name, || defaults::service(&patch.name));
            patch.apply(service);
        }
    }
}
