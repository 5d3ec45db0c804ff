//! Source directory service records.

use super::qos::Qos;
use super::rdm::FilterFlags;
use super::state::State;
use serde::Serialize;

/// Info filter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service_name: String,
    pub vendor: String,
    pub is_source: bool,
    /// Supported domain message model types, in configured order.
    pub capabilities: Vec<u16>,
    /// Wire dictionary item names.
    pub dictionaries_provided: Vec<String>,
    pub dictionaries_used: Vec<String>,
    pub qos: Vec<Qos>,
    pub supports_qos_range: bool,
    pub item_list: String,
    pub accepting_consumer_status: bool,
    pub supports_out_of_band_snapshots: bool,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        ServiceInfo {
            service_name: String::new(),
            vendor: String::new(),
            is_source: false,
            capabilities: Vec::new(),
            dictionaries_provided: Vec::new(),
            dictionaries_used: Vec::new(),
            qos: Vec::new(),
            supports_qos_range: false,
            item_list: String::new(),
            accepting_consumer_status: true,
            supports_out_of_band_snapshots: true,
        }
    }
}

/// State filter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceState {
    /// 1 = up, 0 = down.
    pub service_state: u32,
    pub accepting_requests: bool,
    pub status: Option<State>,
}

impl Default for ServiceState {
    fn default() -> Self {
        ServiceState {
            service_state: 1,
            accepting_requests: true,
            status: None,
        }
    }
}

/// Load filter block. Every member is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceLoad {
    pub open_limit: Option<u64>,
    pub open_window: Option<u64>,
    pub load_factor: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub service_id: u16,
    pub info: Option<ServiceInfo>,
    pub state: Option<ServiceState>,
    pub load: Option<ServiceLoad>,
}

impl Service {
    /// Filter bits describing which blocks are present.
    pub fn filter(&self) -> FilterFlags {
        let mut flags = FilterFlags::NONE;
        if self.info.is_some() {
            flags |= FilterFlags::INFO;
        }
        if self.state.is_some() {
            flags |= FilterFlags::STATE;
        }
        if self.load.is_some() {
            flags |= FilterFlags::LOAD;
        }
        flags
    }

    pub fn name(&self) -> Option<&str> {
        self.info.as_ref().map(|info| info.service_name.as_str())
    }
}

/// Source directory refresh payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRefresh {
    pub stream_id: i32,
    pub filter: FilterFlags,
    pub clear_cache: bool,
    pub solicited: bool,
    pub state: State,
    pub services: Vec<Service>,
}
