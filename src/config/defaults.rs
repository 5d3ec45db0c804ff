//! Default templates, one fresh instance per call.
//!
//! A new entity named by an overlay starts from the template for its kind.
//! Nothing here is shared or mutated after construction.

use super::method::MethodSettings;
use super::model::{
    ChannelConfig, DictionaryConfig, DirectoryConfig, LoggerConfig, ProviderPolicy, RoleConfig,
    RoleKind, RoleTuning, ServerConfig, ServiceConfig, XmlTrace,
};
use super::vocabulary::{CompressionType, ConnectionType, DictionaryMode, LoggerLevel, LoggerType};
use crate::protocol::rdm::{
    MMT_DICTIONARY, MMT_MARKET_BY_ORDER, MMT_MARKET_BY_PRICE, MMT_MARKET_MAKER, MMT_MARKET_PRICE,
};
use crate::protocol::{ProxyOptions, Qos, ReconnectPolicy, ServiceInfo, ServiceState, TlsOptions};

pub const DEFAULT_CHANNEL_NAME: &str = "DefaultEmaChannel";
pub const DEFAULT_SERVER_NAME: &str = "DefaultEmaServer";
pub const DEFAULT_LOGGER_NAME: &str = "DefaultEmaLogger";
pub const DEFAULT_DICTIONARY_NAME: &str = "DefaultEmaDictionary";
pub const DEFAULT_DIRECTORY_NAME: &str = "DefaultEmaDirectory";
pub const DEFAULT_HOST: &str = "localhost";

pub const DEFAULT_NIPROVIDER_SERVICE_NAME: &str = "NI_PUB";
pub const DEFAULT_IPROVIDER_SERVICE_NAME: &str = "DIRECT_FEED";

pub fn role(kind: RoleKind, name: &str) -> RoleConfig {
    RoleConfig {
        kind,
        name: name.to_string(),
        channel_set: Vec::new(),
        server: None,
        logger: None,
        dictionary: None,
        directory: None,
        tuning: RoleTuning {
            item_count_hint: 100_000,
            service_count_hint: 513,
            max_dispatch_count_api_thread: 100,
            max_dispatch_count_user_thread: 100,
            dispatch_timeout_api_thread: -1,
            request_timeout: 15_000,
            post_ack_timeout: 15_000,
            max_outstanding_posts: 100_000,
            obey_open_window: true,
            msg_key_in_updates: true,
            login_request_timeout: 45_000,
            directory_request_timeout: 45_000,
            dictionary_request_timeout: 45_000,
            enable_rtt: false,
        },
        reconnect: ReconnectPolicy {
            attempt_limit: -1,
            min_delay_ms: 1000,
            max_delay_ms: 5000,
        },
        xml_trace: XmlTrace {
            to_stdout: false,
            to_file: false,
            to_multiple_files: false,
            write: true,
            read: true,
            ping: false,
            file_name: "EmaTrace".to_string(),
            max_file_size: 100_000_000,
        },
        provider: ProviderPolicy {
            refresh_first_required: true,
            merge_source_directory_streams: true,
            recover_user_submit_source_directory: true,
            remove_items_on_disconnect: false,
            field_dictionary_fragment_size: 8192,
            enum_type_fragment_size: 128_000,
            accept_message_without_being_login: false,
            accept_message_without_accepting_requests: false,
            accept_dir_message_without_min_filters: false,
            accept_message_without_qos_in_range: false,
            accept_message_same_key_but_diff_stream: false,
            accept_message_that_changes_service: false,
        },
        method: MethodSettings::default(),
    }
}

pub fn channel(name: &str) -> ChannelConfig {
    ChannelConfig {
        name: name.to_string(),
        connection_type: ConnectionType::Socket,
        encrypted_protocol: ConnectionType::Socket,
        host: None,
        port: None,
        interface_name: None,
        compression: CompressionType::None,
        compression_threshold: None,
        guaranteed_output_buffers: 100,
        num_input_buffers: 10,
        sys_recv_buf_size: None,
        sys_send_buf_size: None,
        high_water_mark: None,
        ping_timeout: 30_000,
        initialization_timeout: 5,
        tcp_nodelay: true,
        direct_write: false,
        proxy: ProxyOptions::default(),
        location: None,
        enable_session_management: false,
        ws_protocols: None,
        ws_max_msg_size: 61_440,
    }
}

pub fn server(name: &str) -> ServerConfig {
    ServerConfig {
        name: name.to_string(),
        server_type: ConnectionType::Socket,
        port: None,
        interface_name: None,
        compression: CompressionType::None,
        compression_threshold: None,
        guaranteed_output_buffers: 100,
        num_input_buffers: 10,
        sys_recv_buf_size: None,
        sys_send_buf_size: None,
        high_water_mark: None,
        ping_timeout: 60_000,
        min_ping_timeout: 20_000,
        initialization_timeout: 60,
        tcp_nodelay: true,
        direct_write: false,
        max_fragment_size: 6144,
        tls: TlsOptions::default(),
        ws_protocols: None,
    }
}

pub fn logger(name: &str) -> LoggerConfig {
    LoggerConfig {
        name: name.to_string(),
        logger_type: LoggerType::File,
        severity: LoggerLevel::Info,
        file_name: "emaLog".to_string(),
        include_date: false,
        number_of_log_files: None,
        max_log_file_size: None,
    }
}

pub fn dictionary(name: &str) -> DictionaryConfig {
    DictionaryConfig {
        name: name.to_string(),
        mode: DictionaryMode::Channel,
        field_file_name: "./RDMFieldDictionary".to_string(),
        enum_file_name: "./enumtype.def".to_string(),
        field_item_name: "RWFFld".to_string(),
        enum_item_name: "RWFEnum".to_string(),
    }
}

/// A configured service starts with no filter blocks; overlays add them.
pub fn service(name: &str) -> ServiceConfig {
    ServiceConfig {
        name: name.to_string(),
        service_id: None,
        info: None,
        state: None,
        load: None,
        dictionaries_used: Vec::new(),
        dictionaries_provided: Vec::new(),
    }
}

/// Service advertised when a provider has no directory configuration at all.
pub fn default_service(kind: RoleKind) -> ServiceConfig {
    let (name, service_id) = match kind {
        RoleKind::IProvider => (DEFAULT_IPROVIDER_SERVICE_NAME, 1),
        RoleKind::Consumer | RoleKind::NiProvider => (DEFAULT_NIPROVIDER_SERVICE_NAME, 0),
    };
    let mut capabilities = vec![
        MMT_MARKET_PRICE,
        MMT_MARKET_BY_ORDER,
        MMT_MARKET_BY_PRICE,
        MMT_MARKET_MAKER,
    ];
    if kind == RoleKind::IProvider {
        capabilities.push(MMT_DICTIONARY);
    }

    ServiceConfig {
        name: name.to_string(),
        service_id: Some(service_id),
        info: Some(ServiceInfo {
            service_name: name.to_string(),
            capabilities,
            qos: vec![Qos::realtime_tick_by_tick()],
            ..ServiceInfo::default()
        }),
        state: Some(ServiceState::default()),
        load: None,
        dictionaries_used: vec![DEFAULT_DICTIONARY_NAME.to_string()],
        dictionaries_provided: vec![DEFAULT_DICTIONARY_NAME.to_string()],
    }
}

pub fn default_directory(kind: RoleKind) -> DirectoryConfig {
    let mut directory = DirectoryConfig::new(DEFAULT_DIRECTORY_NAME);
    directory.services.insert(default_service(kind));
    directory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_independent_instances() {
        let mut first = channel("A");
        first.guaranteed_output_buffers = 1;
        let second = channel("A");
        assert_eq!(second.guaranteed_output_buffers, 100);
    }

    #[test]
    fn test_role_defaults() {
        let role = role(RoleKind::Consumer, "C");
        assert_eq!(role.reconnect.attempt_limit, -1);
        assert_eq!(role.reconnect.min_delay_ms, 1000);
        assert_eq!(role.reconnect.max_delay_ms, 5000);
        assert_eq!(role.tuning.service_count_hint, 513);
        assert!(role.xml_trace.write && role.xml_trace.read);
        assert!(!role.xml_trace.ping);
    }

    #[test]
    fn test_default_service_per_provider_kind() {
        let ni = default_service(RoleKind::NiProvider);
        assert_eq!(ni.name, "NI_PUB");
        assert_eq!(ni.service_id, Some(0));
        assert!(!ni.info.as_ref().unwrap().capabilities.contains(&MMT_DICTIONARY));

        let ip = default_service(RoleKind::IProvider);
        assert_eq!(ip.name, "DIRECT_FEED");
        assert_eq!(ip.service_id, Some(1));
        assert!(ip.info.as_ref().unwrap().capabilities.contains(&MMT_DICTIONARY));
        assert_eq!(ip.dictionaries_provided, vec![DEFAULT_DICTIONARY_NAME.to_string()]);
    }
}
