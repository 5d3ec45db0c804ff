//! Connect and bind option records handed to the transport layer.

use crate::config::{CompressionType, ConnectionType};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyOptions {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub domain: Option<String>,
}

impl ProxyOptions {
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.port.is_none()
            && self.user_name.is_none()
            && self.password.is_none()
            && self.domain.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TlsOptions {
    pub server_cert: Option<String>,
    pub server_private_key: Option<String>,
    pub cipher_suite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectOptions {
    pub connection_type: ConnectionType,
    pub encrypted_protocol: ConnectionType,
    pub host: String,
    pub port: String,
    pub interface_name: Option<String>,
    pub compression: CompressionType,
    pub guaranteed_output_buffers: u32,
    pub num_input_buffers: u32,
    pub sys_recv_buf_size: Option<u32>,
    pub sys_send_buf_size: Option<u32>,
    pub ping_timeout: u32,
    pub tcp_nodelay: bool,
    pub proxy: ProxyOptions,
    pub location: Option<String>,
    pub enable_session_management: bool,
    pub ws_protocols: Option<String>,
    pub ws_max_msg_size: u32,
}

/// One connection attempt target: a channel's connect options plus the
/// per-channel tuning the reactor applies after connecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectInfo {
    pub channel_name: String,
    pub options: ConnectOptions,
    pub initialization_timeout: u32,
    pub high_water_mark: Option<u32>,
    pub compression_threshold: Option<u32>,
    pub direct_write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindOptions {
    pub server_type: ConnectionType,
    pub port: String,
    pub interface_name: Option<String>,
    pub compression: CompressionType,
    pub guaranteed_output_buffers: u32,
    pub num_input_buffers: u32,
    pub sys_recv_buf_size: Option<u32>,
    pub sys_send_buf_size: Option<u32>,
    pub ping_timeout: u32,
    pub min_ping_timeout: u32,
    pub max_fragment_size: u32,
    pub tcp_nodelay: bool,
    pub tls: TlsOptions,
    pub ws_protocols: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBindInfo {
    pub server_name: String,
    pub options: BindOptions,
    pub initialization_timeout: u32,
    pub high_water_mark: Option<u32>,
    pub compression_threshold: Option<u32>,
    pub direct_write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConnectionEntry {
    Channel(ConnectInfo),
    Server(ServerBindInfo),
}

impl ConnectionEntry {
    pub fn name(&self) -> &str {
        match self {
            ConnectionEntry::Channel(info) => &info.channel_name,
            ConnectionEntry::Server(info) => &info.server_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconnectPolicy {
    /// -1 retries forever.
    pub attempt_limit: i64,
    pub min_delay_ms: i64,
    pub max_delay_ms: i64,
}

/// Ordered connection targets with one reconnect policy for the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionList {
    pub entries: Vec<ConnectionEntry>,
    pub reconnect: ReconnectPolicy,
}

impl ConnectionList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn channels(&self) -> impl Iterator<Item = &ConnectInfo> {
        self.entries.iter().filter_map(|entry| match entry {
            ConnectionEntry::Channel(info) => Some(info),
            ConnectionEntry::Server(_) => None,
        })
    }

    pub fn server(&self) -> Option<&ServerBindInfo> {
        self.entries.iter().find_map(|entry| match entry {
            ConnectionEntry::Server(info) => Some(info),
            ConnectionEntry::Channel(_) => None,
        })
    }
}
