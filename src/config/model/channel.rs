use super::{set, set_some};
use crate::config::entity::Named;
use crate::config::tree::FieldReader;
use crate::config::vocabulary::{CompressionType, ConnectionType};
use crate::error::ConfigError;
use crate::protocol::ProxyOptions;
use serde::Serialize;

/// Outbound connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelConfig {
    pub name: String,
    pub connection_type: ConnectionType,
    pub encrypted_protocol: ConnectionType,
    /// Unset host and port fall back to the role's defaults at generation time.
    pub host: Option<String>,
    pub port: Option<String>,
    pub interface_name: Option<String>,
    pub compression: CompressionType,
    pub compression_threshold: Option<u32>,
    pub guaranteed_output_buffers: u32,
    pub num_input_buffers: u32,
    pub sys_recv_buf_size: Option<u32>,
    pub sys_send_buf_size: Option<u32>,
    pub high_water_mark: Option<u32>,
    pub ping_timeout: u32,
    pub initialization_timeout: u32,
    pub tcp_nodelay: bool,
    pub direct_write: bool,
    pub proxy: ProxyOptions,
    pub location: Option<String>,
    pub enable_session_management: bool,
    pub ws_protocols: Option<String>,
    pub ws_max_msg_size: u32,
}

impl Named for ChannelConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelPatch {
    pub name: String,
    pub connection_type: Option<ConnectionType>,
    pub encrypted_protocol: Option<ConnectionType>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub interface_name: Option<String>,
    pub compression: Option<CompressionType>,
    pub compression_threshold: Option<u32>,
    pub guaranteed_output_buffers: Option<u32>,
    pub num_input_buffers: Option<u32>,
    pub sys_recv_buf_size: Option<u32>,
    pub sys_send_buf_size: Option<u32>,
    pub high_water_mark: Option<u32>,
    pub ping_timeout: Option<u32>,
    pub initialization_timeout: Option<u32>,
    pub tcp_nodelay: Option<bool>,
    pub direct_write: Option<bool>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<String>,
    pub proxy_user_name: Option<String>,
    pub proxy_password: Option<String>,
    pub proxy_domain: Option<String>,
    pub location: Option<String>,
    pub enable_session_management: Option<bool>,
    pub ws_protocols: Option<String>,
    pub ws_max_msg_size: Option<u32>,
}

impl ChannelPatch {
    pub fn new(name: impl Into<String>) -> Self {
        ChannelPatch {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read(name: &str, reader: &mut FieldReader<'_>) -> Result<Self, ConfigError> {
        Ok(ChannelPatch {
            name: name.to_string(),
            connection_type: reader.keyword("ChannelType")?,
            encrypted_protocol: reader
                .keyword_with("EncryptedProtocolType", ConnectionType::parse_encrypted_protocol)?,
            host: reader.string("Host")?,
            port: reader.string("Port")?,
            interface_name: reader.string("InterfaceName")?,
            compression: reader.keyword("CompressionType")?,
            compression_threshold: reader.u32("CompressionThreshold")?,
            guaranteed_output_buffers: reader.u32("GuaranteedOutputBuffers")?,
            num_input_buffers: reader.u32("NumInputBuffers")?,
            sys_recv_buf_size: reader.u32("SysRecvBufSize")?,
            sys_send_buf_size: reader.u32("SysSendBufSize")?,
            high_water_mark: reader.u32("HighWaterMark")?,
            ping_timeout: reader.u32("ConnectionPingTimeout")?,
            initialization_timeout: reader.u32("InitializationTimeout")?,
            tcp_nodelay: reader.bool("TcpNodelay")?,
            direct_write: reader.bool("DirectWrite")?,
            proxy_host: reader.string("ProxyHost")?,
            proxy_port: reader.string("ProxyPort")?,
            proxy_user_name: reader.string("ProxyUserName")?,
            proxy_password: reader.string("ProxyPassword")?,
            proxy_domain: reader.string("ProxyDomain")?,
            location: reader.string("Location")?,
            enable_session_management: reader.bool("EnableSessionManagement")?,
            ws_protocols: reader.string("WsProtocols")?,
            ws_max_msg_size: reader.u32("WsMaxMsgSize")?,
        })
    }

    pub fn apply(&self, channel: &mut ChannelConfig) {
        set(&mut channel.connection_type, &self.connection_type);
        set(&mut channel.encrypted_protocol, &self.encrypted_protocol);
        set_some(&mut channel.host, &self.host);
        set_some(&mut channel.port, &self.port);
        set_some(&mut channel.interface_name, &self.interface_name);
        set(&mut channel.compression, &self.compression);
        set_some(&mut channel.compression_threshold, &self.compression_threshold);
        set(&mut channel.guaranteed_output_buffers, &self.guaranteed_output_buffers);
        set(&mut channel.num_input_buffers, &self.num_input_buffers);
        set_some(&mut channel.sys_recv_buf_size, &self.sys_recv_buf_size);
        set_some(&mut channel.sys_send_buf_size, &self.sys_send_buf_size);
        set_some(&mut channel.high_water_mark, &self.high_water_mark);
        set(&mut channel.ping_timeout, &self.ping_timeout);
        set(&mut channel.initialization_timeout, &self.initialization_timeout);
        set(&mut channel.tcp_nodelay, &self.tcp_nodelay);
        set(&mut channel.direct_write, &self.direct_write);
        set_some(&mut channel.proxy.host, &self.proxy_host);
        set_some(&mut channel.proxy.port, &self.proxy_port);
        set_some(&mut channel.proxy.user_name, &self.proxy_user_name);
        set_some(&mut channel.proxy.password, &self.proxy_password);
        set_some(&mut channel.proxy.domain, &self.proxy_domain);
        set_some(&mut channel.location, &self.location);
        set(&mut channel.enable_session_management, &self.enable_session_management);
        set_some(&mut channel.ws_protocols, &self.ws_protocols);
        set(&mut channel.ws_max_msg_size, &self.ws_max_msg_size);
    }
}
