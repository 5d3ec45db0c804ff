use super::{set, set_some};
use crate::config::entity::Named;
use crate::config::tree::FieldReader;
use crate::config::vocabulary::{CompressionType, ConnectionType};
use crate::error::ConfigError;
use crate::protocol::TlsOptions;
use serde::Serialize;

/// Listening endpoint of an interactive provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub name: String,
    pub server_type: ConnectionType,
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
    pub min_ping_timeout: u32,
    pub initialization_timeout: u32,
    pub tcp_nodelay: bool,
    pub direct_write: bool,
    pub max_fragment_size: u32,
    pub tls: TlsOptions,
    pub ws_protocols: Option<String>,
}

impl Named for ServerConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerPatch {
    pub name: String,
    pub server_type: Option<ConnectionType>,
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
    pub min_ping_timeout: Option<u32>,
    pub initialization_timeout: Option<u32>,
    pub tcp_nodelay: Option<bool>,
    pub direct_write: Option<bool>,
    pub max_fragment_size: Option<u32>,
    pub server_cert: Option<String>,
    pub server_private_key: Option<String>,
    pub cipher_suite: Option<String>,
    pub ws_protocols: Option<String>,
}

impl ServerPatch {
    pub fn new(name: impl Into<String>) -> Self {
        ServerPatch {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read(name: &str, reader: &mut FieldReader<'_>) -> Result<Self, ConfigError> {
        Ok(ServerPatch {
            name: name.to_string(),
            server_type: reader.keyword_with("ServerType", ConnectionType::parse_server_type)?,
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
            min_ping_timeout: reader.u32("ConnectionMinPingTimeout")?,
            initialization_timeout: reader.u32("InitializationTimeout")?,
            tcp_nodelay: reader.bool("TcpNodelay")?,
            direct_write: reader.bool("DirectWrite")?,
            max_fragment_size: reader.u32("MaxFragmentSize")?,
            server_cert: reader.string("ServerCert")?,
            server_private_key: reader.string("ServerPrivateKey")?,
            cipher_suite: reader.string("CipherSuite")?,
            ws_protocols: reader.string("WsProtocols")?,
        })
    }

    pub fn apply(&self, server: &mut ServerConfig) {
        set(&mut server.server_type, &self.server_type);
        set_some(&mut server.port, &self.port);
        set_some(&mut server.interface_name, &self.interface_name);
        set(&mut server.compression, &self.compression);
        set_some(&mut server.compression_threshold, &self.compression_threshold);
        set(&mut server.guaranteed_output_buffers, &self.guaranteed_output_buffers);
        set(&mut server.num_input_buffers, &self.num_input_buffers);
        set_some(&mut server.sys_recv_buf_size, &self.sys_recv_buf_size);
        set_some(&mut server.sys_send_buf_size, &self.sys_send_buf_size);
        set_some(&mut server.high_water_mark, &self.high_water_mark);
        set(&mut server.ping_timeout, &self.ping_timeout);
        set(&mut server.min_ping_timeout, &self.min_ping_timeout);
        set(&mut server.initialization_timeout, &self.initialization_timeout);
        set(&mut server.tcp_nodelay, &self.tcp_nodelay);
        set(&mut server.direct_write, &self.direct_write);
        set(&mut server.max_fragment_size, &self.max_fragment_size);
        set_some(&mut server.tls.server_cert, &self.server_cert);
        set_some(&mut server.tls.server_private_key, &self.server_private_key);
        set_some(&mut server.tls.cipher_suite, &self.cipher_suite);
        set_some(&mut server.ws_protocols, &self.ws_protocols);
    }
}
