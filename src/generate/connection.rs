use crate::config::defaults::DEFAULT_HOST;
use crate::config::{ChannelConfig, ConnectionType, RoleConfig, ServerConfig};
use crate::protocol::{
    BindOptions, ConnectInfo, ConnectOptions, ConnectionEntry, ConnectionList, ProxyOptions,
    ServerBindInfo, TlsOptions,
};
use crate::resolve::Snapshot;
use tracing::debug;

/// Method value, else configured value.
fn pick(method: &Option<String>, configured: &Option<String>) -> Option<String> {
    method.clone().or_else(|| configured.clone())
}

/// Ordered connection targets for the snapshot's role.
///
/// Channel roles get one entry per channel in the channel set. A host given
/// at method level applies to every entry and forces a plain socket
/// connection. Interactive providers get exactly one server entry.
pub fn connection_list(snapshot: &Snapshot) -> ConnectionList {
    let role = &snapshot.role;
    let entries = match &snapshot.server {
        Some(server) if role.kind.uses_server() => {
            vec![ConnectionEntry::Server(server_entry(role, server))]
        }
        _ => snapshot
            .channels
            .iter()
            .map(|channel| ConnectionEntry::Channel(channel_entry(role, channel)))
            .collect(),
    };
    debug!(role = %role.describe(), entries = entries.len(), "Generated connection list");
    ConnectionList {
        entries,
        reconnect: role.reconnect,
    }
}

fn channel_entry(role: &RoleConfig, channel: &ChannelConfig) -> ConnectInfo {
    let method = &role.method;
    let (connection_type, host, port) = match &method.host {
        Some(address) => (
            ConnectionType::Socket,
            address.host.clone(),
            address.port.clone(),
        ),
        None => (
            channel.connection_type,
            channel.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            channel
                .port
                .clone()
                .unwrap_or_else(|| role.kind.default_port().to_string()),
        ),
    };
    let proxy = ProxyOptions {
        host: pick(&method.proxy.host, &channel.proxy.host),
        port: pick(&method.proxy.port, &channel.proxy.port),
        user_name: pick(&method.proxy.user_name, &channel.proxy.user_name),
        password: pick(&method.proxy.password, &channel.proxy.password),
        domain: pick(&method.proxy.domain, &channel.proxy.domain),
    };

    ConnectInfo {
        channel_name: channel.name.clone(),
        options: ConnectOptions {
            connection_type,
            encrypted_protocol: channel.encrypted_protocol,
            host,
            port,
            interface_name: channel.interface_name.clone(),
            compression: channel.compression,
            guaranteed_output_buffers: channel.guaranteed_output_buffers,
            num_input_buffers: channel.num_input_buffers,
            sys_recv_buf_size: channel.sys_recv_buf_size,
            sys_send_buf_size: channel.sys_send_buf_size,
            ping_timeout: channel.ping_timeout,
            tcp_nodelay: channel.tcp_nodelay,
            proxy,
            location: channel.location.clone(),
            enable_session_management: channel.enable_session_management,
            ws_protocols: channel.ws_protocols.clone(),
            ws_max_msg_size: channel.ws_max_msg_size,
        },
        initialization_timeout: channel.initialization_timeout,
        high_water_mark: channel.high_water_mark,
        compression_threshold: channel.compression_threshold,
        direct_write: channel.direct_write,
    }
}

fn server_entry(role: &RoleConfig, server: &ServerConfig) -> ServerBindInfo {
    let method = &role.method;
    let port = pick(&method.server_port, &server.port)
        .unwrap_or_else(|| role.kind.default_port().to_string());
    let tls = TlsOptions {
        server_cert: pick(&method.tls.server_cert, &server.tls.server_cert),
        server_private_key: pick(&method.tls.server_private_key, &server.tls.server_private_key),
        cipher_suite: pick(&method.tls.cipher_suite, &server.tls.cipher_suite),
    };

    ServerBindInfo {
        server_name: server.name.clone(),
        options: BindOptions {
            server_type: server.server_type,
            port,
            interface_name: server.interface_name.clone(),
            compression: server.compression,
            guaranteed_output_buffers: server.guaranteed_output_buffers,
            num_input_buffers: server.num_input_buffers,
            sys_recv_buf_size: server.sys_recv_buf_size,
            sys_send_buf_size: server.sys_send_buf_size,
            ping_timeout: server.ping_timeout,
            min_ping_timeout: server.min_ping_timeout,
            max_fragment_size: server.max_fragment_size,
            tcp_nodelay: server.tcp_nodelay,
            tls,
            ws_protocols: server.ws_protocols.clone(),
        },
        initialization_timeout: server.initialization_timeout,
        high_water_mark: server.high_water_mark,
        compression_threshold: server.compression_threshold,
        direct_write: server.direct_write,
    }
}
