//! CLI presentation: text rendering of resolved artifacts.

use crate::config::RoleSelection;
use crate::protocol::{ConnectionEntry, ConnectionList, DirectoryRefresh, LoginRequest};
use crate::resolve::Snapshot;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(header);
    table
}

fn title(text: &str) -> String {
    format!("{}", text.bold().underline())
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

pub fn format_verify_text(selection: &RoleSelection) -> String {
    let origin = if selection.synthesized {
        " (synthesized from defaults)"
    } else {
        ""
    };
    format!(
        "{} {} '{}'{}",
        "valid".green().bold(),
        selection.kind,
        selection.name,
        origin
    )
}

pub fn format_snapshot_text(snapshot: &Snapshot) -> String {
    let role = &snapshot.role;
    let mut out = format!(
        "{}\nresolved at {}\n\n",
        title(&role.describe()),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );

    let mut entities = table(vec!["Kind", "Name", "Details"]);
    for channel in &snapshot.channels {
        entities.add_row(vec![
            "Channel".to_string(),
            channel.name.clone(),
            format!(
                "{:?} {}:{}",
                channel.connection_type,
                or_dash(channel.host.as_deref()),
                channel.port.as_deref().unwrap_or(role.kind.default_port())
            ),
        ]);
    }
    if let Some(server) = &snapshot.server {
        entities.add_row(vec![
            "Server".to_string(),
            server.name.clone(),
            format!(
                "{:?} port {}",
                server.server_type,
                server.port.as_deref().unwrap_or(role.kind.default_port())
            ),
        ]);
    }
    entities.add_row(vec![
        "Logger".to_string(),
        snapshot.logger.name.clone(),
        format!("{:?} {:?}", snapshot.logger.logger_type, snapshot.logger.severity),
    ]);
    if let Some(dictionary) = &snapshot.dictionary {
        entities.add_row(vec![
            "Dictionary".to_string(),
            dictionary.name.clone(),
            format!("{:?}", dictionary.mode),
        ]);
    }
    if let Some(directory) = &snapshot.directory {
        entities.add_row(vec![
            "Directory".to_string(),
            directory.name.clone(),
            format!("{} service(s)", directory.services.len()),
        ]);
    }
    out.push_str(&entities.to_string());
    out.push_str(&format!(
        "\nreconnect: attempt limit {}, delay {}..{} ms",
        role.reconnect.attempt_limit, role.reconnect.min_delay_ms, role.reconnect.max_delay_ms
    ));
    out
}

pub fn format_connections_text(list: &ConnectionList) -> String {
    let mut connections = table(vec!["#", "Name", "Type", "Address", "Compression", "Proxy"]);
    for (position, entry) in list.entries.iter().enumerate() {
        let row = match entry {
            ConnectionEntry::Channel(info) => vec![
                (position + 1).to_string(),
                info.channel_name.clone(),
                format!("{:?}", info.options.connection_type),
                format!("{}:{}", info.options.host, info.options.port),
                format!("{:?}", info.options.compression),
                match (&info.options.proxy.host, &info.options.proxy.port) {
                    (Some(host), Some(port)) => format!("{}:{}", host, port),
                    (Some(host), None) => host.clone(),
                    _ => "-".to_string(),
                },
            ],
            ConnectionEntry::Server(info) => vec![
                (position + 1).to_string(),
                info.server_name.clone(),
                format!("{:?}", info.options.server_type),
                format!("*:{}", info.options.port),
                format!("{:?}", info.options.compression),
                "-".to_string(),
            ],
        };
        connections.add_row(row);
    }
    format!(
        "{}\nreconnect: attempt limit {}, delay {}..{} ms",
        connections, list.reconnect.attempt_limit, list.reconnect.min_delay_ms, list.reconnect.max_delay_ms
    )
}

pub fn format_login_text(request: &LoginRequest) -> String {
    let attrib = &request.attrib;
    let mut fields = table(vec!["Field", "Value"]);
    fields.add_row(vec!["StreamId".to_string(), request.stream_id.to_string()]);
    fields.add_row(vec!["Role".to_string(), format!("{:?}", request.role)]);
    fields.add_row(vec!["UserName".to_string(), request.user_name.clone()]);
    fields.add_row(vec![
        "Password".to_string(),
        request
            .password
            .as_ref()
            .map(|_| "********".to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    fields.add_row(vec!["ApplicationId".to_string(), attrib.application_id.clone()]);
    fields.add_row(vec!["ApplicationName".to_string(), attrib.application_name.clone()]);
    fields.add_row(vec!["Position".to_string(), or_dash(attrib.position.as_deref())]);
    fields.add_row(vec!["SingleOpen".to_string(), attrib.single_open.to_string()]);
    fields.add_row(vec!["AllowSuspectData".to_string(), attrib.allow_suspect_data.to_string()]);
    fields.add_row(vec![
        "RoundTripLatency".to_string(),
        attrib.support_round_trip_latency_monitoring.to_string(),
    ]);
    fields.to_string()
}

pub fn format_directory_text(refresh: Option<&DirectoryRefresh>) -> String {
    let Some(refresh) = refresh else {
        return format!(
            "{} source directory is under user control; no refresh generated",
            "note".yellow().bold()
        );
    };
    let mut services = table(vec!["ServiceId", "Name", "Capabilities", "Dictionaries Used", "QoS"]);
    for service in &refresh.services {
        let (capabilities, used, qos) = match &service.info {
            Some(info) => (
                info.capabilities
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                info.dictionaries_used.join(", "),
                info.qos
                    .iter()
                    .map(|qos| format!("{:?}/{:?}", qos.timeliness, qos.rate))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        services.add_row(vec![
            service.service_id.to_string(),
            or_dash(service.name()),
            capabilities,
            used,
            qos,
        ]);
    }
    format!(
        "{}\nstream {} filter 0x{:02X} clear cache {} state {:?}/{:?} \"{}\"",
        services,
        refresh.stream_id,
        refresh.filter.bits(),
        refresh.clear_cache,
        refresh.state.stream_state,
        refresh.state.data_state,
        refresh.state.text
    )
}
