//! Connection list, login and directory refresh generation.

use super::test_utils::{layers_with, with_overrides};
use ommcfg::config::{AdminLoginRequest, ConnectionType, MethodOverride};
use ommcfg::generate::{LOGIN_STREAM_ID, NIPROVIDER_DIRECTORY_STREAM_ID};
use ommcfg::protocol::{ConnectionEntry, LoginRole};
use ommcfg::{resolve, RoleKind};
use serde_json::json;

fn consumer_tree() -> serde_json::Value {
    json!({
        "ConsumerGroup": { "ConsumerList": [
            { "Name": "Consumer_1", "ChannelSet": ["Channel_A", "Channel_B"], "ReconnectMaxDelay": 9000 }
        ] },
        "ChannelGroup": { "ChannelList": [
            { "Name": "Channel_A", "Host": "ads-a", "Port": "14002", "CompressionType": "ZLib" },
            { "Name": "Channel_B", "ChannelType": "RSSL_WEBSOCKET", "Host": "ads-b" }
        ] }
    })
}

#[test]
fn test_channel_set_order_is_connection_order() {
    let snapshot = resolve(RoleKind::Consumer, &layers_with(&[consumer_tree()])).unwrap();
    let list = snapshot.connection_list();

    let names: Vec<_> = list.entries.iter().map(ConnectionEntry::name).collect();
    assert_eq!(names, vec!["Channel_A", "Channel_B"]);
    assert_eq!(list.reconnect.max_delay_ms, 9000);

    let channels: Vec<_> = list.channels().collect();
    assert_eq!(channels[1].options.connection_type, ConnectionType::WebSocket);
    assert_eq!(channels[1].options.port, "14002");
}

#[test]
fn test_generation_is_idempotent() {
    let snapshot = resolve(RoleKind::Consumer, &layers_with(&[consumer_tree()])).unwrap();
    assert_eq!(snapshot.connection_list(), snapshot.connection_list());
    assert_eq!(snapshot.login_request(), snapshot.login_request());
}

#[test]
fn test_niprovider_defaults_to_port_14003() {
    let snapshot = resolve(RoleKind::NiProvider, &layers_with(&[])).unwrap();
    let list = snapshot.connection_list();
    let channel = list.channels().next().unwrap();
    assert_eq!(channel.options.host, "localhost");
    assert_eq!(channel.options.port, "14003");
}

#[test]
fn test_login_precedence() {
    let layers = with_overrides(
        layers_with(&[consumer_tree()]),
        vec![
            MethodOverride::UserName("method-user".into()),
            MethodOverride::ApplicationId("300".into()),
            MethodOverride::AdminLoginRequest(AdminLoginRequest {
                application_id: Some("400".into()),
                single_open: Some(false),
                ..AdminLoginRequest::default()
            }),
        ],
    );
    let request = resolve(RoleKind::Consumer, &layers).unwrap().login_request();

    assert_eq!(request.stream_id, LOGIN_STREAM_ID);
    assert_eq!(request.user_name, "method-user");
    assert_eq!(request.attrib.application_id, "400");
    assert!(!request.attrib.single_open);
    assert!(request.attrib.allow_suspect_data);
    assert_eq!(request.attrib.application_name, "ema");
}

#[test]
fn test_provider_login_and_refresh() {
    let snapshot = resolve(RoleKind::NiProvider, &layers_with(&[])).unwrap();
    assert_eq!(snapshot.login_request().role, LoginRole::Provider);

    let refresh = snapshot.directory_refresh().unwrap().unwrap();
    assert_eq!(refresh.stream_id, NIPROVIDER_DIRECTORY_STREAM_ID);
    assert!(!refresh.solicited);
    assert_eq!(refresh.services[0].name(), Some("NI_PUB"));
}
