//! Layer order and field-level precedence across file, programmatic and
//! method layers.

use super::test_utils::{layers_with, with_overrides};
use ommcfg::config::MethodOverride;
use ommcfg::source::{parse_tree_str, TreeFormat};
use ommcfg::{resolve, ConfigLayers, RoleKind};
use serde_json::json;

const FILE_LAYER: &str = r#"
[ConsumerGroup]
DefaultConsumer = "Consumer_1"

[ConsumerGroup.ConsumerList.Consumer_1]
Channel = "Channel_1"
ReconnectAttemptLimit = 110
ReconnectMinDelay = 2000
ItemCountHint = 5000

[ChannelGroup.ChannelList.Channel_1]
ChannelType = "RSSL_SOCKET"
Host = "ads1"
Port = "14002"
"#;

fn file_layers() -> ConfigLayers {
    let mut layers = ConfigLayers::new();
    layers.set_file(
        "EmaConfig.toml",
        parse_tree_str(FILE_LAYER, TreeFormat::Toml).unwrap(),
    );
    layers
}

#[test]
fn test_file_value_survives_when_later_layers_are_silent() {
    let mut layers = file_layers();
    // A programmatic layer that touches an unrelated entity only.
    layers.add_programmatic(json!({
        "LoggerGroup": { "LoggerList": { "Logger_9": { "LoggerSeverity": "Error" } } }
    }));
    layers.add_override(MethodOverride::UserName("method-user".into()));

    let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
    let role = &snapshot.role;

    assert_eq!(role.name, "Consumer_1");
    assert_eq!(role.reconnect.attempt_limit, 110);
    assert_eq!(role.reconnect.min_delay_ms, 2000);
    assert_eq!(role.reconnect.max_delay_ms, 5000);
    assert_eq!(role.tuning.item_count_hint, 5000);
    assert_eq!(role.tuning.request_timeout, 15_000);
    assert_eq!(role.method.user_name.as_deref(), Some("method-user"));
    assert_eq!(snapshot.login_request().user_name, "method-user");
    assert_eq!(snapshot.connection_list().reconnect.attempt_limit, 110);
}

#[test]
fn test_programmatic_layer_overrides_only_fields_it_sets() {
    let mut layers = file_layers();
    layers.add_programmatic(json!({
        "ConsumerGroup": { "ConsumerList": { "Consumer_1": { "ReconnectAttemptLimit": 3 } } },
        "ChannelGroup": { "ChannelList": { "Channel_1": { "Port": "14010" } } }
    }));

    let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
    assert_eq!(snapshot.role.reconnect.attempt_limit, 3);
    assert_eq!(snapshot.role.reconnect.min_delay_ms, 2000);

    let channel = snapshot.channels.get("Channel_1").unwrap();
    assert_eq!(channel.host.as_deref(), Some("ads1"));
    assert_eq!(channel.port.as_deref(), Some("14010"));
}

#[test]
fn test_programmatic_trees_apply_in_order() {
    let layers = layers_with(&[
        json!({ "ChannelGroup": { "ChannelList": { "C": { "Host": "first" } } } }),
        json!({ "ChannelGroup": { "ChannelList": { "C": { "Host": "second" } } } }),
    ]);
    let set = layers.merged().unwrap();
    assert_eq!(set.channels.get("C").unwrap().host.as_deref(), Some("second"));
}

#[test]
fn test_method_role_name_beats_configured_default() {
    let layers = with_overrides(
        layers_with(&[json!({
            "ConsumerGroup": {
                "DefaultConsumer": "Consumer_1",
                "ConsumerList": { "Consumer_1": {}, "Consumer_2": { "ItemCountHint": 7 } }
            }
        })]),
        vec![MethodOverride::RoleName("Consumer_2".into())],
    );

    let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
    assert_eq!(snapshot.role.name, "Consumer_2");
    assert_eq!(snapshot.role.tuning.item_count_hint, 7);
}

#[test]
fn test_later_default_name_replaces_earlier() {
    let layers = layers_with(&[
        json!({ "ConsumerGroup": { "DefaultConsumer": "A", "ConsumerList": { "A": {}, "B": {} } } }),
        json!({ "ConsumerGroup": { "DefaultConsumer": "B" } }),
    ]);
    let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
    assert_eq!(snapshot.role.name, "B");
}

#[test]
fn test_invalid_enum_value_fails_while_reading() {
    let layers = layers_with(&[json!({
        "ChannelGroup": { "ChannelList": { "C": { "CompressionType": "Brotli" } } }
    })]);
    let err = layers.merged().unwrap_err();
    match err {
        ommcfg::ConfigError::InvalidValue { field, value, .. } => {
            assert!(field.ends_with("CompressionType"));
            assert_eq!(value, "Brotli");
        }
        other => panic!("unexpected error: {other}"),
    }
}
