//! A missing channel is reported wherever it sits in the channel set.

use ommcfg::{resolve, ConfigError, ConfigLayers, EntityKind, RoleKind};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn missing_channel_is_found_at_any_position(
        len in 1usize..6,
        position in 0usize..6,
    ) {
        let position = position % len;
        let channel_set: Vec<String> = (0..len)
            .map(|i| if i == position { "Missing".to_string() } else { format!("Channel_{i}") })
            .collect();
        let channels: serde_json::Map<String, serde_json::Value> = (0..len)
            .filter(|i| *i != position)
            .map(|i| (format!("Channel_{i}"), json!({})))
            .collect();

        let mut layers = ConfigLayers::new();
        layers.add_programmatic(json!({
            "ConsumerGroup": { "ConsumerList": { "Consumer_1": { "ChannelSet": channel_set } } },
            "ChannelGroup": { "ChannelList": channels }
        }));

        match resolve(RoleKind::Consumer, &layers) {
            Err(ConfigError::UnresolvedReference { kind, name, .. }) => {
                prop_assert_eq!(kind, EntityKind::Channel);
                prop_assert_eq!(name, "Missing");
            }
            other => prop_assert!(false, "unexpected result: {:?}", other.map(|s| s.role.name)),
        }
    }
}
