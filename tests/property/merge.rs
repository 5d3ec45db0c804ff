//! Merge laws: idempotence, precedence and unset preservation.

use ommcfg::config::{merge_overlays, ChannelPatch, Overlay, RoleKind, RolePatch};
use proptest::prelude::*;

fn channel_patch() -> impl Strategy<Value = ChannelPatch> {
    (
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(1024u32..65535),
        proptest::option::of(0u32..1000),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(host, port, threshold, nodelay)| ChannelPatch {
            host,
            port: port.map(|p| p.to_string()),
            compression_threshold: threshold,
            tcp_nodelay: nodelay,
            ..ChannelPatch::new("Channel_1")
        })
}

fn role_patch() -> impl Strategy<Value = RolePatch> {
    (
        proptest::option::of(-1i64..500),
        proptest::option::of(0u32..200_000),
    )
        .prop_map(|(attempt_limit, item_count_hint)| RolePatch {
            reconnect_attempt_limit: attempt_limit,
            item_count_hint,
            ..RolePatch::new(RoleKind::Consumer, "Consumer_1")
        })
}

fn overlay(source: &str, channel: ChannelPatch, role: RolePatch) -> Overlay {
    let mut overlay = Overlay::new(source);
    overlay.channels.push(channel);
    overlay.roles.push(role);
    overlay
}

proptest! {
    #[test]
    fn merging_the_same_overlay_twice_changes_nothing(
        channel in channel_patch(),
        role in role_patch(),
    ) {
        let layer = overlay("a", channel, role);
        let once = merge_overlays([&layer]).unwrap();
        let twice = merge_overlays([&layer, &layer]).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn later_explicit_value_wins(
        first in channel_patch(),
        second in channel_patch(),
    ) {
        let a = overlay("a", first.clone(), RolePatch::new(RoleKind::Consumer, "Consumer_1"));
        let b = overlay("b", second.clone(), RolePatch::new(RoleKind::Consumer, "Consumer_1"));
        let set = merge_overlays([&a, &b]).unwrap();
        let channel = set.channels.get("Channel_1").unwrap();

        prop_assert_eq!(channel.host.clone(), second.host.or(first.host));
        prop_assert_eq!(channel.port.clone(), second.port.or(first.port));
        prop_assert_eq!(
            channel.compression_threshold,
            second.compression_threshold.or(first.compression_threshold)
        );
        prop_assert_eq!(
            channel.tcp_nodelay,
            second.tcp_nodelay.or(first.tcp_nodelay).unwrap_or(true)
        );
    }

    #[test]
    fn empty_overlay_preserves_every_field(
        channel in channel_patch(),
        role in role_patch(),
    ) {
        let full = overlay("full", channel, role);
        let empty = overlay(
            "empty",
            ChannelPatch::new("Channel_1"),
            RolePatch::new(RoleKind::Consumer, "Consumer_1"),
        );
        prop_assert_eq!(
            merge_overlays([&full]).unwrap(),
            merge_overlays([&full, &empty]).unwrap()
        );
    }
}
