//! Precedence across the file, programmatic and method layers.

use ommcfg::{resolve, ConfigLayers, MethodOverride, RoleKind};
use proptest::prelude::*;
use serde_json::{json, Value};

fn proxy_tree(proxy_host: Option<&str>) -> Value {
    let mut channel = json!({ "Host": "ads1" });
    if let Some(host) = proxy_host {
        channel["ProxyHost"] = json!(host);
    }
    json!({
        "ConsumerGroup": { "ConsumerList": { "Consumer_1": { "ChannelSet": "Channel_1, Channel_2" } } },
        "ChannelGroup": { "ChannelList": { "Channel_1": channel.clone(), "Channel_2": channel } }
    })
}

proptest! {
    #[test]
    fn method_beats_programmatic_beats_file(
        file in proptest::option::of("file-[a-z]{1,6}"),
        programmatic in proptest::option::of("prog-[a-z]{1,6}"),
        method in proptest::option::of("method-[a-z]{1,6}"),
    ) {
        let mut layers = ConfigLayers::new();
        layers.set_file("EmaConfig.toml", proxy_tree(file.as_deref()));
        layers.add_programmatic(proxy_tree(programmatic.as_deref()));
        if let Some(host) = &method {
            layers.add_override(MethodOverride::ProxyHost(host.clone()));
        }

        let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
        let list = snapshot.connection_list();
        let expected = method.or(programmatic).or(file);

        prop_assert_eq!(list.len(), 2);
        for entry in list.channels() {
            prop_assert_eq!(entry.options.proxy.host.clone(), expected.clone());
            prop_assert_eq!(entry.options.host.as_str(), "ads1");
        }
    }
}
