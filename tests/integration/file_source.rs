//! Configuration files as the first layer.

use super::test_utils::write_config;
use ommcfg::source::load_tree;
use ommcfg::{resolve, ConfigError, ConfigLayers, RoleKind};

#[test]
fn test_toml_file_resolves() {
    let (_dir, path) = write_config(
        "EmaConfig.toml",
        r#"
[NiProviderGroup]
DefaultNiProvider = "Provider_1"

[NiProviderGroup.NiProviderList.Provider_1]
Channel = "Channel_10"
Directory = "Directory_1"
Logger = "Logger_1"

[ChannelGroup.ChannelList.Channel_10]
Host = "ads10"
Port = "14003"

[LoggerGroup.LoggerList.Logger_1]
LoggerType = "Stdout"
LoggerSeverity = "Success"

[DirectoryGroup]
DefaultDirectory = "Directory_1"

[DirectoryGroup.DirectoryList.Directory_1.TEST_NI_PUB.InfoFilter]
ServiceId = 11
Vendor = "company name"
Capabilities = ["MMT_MARKET_PRICE", "MMT_MARKET_BY_PRICE"]
"#,
    );

    let mut layers = ConfigLayers::new();
    layers.set_file(path.display().to_string(), load_tree(&path).unwrap());
    let snapshot = resolve(RoleKind::NiProvider, &layers).unwrap();

    assert_eq!(snapshot.role.name, "Provider_1");
    assert_eq!(snapshot.logger.name, "Logger_1");
    let cache = snapshot.directory_cache().unwrap();
    assert_eq!(cache.service_by_id(11).unwrap().name(), Some("TEST_NI_PUB"));
}

#[test]
fn test_json_file_resolves() {
    let (_dir, path) = write_config(
        "EmaConfig.json",
        r#"{
  "ConsumerGroup": { "ConsumerList": { "Consumer_2": { "Channel": "Channel_1", "Dictionary": "Dictionary_1" } } },
  "ChannelGroup": { "ChannelList": { "Channel_1": { "Host": "json-host" } } },
  "DictionaryGroup": { "DictionaryList": { "Dictionary_1": { "DictionaryType": "FileDictionary" } } }
}"#,
    );

    let mut layers = ConfigLayers::new();
    layers.set_file("EmaConfig.json", load_tree(&path).unwrap());
    let snapshot = resolve(RoleKind::Consumer, &layers).unwrap();
    assert_eq!(snapshot.dictionary.unwrap().name, "Dictionary_1");
    assert_eq!(snapshot.channels.get("Channel_1").unwrap().host.as_deref(), Some("json-host"));
}

#[test]
fn test_malformed_file_is_a_parse_failure() {
    let (_dir, path) = write_config("broken.toml", "[ConsumerGroup\nDefaultConsumer = ");
    match load_tree(&path) {
        Err(ConfigError::ParseFailure { path: reported, .. }) => {
            assert!(reported.ends_with("broken.toml"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_non_finite_number_in_file_is_rejected() {
    let (_dir, path) = write_config(
        "nan.toml",
        "[ChannelGroup.ChannelList.Channel_1]\nCompressionThreshold = inf\n",
    );
    match load_tree(&path) {
        Err(ConfigError::ParseFailure { path: reported, .. }) => {
            assert!(reported.contains("nan.toml"));
            assert!(reported.ends_with("ChannelGroup.ChannelList.Channel_1.CompressionThreshold"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        load_tree(&dir.path().join("absent.toml")),
        Err(ConfigError::Io(_))
    ));
}
