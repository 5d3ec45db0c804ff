//! Directory cache building from a validated directory.

use super::test_utils::{layers_with, with_overrides};
use ommcfg::config::{AdminControl, MethodOverride};
use ommcfg::protocol::rdm::{MMT_DICTIONARY, MMT_MARKET_PRICE};
use ommcfg::protocol::{FilterFlags, Qos, Rate, Timeliness};
use ommcfg::{resolve, RoleKind};
use serde_json::json;

fn provider_tree() -> serde_json::Value {
    json!({
        "IProviderGroup": { "IProviderList": { "Provider_1": { "Directory": "Directory_2" } } },
        "DictionaryGroup": { "DictionaryList": {
            "Dictionary_1": {
                "RdmFieldDictionaryItemName": "RWFFld",
                "EnumTypeDefItemName": "RWFEnum"
            },
            "Dictionary_2": {
                "RdmFieldDictionaryItemName": "RWFFld",
                "EnumTypeDefItemName": "RWFEnumAlt"
            }
        } },
        "DirectoryGroup": { "DirectoryList": { "Directory_2": {
            "DIRECT_FEED": {
                "InfoFilter": {
                    "ServiceId": 1,
                    "Vendor": "company name",
                    "Capabilities": ["MMT_MARKET_PRICE", "MMT_DICTIONARY", "6"],
                    "DictionariesUsed": "Dictionary_1, Dictionary_2",
                    "DictionariesProvided": ["Dictionary_2"],
                    "QoS": [
                        { "Timeliness": "Timeliness::RealTime", "Rate": "Rate::TickByTick" },
                        { "Timeliness": 100, "Rate": 1000 }
                    ]
                },
                "StateFilter": { "ServiceState": 1, "AcceptingRequests": 1 }
            },
            "FEED_2": {
                "InfoFilter": {},
                "LoadFilter": { "OpenLimit": 1000 }
            }
        } } }
    })
}

#[test]
fn test_cache_expands_dictionaries_in_order() {
    let snapshot = resolve(RoleKind::IProvider, &layers_with(&[provider_tree()])).unwrap();
    let cache = snapshot.directory_cache().unwrap();

    assert_eq!(cache.directory_name, "Directory_2");
    let names: Vec<_> = cache.services.iter().filter_map(|s| s.name()).collect();
    assert_eq!(names, vec!["DIRECT_FEED", "FEED_2"]);

    let feed = cache.service_by_name("DIRECT_FEED").unwrap();
    let info = feed.info.as_ref().unwrap();
    assert_eq!(info.dictionaries_used, vec!["RWFFld", "RWFEnum", "RWFEnumAlt"]);
    assert_eq!(info.dictionaries_provided, vec!["RWFFld", "RWFEnumAlt"]);
    assert_eq!(info.capabilities, vec![MMT_MARKET_PRICE, MMT_DICTIONARY]);
    assert_eq!(
        info.qos,
        vec![
            Qos::realtime_tick_by_tick(),
            Qos {
                timeliness: Timeliness::Delayed(100),
                rate: Rate::TimeConflated(1000),
            }
        ]
    );
    assert_eq!(feed.filter(), FilterFlags::INFO | FilterFlags::STATE);
}

#[test]
fn test_missing_ids_are_assigned_and_qos_defaulted() {
    let snapshot = resolve(RoleKind::IProvider, &layers_with(&[provider_tree()])).unwrap();
    let cache = snapshot.directory_cache().unwrap();

    let second = cache.service_by_name("FEED_2").unwrap();
    assert_eq!(second.service_id, 0);
    assert_eq!(
        second.info.as_ref().unwrap().qos,
        vec![Qos::realtime_tick_by_tick()]
    );
    assert_eq!(cache.filter, FilterFlags::INFO | FilterFlags::STATE | FilterFlags::LOAD);
}

#[test]
fn test_cache_is_idempotent() {
    let snapshot = resolve(RoleKind::IProvider, &layers_with(&[provider_tree()])).unwrap();
    assert_eq!(
        snapshot.directory_cache().unwrap(),
        snapshot.directory_cache().unwrap()
    );
    assert_eq!(
        snapshot.directory_refresh().unwrap(),
        snapshot.directory_refresh().unwrap()
    );
}

#[test]
fn test_user_control_leaves_cache_empty() {
    let layers = with_overrides(
        layers_with(&[provider_tree()]),
        vec![MethodOverride::AdminControlDirectory(AdminControl::UserControl)],
    );
    let snapshot = resolve(RoleKind::IProvider, &layers).unwrap();
    assert!(snapshot.directory_cache().unwrap().is_empty());
    assert!(snapshot.directory_refresh().unwrap().is_none());
}

#[test]
fn test_service_dictionaries_for_iprovider() {
    let snapshot = resolve(RoleKind::IProvider, &layers_with(&[provider_tree()])).unwrap();
    let options = snapshot.role_options().unwrap();
    let feed = &options.service_dictionaries[0];
    assert_eq!(feed.service_name, "DIRECT_FEED");
    assert_eq!(feed.dictionaries_used.len(), 2);
    assert_eq!(feed.dictionaries_provided[0].name, "Dictionary_2");
}

#[test]
fn test_directory_without_services_advertises_default_service() {
    let layers = layers_with(&[json!({
        "NiProviderGroup": { "NiProviderList": { "Provider_1": {} } },
        "DirectoryGroup": { "DefaultDirectory": "D", "DirectoryList": { "D": {} } }
    })]);
    let snapshot = resolve(RoleKind::NiProvider, &layers).unwrap();
    let cache = snapshot.directory_cache().unwrap();

    assert_eq!(cache.directory_name, "D");
    assert_eq!(cache.services.len(), 1);
    assert_eq!(cache.filter, FilterFlags::INFO | FilterFlags::STATE);
    let info = cache.services[0].info.as_ref().unwrap();
    assert!(info.capabilities.contains(&MMT_MARKET_PRICE));
    assert_eq!(info.qos, vec![Qos::realtime_tick_by_tick()]);

    let refresh = snapshot.directory_refresh().unwrap().unwrap();
    assert_eq!(refresh.services.len(), 1);
}
