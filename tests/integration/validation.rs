//! Fail-fast cross-reference validation.

use super::test_utils::{layers_with, with_overrides};
use ommcfg::config::MethodOverride;
use ommcfg::{resolve, verify_configuration, ConfigError, EntityKind, RoleKind};
use serde_json::json;

fn duplicate_id_tree() -> serde_json::Value {
    json!({
        "NiProviderGroup": { "NiProviderList": { "Provider_1": { "Directory": "D" } } },
        "DirectoryGroup": { "DirectoryList": { "D": {
            "S1": { "InfoFilter": { "ServiceId": 10 } },
            "S2": { "InfoFilter": { "ServiceId": 10 } }
        } } }
    })
}

#[test]
fn test_duplicate_service_id_rejected_before_generation() {
    let layers = layers_with(&[duplicate_id_tree()]);
    let set = layers.merged().unwrap();

    let err = verify_configuration(&set, RoleKind::NiProvider, None).unwrap_err();
    match &err {
        ConfigError::DuplicateIdentity {
            directory,
            service_id,
            first,
            second,
        } => {
            assert_eq!(directory, "D");
            assert_eq!(*service_id, 10);
            assert_eq!(first, "S1");
            assert_eq!(second, "S2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        resolve(RoleKind::NiProvider, &layers),
        Err(ConfigError::DuplicateIdentity { .. })
    ));
}

#[test]
fn test_duplicate_ids_in_unselected_directory_are_allowed() {
    let mut tree = duplicate_id_tree();
    tree["NiProviderGroup"]["NiProviderList"]["Provider_1"]["Directory"] = json!("Clean");
    tree["DirectoryGroup"]["DirectoryList"]["Clean"] = json!({ "S3": { "InfoFilter": {} } });

    let snapshot = resolve(RoleKind::NiProvider, &layers_with(&[tree])).unwrap();
    assert_eq!(snapshot.directory.unwrap().name, "Clean");
}

#[test]
fn test_dictionary_closure_names_the_missing_entry() {
    let layers = layers_with(&[json!({
        "IProviderGroup": { "IProviderList": { "Provider_1": { "Directory": "D" } } },
        "DictionaryGroup": { "DictionaryList": { "DictA": {} } },
        "DirectoryGroup": { "DirectoryList": { "D": {
            "S": { "InfoFilter": { "DictionariesUsed": ["DictA", "Missing"] } }
        } } }
    })]);

    let err = resolve(RoleKind::IProvider, &layers).unwrap_err();
    match err {
        ConfigError::UnresolvedReference {
            kind,
            name,
            referenced_by,
        } => {
            assert_eq!(kind, EntityKind::Dictionary);
            assert_eq!(name, "Missing");
            assert!(referenced_by.contains("'S'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_requested_role_fails() {
    let layers = with_overrides(
        layers_with(&[json!({ "ConsumerGroup": { "ConsumerList": { "Consumer_1": {} } } })]),
        vec![MethodOverride::RoleName("Nope".into())],
    );
    let err = resolve(RoleKind::Consumer, &layers).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnresolvedReference { kind: EntityKind::Consumer, ref name, .. } if name == "Nope"
    ));
}

#[test]
fn test_unknown_default_role_fails() {
    let layers = layers_with(&[json!({
        "ConsumerGroup": { "DefaultConsumer": "Ghost", "ConsumerList": { "Consumer_1": {} } }
    })]);
    assert!(matches!(
        resolve(RoleKind::Consumer, &layers),
        Err(ConfigError::UnresolvedReference { .. })
    ));
}

#[test]
fn test_missing_logger_and_server() {
    let layers = layers_with(&[json!({
        "IProviderGroup": { "IProviderList": { "P": { "Server": "S", "Logger": "L" } } }
    })]);
    let err = resolve(RoleKind::IProvider, &layers).unwrap_err();
    // The server is checked before the logger.
    assert!(matches!(
        err,
        ConfigError::UnresolvedReference { kind: EntityKind::Server, .. }
    ));

    let layers = layers_with(&[json!({
        "ConsumerGroup": { "ConsumerList": { "C": { "Logger": "L" } } }
    })]);
    assert!(matches!(
        resolve(RoleKind::Consumer, &layers),
        Err(ConfigError::UnresolvedReference { kind: EntityKind::Logger, .. })
    ));
}

#[test]
fn test_missing_default_directory_fails() {
    let layers = layers_with(&[json!({
        "NiProviderGroup": { "NiProviderList": { "P": {} } },
        "DirectoryGroup": { "DefaultDirectory": "Nowhere" }
    })]);
    assert!(matches!(
        resolve(RoleKind::NiProvider, &layers),
        Err(ConfigError::UnresolvedReference { kind: EntityKind::Directory, .. })
    ));
}

#[test]
fn test_method_override_on_wrong_role_kind() {
    let layers = with_overrides(
        layers_with(&[]),
        vec![MethodOverride::Host("ads1:14002".into())],
    );
    assert!(matches!(
        resolve(RoleKind::IProvider, &layers),
        Err(ConfigError::InvalidUsage(_))
    ));
}
