//! Resolution with no configuration at all.

use ommcfg::config::defaults::{
    DEFAULT_CHANNEL_NAME, DEFAULT_DICTIONARY_NAME, DEFAULT_DIRECTORY_NAME, DEFAULT_LOGGER_NAME,
    DEFAULT_SERVER_NAME,
};
use ommcfg::{resolve, ConfigLayers, RoleKind};

#[test]
fn test_consumer_defaults() {
    let snapshot = resolve(RoleKind::Consumer, &ConfigLayers::new()).unwrap();

    assert!(snapshot.selection.synthesized);
    assert_eq!(snapshot.role.name, "DefaultEmaConsumer");
    assert_eq!(snapshot.channels.names().collect::<Vec<_>>(), vec![DEFAULT_CHANNEL_NAME]);
    assert_eq!(snapshot.logger.name, DEFAULT_LOGGER_NAME);
    assert_eq!(snapshot.dictionary.as_ref().unwrap().name, DEFAULT_DICTIONARY_NAME);
    assert!(snapshot.server.is_none());
    assert!(snapshot.directory.is_none());

    let list = snapshot.connection_list();
    assert_eq!(list.len(), 1);
    assert_eq!(list.reconnect.attempt_limit, -1);
}

#[test]
fn test_niprovider_defaults() {
    let snapshot = resolve(RoleKind::NiProvider, &ConfigLayers::new()).unwrap();

    assert_eq!(snapshot.role.name, "DefaultEmaNiProvider");
    assert_eq!(snapshot.channels.len(), 1);
    let directory = snapshot.directory.as_ref().unwrap();
    assert_eq!(directory.name, DEFAULT_DIRECTORY_NAME);
    assert_eq!(directory.services.len(), 1);
    assert_eq!(snapshot.dictionaries.len(), 1);
}

#[test]
fn test_iprovider_defaults() {
    let snapshot = resolve(RoleKind::IProvider, &ConfigLayers::new()).unwrap();

    assert_eq!(snapshot.role.name, "DefaultEmaIProvider");
    assert!(snapshot.channels.is_empty());
    assert_eq!(snapshot.server.as_ref().unwrap().name, DEFAULT_SERVER_NAME);
    assert_eq!(snapshot.role.server.as_deref(), Some(DEFAULT_SERVER_NAME));

    let list = snapshot.connection_list();
    assert_eq!(list.server().unwrap().options.port, "14002");

    let cache = snapshot.directory_cache().unwrap();
    assert_eq!(cache.services.len(), 1);
    assert_eq!(cache.service_by_id(1).unwrap().name(), Some("DIRECT_FEED"));
}

#[test]
fn test_synthesized_snapshot_is_sendable() {
    fn assert_send_sync<T: Send + Sync + Clone>(_: &T) {}
    let snapshot = resolve(RoleKind::Consumer, &ConfigLayers::new()).unwrap();
    assert_send_sync(&snapshot);
}
