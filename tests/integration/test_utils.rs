//! Shared test utilities for integration tests

use ommcfg::config::MethodOverride;
use ommcfg::ConfigLayers;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Layers holding the given programmatic trees, in order.
pub fn layers_with(trees: &[Value]) -> ConfigLayers {
    let mut layers = ConfigLayers::new();
    for tree in trees {
        layers.add_programmatic(tree.clone());
    }
    layers
}

/// Append method overrides to `layers`.
pub fn with_overrides(mut layers: ConfigLayers, records: Vec<MethodOverride>) -> ConfigLayers {
    for record in records {
        layers.add_override(record);
    }
    layers
}

/// Write `contents` to `name` inside a fresh temp directory. The directory
/// must outlive the path.
pub fn write_config(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
