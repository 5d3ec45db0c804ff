//! Configuration files read into the generic tree every overlay is parsed from.

use crate::error::ConfigError;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Toml,
    Json,
}

impl TreeFormat {
    /// Format implied by the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> TreeFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TreeFormat::Json,
            _ => TreeFormat::Toml,
        }
    }
}

/// Read and parse the file at `path`.
pub fn load_tree(path: &Path) -> Result<Value, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let tree = parse_tree_str(&text, TreeFormat::from_path(path))
        .map_err(|err| match err {
            ConfigError::ParseFailure { path: at, message } if at.starts_with('<') => {
                ConfigError::parse(path.display().to_string(), message)
            }
            ConfigError::ParseFailure { path: at, message } => {
                ConfigError::parse(format!("{}: {}", path.display(), at), message)
            }
            other => other,
        })?;
    debug!(path = %path.display(), "Loaded configuration tree");
    Ok(tree)
}

/// Parse configuration text. The top level must be a table.
pub fn parse_tree_str(text: &str, format: TreeFormat) -> Result<Value, ConfigError> {
    let tree = match format {
        TreeFormat::Json => {
            serde_json::from_str::<Value>(text).map_err(|e| ConfigError::parse("<json>", e.to_string()))?
        }
        TreeFormat::Toml => {
            let table = text
                .parse::<toml::Table>()
                .map_err(|e| ConfigError::parse("<toml>", e.message().to_string()))?;
            toml_to_json(toml::Value::Table(table), "")?
        }
    };
    if !tree.is_object() {
        return Err(ConfigError::parse(
            "<root>",
            "configuration root must be a table of groups",
        ));
    }
    Ok(tree)
}

/// Convert a TOML value at `path`. JSON has no NaN or infinity, so
/// non-finite floats are rejected rather than read as unset.
fn toml_to_json(value: toml::Value, path: &str) -> Result<Value, ConfigError> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| ConfigError::parse(path, format!("non-finite number {}", f)))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(position, item)| toml_to_json(item, &format!("{}[{}]", path, position)))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    toml_to_json(value, &child).map(|value| (key, value))
                })
                .collect::<Result<serde_json::Map<_, _>, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toml_keeps_entity_order() {
        let tree = parse_tree_str(
            r#"
[ChannelGroup.ChannelList.Zeta]
Host = "z"

[ChannelGroup.ChannelList.Alpha]
Port = 14010
"#,
            TreeFormat::Toml,
        )
        .unwrap();
        let list = &tree["ChannelGroup"]["ChannelList"];
        let names: Vec<_> = list.as_object().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(list["Alpha"]["Port"], json!(14010));
    }

    #[test]
    fn test_malformed_input_is_a_parse_failure() {
        assert!(matches!(
            parse_tree_str("[ChannelGroup", TreeFormat::Toml),
            Err(ConfigError::ParseFailure { .. })
        ));
        assert!(matches!(
            parse_tree_str("[1, 2]", TreeFormat::Json),
            Err(ConfigError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let err = parse_tree_str(
            "[ChannelGroup.ChannelList.C]\nPort = nan\n",
            TreeFormat::Toml,
        )
        .unwrap_err();
        match err {
            ConfigError::ParseFailure { path, .. } => {
                assert_eq!(path, "ChannelGroup.ChannelList.C.Port")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_tree_str("[G]\nValues = [1.5, inf]\n", TreeFormat::Toml).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TreeFormat::from_path(Path::new("EmaConfig.JSON")), TreeFormat::Json);
        assert_eq!(TreeFormat::from_path(Path::new("EmaConfig.toml")), TreeFormat::Toml);
    }
}
