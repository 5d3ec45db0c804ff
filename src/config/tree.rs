//! Reading the generic configuration tree into overlay patches.
//!
//! The tree is a `serde_json::Value` laid out as group → list → entity →
//! field. Both the file source and programmatic callers produce it, so the
//! same reader handles every layer.

use super::model::{
    ChannelPatch, DictionaryPatch, DirectoryPatch, LoggerPatch, RoleKind, RolePatch, ServerPatch,
    ServicePatch,
};
use super::vocabulary::Vocabulary;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Configured default names, one per role group plus the directory group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultNames {
    pub consumer: Option<String>,
    pub niprovider: Option<String>,
    pub iprovider: Option<String>,
    pub directory: Option<String>,
}

impl DefaultNames {
    pub fn role(&self, kind: RoleKind) -> Option<&str> {
        match kind {
            RoleKind::Consumer => self.consumer.as_deref(),
            RoleKind::NiProvider => self.niprovider.as_deref(),
            RoleKind::IProvider => self.iprovider.as_deref(),
        }
    }

    pub fn set_role(&mut self, kind: RoleKind, name: String) {
        let slot = match kind {
            RoleKind::Consumer => &mut self.consumer,
            RoleKind::NiProvider => &mut self.niprovider,
            RoleKind::IProvider => &mut self.iprovider,
        };
        *slot = Some(name);
    }

    /// Later explicit defaults replace earlier ones.
    pub fn apply(&mut self, overlay: &DefaultNames) {
        for kind in RoleKind::ALL {
            if let Some(name) = overlay.role(kind) {
                self.set_role(kind, name.to_string());
            }
        }
        if let Some(name) = &overlay.directory {
            self.directory = Some(name.clone());
        }
    }
}

/// One layer of configuration input, already validated for shape and
/// vocabulary but not for references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Where the layer came from, for logs.
    pub source: String,
    pub defaults: DefaultNames,
    pub roles: Vec<RolePatch>,
    pub channels: Vec<ChannelPatch>,
    pub servers: Vec<ServerPatch>,
    pub loggers: Vec<LoggerPatch>,
    pub dictionaries: Vec<DictionaryPatch>,
    pub directories: Vec<DirectoryPatch>,
}

impl Overlay {
    pub fn new(source: impl Into<String>) -> Self {
        Overlay {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Parse a whole configuration tree.
    pub fn from_tree(source: impl Into<String>, tree: &Value) -> Result<Self, ConfigError> {
        let mut overlay = Overlay::new(source);
        let root = tree
            .as_object()
            .ok_or_else(|| ConfigError::parse("<root>", "configuration root must be a map"))?;

        for (group, value) in root {
            match group.as_str() {
                "ConsumerGroup" => overlay.read_role_group(RoleKind::Consumer, value)?,
                "NiProviderGroup" => overlay.read_role_group(RoleKind::NiProvider, value)?,
                "IProviderGroup" => overlay.read_role_group(RoleKind::IProvider, value)?,
                "ChannelGroup" => {
                    for (name, mut reader) in read_list(value, "ChannelGroup", "ChannelList")? {
                        overlay.channels.push(ChannelPatch::read(&name, &mut reader)?);
                        reader.finish();
                    }
                }
                "ServerGroup" => {
                    for (name, mut reader) in read_list(value, "ServerGroup", "ServerList")? {
                        overlay.servers.push(ServerPatch::read(&name, &mut reader)?);
                        reader.finish();
                    }
                }
                "LoggerGroup" => {
                    for (name, mut reader) in read_list(value, "LoggerGroup", "LoggerList")? {
                        overlay.loggers.push(LoggerPatch::read(&name, &mut reader)?);
                        reader.finish();
                    }
                }
                "DictionaryGroup" => {
                    for (name, mut reader) in
                        read_list(value, "DictionaryGroup", "DictionaryList")?
                    {
                        overlay
                            .dictionaries
                            .push(DictionaryPatch::read(&name, &mut reader)?);
                        reader.finish();
                    }
                }
                "DirectoryGroup" => overlay.read_directory_group(value)?,
                other => {
                    warn!(source = %overlay.source, group = other, "Unrecognized configuration group ignored");
                }
            }
        }

        debug!(
            source = %overlay.source,
            roles = overlay.roles.len(),
            channels = overlay.channels.len(),
            servers = overlay.servers.len(),
            loggers = overlay.loggers.len(),
            dictionaries = overlay.dictionaries.len(),
            directories = overlay.directories.len(),
            "Parsed configuration overlay"
        );
        Ok(overlay)
    }

    fn read_role_group(&mut self, kind: RoleKind, value: &Value) -> Result<(), ConfigError> {
        let mut group = FieldReader::new(kind.group_key().to_string(), value)?;
        if let Some(name) = group.name(kind.default_key())? {
            self.defaults.set_role(kind, name);
        }
        if let Some(list) = group.take(kind.list_key()) {
            let path = group.field_path(kind.list_key());
            for (name, mut reader) in named_entries(&path, list)? {
                self.roles.push(RolePatch::read(kind, &name, &mut reader)?);
                reader.finish();
            }
        }
        group.finish();
        Ok(())
    }

    fn read_directory_group(&mut self, value: &Value) -> Result<(), ConfigError> {
        let mut group = FieldReader::new("DirectoryGroup".to_string(), value)?;
        self.defaults.directory = group.name("DefaultDirectory")?;
        if let Some(list) = group.take("DirectoryList") {
            let path = group.field_path("DirectoryList");
            for (directory_name, directory) in named_entries(&path, list)? {
                let mut patch = DirectoryPatch::new(directory_name.clone());
                // Every remaining key of a directory is a service name.
                let service_path = directory.path().to_string();
                let services: Vec<(String, &Value)> = directory
                    .remaining()
                    .map(|(name, value)| (name.clone(), value))
                    .collect();
                for (service_name, value) in services {
                    let mut reader =
                        FieldReader::new(format!("{}.{}", service_path, service_name), value)?;
                    patch
                        .services
                        .push(ServicePatch::read(&service_name, &mut reader)?);
                    reader.finish();
                }
                self.directories.push(patch);
            }
        }
        group.finish();
        Ok(())
    }
}

/// Entities of `<group>.<list>`.
fn read_list<'a>(
    value: &'a Value,
    group_key: &str,
    list_key: &'static str,
) -> Result<Vec<(String, FieldReader<'a>)>, ConfigError> {
    let mut group = FieldReader::new(group_key.to_string(), value)?;
    let entries = match group.take(list_key) {
        Some(list) => named_entries(&group.field_path(list_key), list)?,
        None => Vec::new(),
    };
    group.finish();
    Ok(entries)
}

/// A named list is either a map of name → entity or an array of entities
/// that each carry a `Name` field.
fn named_entries<'a>(
    path: &str,
    list: &'a Value,
) -> Result<Vec<(String, FieldReader<'a>)>, ConfigError> {
    match list {
        Value::Object(map) => map
            .iter()
            .map(|(name, entity)| {
                FieldReader::new(format!("{}.{}", path, name), entity)
                    .map(|reader| (name.clone(), reader))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, entity)| -> Result<_, ConfigError> {
                let mut reader = FieldReader::new(format!("{}[{}]", path, position), entity)?;
                let name = reader.name("Name")?.ok_or_else(|| {
                    ConfigError::parse(reader.path(), "list entry has no Name")
                })?;
                Ok((name, reader))
            })
            .collect(),
        _ => Err(ConfigError::parse(path, "expected a map or a list of entries")),
    }
}

/// Typed access to the fields of one map node, tracking which keys were read
/// so unrecognized ones can be reported.
pub(crate) struct FieldReader<'a> {
    path: String,
    fields: &'a Map<String, Value>,
    seen: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(path: String, value: &'a Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(fields) => Ok(FieldReader {
                path,
                fields,
                seen: Vec::new(),
            }),
            _ => Err(ConfigError::parse(path, "expected a map")),
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn field_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    pub(crate) fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        self.seen.push(key);
        self.fields.get(key)
    }

    /// Keys not read so far, in document order.
    pub(crate) fn remaining(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + '_ {
        self.fields
            .iter()
            .filter(move |(key, _)| !self.seen.iter().any(|seen| *seen == key.as_str()))
    }

    fn type_error(&self, key: &str, expected: &str) -> ConfigError {
        ConfigError::parse(self.field_path(key), format!("expected {}", expected))
    }

    /// A string; numbers are accepted and rendered as text.
    pub(crate) fn string(&mut self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(_) => Err(self.type_error(key, "a string")),
        }
    }

    /// A reference to another entity; blank names count as unset.
    pub(crate) fn name(&mut self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .string(key)?
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()))
    }

    /// Strings or numbers given either as a list or as one comma separated string.
    pub(crate) fn scalar_list(
        &mut self,
        key: &'static str,
    ) -> Result<Option<Vec<String>>, ConfigError> {
        let raw: Vec<String> = match self.take(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(text)) => text.split(',').map(str::to_string).collect(),
            Some(Value::Number(number)) => vec![number.to_string()],
            Some(Value::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(text) => values.push(text.clone()),
                        Value::Number(number) => values.push(number.to_string()),
                        _ => return Err(self.type_error(key, "a list of strings")),
                    }
                }
                values
            }
            Some(_) => return Err(self.type_error(key, "a list of strings")),
        };
        Ok(Some(
            raw.into_iter()
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        ))
    }

    /// A list of entity names with duplicates removed, first occurrence kept.
    pub(crate) fn name_list(
        &mut self,
        key: &'static str,
    ) -> Result<Option<Vec<String>>, ConfigError> {
        Ok(self.scalar_list(key)?.map(|names| {
            let mut unique: Vec<String> = Vec::with_capacity(names.len());
            for name in names {
                if !unique.contains(&name) {
                    unique.push(name);
                }
            }
            unique
        }))
    }

    fn integer(&mut self, key: &'static str) -> Result<Option<i128>, ConfigError> {
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_i64()
                .map(i128::from)
                .or_else(|| number.as_u64().map(i128::from))
                .map(Some)
                .ok_or_else(|| self.type_error(key, "an integer")),
            Some(Value::String(text)) => text
                .trim()
                .parse::<i128>()
                .map(Some)
                .map_err(|_| self.type_error(key, "an integer")),
            Some(_) => Err(self.type_error(key, "an integer")),
        }
    }

    pub(crate) fn u32(&mut self, key: &'static str) -> Result<Option<u32>, ConfigError> {
        match self.integer(key)? {
            None => Ok(None),
            Some(value) => u32::try_from(value)
                .map(Some)
                .map_err(|_| self.type_error(key, "an unsigned 32-bit integer")),
        }
    }

    pub(crate) fn u64(&mut self, key: &'static str) -> Result<Option<u64>, ConfigError> {
        match self.integer(key)? {
            None => Ok(None),
            Some(value) => u64::try_from(value)
                .map(Some)
                .map_err(|_| self.type_error(key, "an unsigned integer")),
        }
    }

    pub(crate) fn i64(&mut self, key: &'static str) -> Result<Option<i64>, ConfigError> {
        match self.integer(key)? {
            None => Ok(None),
            Some(value) => i64::try_from(value)
                .map(Some)
                .map_err(|_| self.type_error(key, "a 64-bit integer")),
        }
    }

    /// Booleans, 0/1, or the strings true/false.
    pub(crate) fn bool(&mut self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(Value::Number(number)) => match number.as_u64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(self.type_error(key, "a boolean")),
            },
            Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(self.type_error(key, "a boolean")),
            },
            Some(_) => Err(self.type_error(key, "a boolean")),
        }
    }

    pub(crate) fn keyword<T: Vocabulary>(
        &mut self,
        key: &'static str,
    ) -> Result<Option<T>, ConfigError> {
        self.keyword_with(key, T::parse)
    }

    /// A keyword parsed by a custom vocabulary function.
    pub(crate) fn keyword_with<T>(
        &mut self,
        key: &'static str,
        parse: impl Fn(&str, &str) -> Result<T, ConfigError>,
    ) -> Result<Option<T>, ConfigError> {
        let field = self.field_path(key);
        match self.string(key)? {
            None => Ok(None),
            Some(raw) => parse(&field, &raw).map(Some),
        }
    }

    pub(crate) fn object(
        &mut self,
        key: &'static str,
    ) -> Result<Option<FieldReader<'a>>, ConfigError> {
        let path = self.field_path(key);
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => FieldReader::new(path, value).map(Some),
        }
    }

    /// A list of maps; a single map is treated as a list of one.
    pub(crate) fn object_list(
        &mut self,
        key: &'static str,
    ) -> Result<Option<Vec<FieldReader<'a>>>, ConfigError> {
        let path = self.field_path(key);
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(position, item)| FieldReader::new(format!("{}[{}]", path, position), item))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(value @ Value::Object(_)) => Ok(Some(vec![FieldReader::new(path, value)?])),
            Some(_) => Err(ConfigError::parse(path, "expected a list of maps")),
        }
    }

    /// Report keys that were never read.
    pub(crate) fn finish(self) {
        for (key, _) in self.remaining() {
            warn!(path = %self.path, field = %key, "Unrecognized configuration field ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::vocabulary::LoggerLevel;
    use serde_json::json;

    #[test]
    fn test_overlay_reads_groups_and_defaults() {
        let tree = json!({
            "ConsumerGroup": {
                "DefaultConsumer": "Consumer_2",
                "ConsumerList": {
                    "Consumer_1": { "Channel": "Channel_1" },
                    "Consumer_2": { "ChannelSet": "Channel_1, Channel_2", "Logger": "Logger_1" }
                }
            },
            "LoggerGroup": { "LoggerList": { "Logger_1": { "LoggerSeverity": "Verbose" } } }
        });

        let overlay = Overlay::from_tree("test", &tree).unwrap();

        assert_eq!(overlay.defaults.consumer.as_deref(), Some("Consumer_2"));
        assert_eq!(overlay.roles.len(), 2);
        assert_eq!(overlay.roles[0].name, "Consumer_1");
        assert_eq!(
            overlay.roles[1].channel_set,
            Some(vec!["Channel_1".to_string(), "Channel_2".to_string()])
        );
        assert_eq!(overlay.loggers[0].severity, Some(LoggerLevel::Trace));
    }

    #[test]
    fn test_array_lists_need_names() {
        let tree = json!({
            "ChannelGroup": { "ChannelList": [ { "Name": "Channel_1", "Host": "h1" }, { "Host": "h2" } ] }
        });
        let err = Overlay::from_tree("test", &tree).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailure { .. }));
    }

    #[test]
    fn test_wrong_shape_is_parse_failure() {
        let err = Overlay::from_tree("test", &json!(["not", "a", "map"])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailure { .. }));

        let tree = json!({ "ChannelGroup": { "ChannelList": { "Channel_1": { "NumInputBuffers": "many" } } } });
        match Overlay::from_tree("test", &tree).unwrap_err() {
            ConfigError::ParseFailure { path, .. } => {
                assert_eq!(path, "ChannelGroup.ChannelList.Channel_1.NumInputBuffers")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_numeric_strings_and_flag_forms() {
        let tree = json!({
            "ChannelGroup": { "ChannelList": { "C": {
                "GuaranteedOutputBuffers": "250",
                "TcpNodelay": 0,
                "DirectWrite": "true",
                "Port": 14010
            } } }
        });
        let overlay = Overlay::from_tree("test", &tree).unwrap();
        let channel = &overlay.channels[0];
        assert_eq!(channel.guaranteed_output_buffers, Some(250));
        assert_eq!(channel.tcp_nodelay, Some(false));
        assert_eq!(channel.direct_write, Some(true));
        assert_eq!(channel.port.as_deref(), Some("14010"));
    }

    #[test]
    fn test_directory_services_are_read_in_order() {
        let tree = json!({
            "DirectoryGroup": {
                "DefaultDirectory": "Directory_1",
                "DirectoryList": { "Directory_1": {
                    "ZETA": { "InfoFilter": { "ServiceId": 5 } },
                    "ALPHA": { "InfoFilter": { "ServiceId": 70000 } }
                } }
            }
        });
        let err = Overlay::from_tree("test", &tree).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, value, .. } => {
                assert!(field.ends_with("ALPHA.InfoFilter.ServiceId"));
                assert_eq!(value, "70000");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
