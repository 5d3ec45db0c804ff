use super::set;
use crate::config::entity::Named;
use crate::config::tree::FieldReader;
use crate::config::vocabulary::DictionaryMode;
use crate::error::ConfigError;
use serde::Serialize;

/// A field dictionary and enum type table pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryConfig {
    pub name: String,
    pub mode: DictionaryMode,
    pub field_file_name: String,
    pub enum_file_name: String,
    /// Wire item name advertised for the field dictionary.
    pub field_item_name: String,
    pub enum_item_name: String,
}

impl Named for DictionaryConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

impl DictionaryConfig {
    /// Wire item names, field dictionary first.
    pub fn item_names(&self) -> [&str; 2] {
        [&self.field_item_name, &self.enum_item_name]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryPatch {
    pub name: String,
    pub mode: Option<DictionaryMode>,
    pub field_file_name: Option<String>,
    pub enum_file_name: Option<String>,
    pub field_item_name: Option<String>,
    pub enum_item_name: Option<String>,
}

impl DictionaryPatch {
    pub fn new(name: impl Into<String>) -> Self {
        DictionaryPatch {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read(name: &str, reader: &mut FieldReader<'_>) -> Result<Self, ConfigError> {
        Ok(DictionaryPatch {
            name: name.to_string(),
            mode: reader.keyword("DictionaryType")?,
            field_file_name: reader.string("RdmFieldDictionaryFileName")?,
            enum_file_name: reader.string("EnumTypeDefFileName")?,
            field_item_name: reader.string("RdmFieldDictionaryItemName")?,
            enum_item_name: reader.string("EnumTypeDefItemName")?,
        })
    }

    pub fn apply(&self, dictionary: &mut DictionaryConfig) {
        set(&mut dictionary.mode, &self.mode);
        set(&mut dictionary.field_file_name, &self.field_file_name);
        set(&mut dictionary.enum_file_name, &self.enum_file_name);
        set(&mut dictionary.field_item_name, &self.field_item_name);
        set(&mut dictionary.enum_item_name, &self.enum_item_name);
    }
}
