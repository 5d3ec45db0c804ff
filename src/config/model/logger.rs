use super::{set, set_some};
use crate::config::entity::Named;
use crate::config::tree::FieldReader;
use crate::config::vocabulary::{LoggerLevel, LoggerType};
use crate::error::ConfigError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerConfig {
    pub name: String,
    pub logger_type: LoggerType,
    pub severity: LoggerLevel,
    pub file_name: String,
    pub include_date: bool,
    pub number_of_log_files: Option<u32>,
    pub max_log_file_size: Option<u64>,
}

impl Named for LoggerConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggerPatch {
    pub name: String,
    pub logger_type: Option<LoggerType>,
    pub severity: Option<LoggerLevel>,
    pub file_name: Option<String>,
    pub include_date: Option<bool>,
    pub number_of_log_files: Option<u32>,
    pub max_log_file_size: Option<u64>,
}

impl LoggerPatch {
    pub fn new(name: impl Into<String>) -> Self {
        LoggerPatch {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn read(name: &str, reader: &mut FieldReader<'_>) -> Result<Self, ConfigError> {
        Ok(LoggerPatch {
            name: name.to_string(),
            logger_type: reader.keyword("LoggerType")?,
            severity: reader.keyword("LoggerSeverity")?,
            file_name: reader.string("FileName")?,
            include_date: reader.bool("IncludeDateInLoggerOutput")?,
            number_of_log_files: reader.u32("NumberOfLogFiles")?,
            max_log_file_size: reader.u64("MaxLogFileSize")?,
        })
    }

    pub fn apply(&self, logger: &mut LoggerConfig) {
        set(&mut logger.logger_type, &self.logger_type);
        set(&mut logger.severity, &self.severity);
        set(&mut logger.file_name, &self.file_name);
        set(&mut logger.include_date, &self.include_date);
        set_some(&mut logger.number_of_log_files, &self.number_of_log_files);
        set_some(&mut logger.max_log_file_size, &self.max_log_file_size);
    }
}
