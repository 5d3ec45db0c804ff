//! Fixed vocabularies for enum-like configuration values.
//!
//! Every keyword is matched case-insensitively. A `Type::` prefix, as used
//! by XML-derived configuration (`StreamState::Open`), is ignored.

use crate::error::ConfigError;
use crate::protocol::rdm::CAPABILITY_NAMES;
use crate::protocol::{DataState, Rate, StatusCode, StreamState, Timeliness};
use serde::Serialize;

/// A closed set of keywords that a configuration string must match.
pub trait Vocabulary: Sized {
    /// Human readable list of accepted inputs, used in error messages.
    const ACCEPTED: &'static str;

    /// Look up an already normalized keyword.
    fn lookup(keyword: &str) -> Option<Self>;

    fn parse(field: &str, raw: &str) -> Result<Self, ConfigError> {
        Self::lookup(&normalize(raw))
            .ok_or_else(|| ConfigError::invalid_value(field, raw, Self::ACCEPTED))
    }
}

/// Trim, drop any `Type::` prefix and lowercase.
pub(crate) fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let keyword = match trimmed.rfind("::") {
        Some(index) => &trimmed[index + 2..],
        None => trimmed,
    };
    keyword.to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectionType {
    Socket,
    Http,
    Encrypted,
    ReliableMcast,
    WebSocket,
}

impl Vocabulary for ConnectionType {
    const ACCEPTED: &'static str = "Acceptable inputs: \"RSSL_SOCKET\", \"RSSL_HTTP\", \
        \"RSSL_ENCRYPTED\", \"RSSL_RELIABLE_MCAST\", \"RSSL_WEBSOCKET\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "rssl_socket" => Some(ConnectionType::Socket),
            "rssl_http" => Some(ConnectionType::Http),
            "rssl_encrypted" => Some(ConnectionType::Encrypted),
            "rssl_reliable_mcast" => Some(ConnectionType::ReliableMcast),
            "rssl_websocket" => Some(ConnectionType::WebSocket),
            _ => None,
        }
    }
}

impl ConnectionType {
    /// Server types are restricted to socket, encrypted and websocket.
    pub fn parse_server_type(field: &str, raw: &str) -> Result<Self, ConfigError> {
        match Self::lookup(&normalize(raw)) {
            Some(
                kind @ (ConnectionType::Socket
                | ConnectionType::Encrypted
                | ConnectionType::WebSocket),
            ) => Ok(kind),
            _ => Err(ConfigError::invalid_value(
                field,
                raw,
                "Acceptable inputs: \"RSSL_SOCKET\", \"RSSL_ENCRYPTED\", \"RSSL_WEBSOCKET\".",
            )),
        }
    }

    /// Protocols that may be tunnelled inside an encrypted connection.
    pub fn parse_encrypted_protocol(field: &str, raw: &str) -> Result<Self, ConfigError> {
        match Self::lookup(&normalize(raw)) {
            Some(
                kind @ (ConnectionType::Socket | ConnectionType::Http | ConnectionType::WebSocket),
            ) => Ok(kind),
            _ => Err(ConfigError::invalid_value(
                field,
                raw,
                "Acceptable inputs: \"RSSL_SOCKET\", \"RSSL_HTTP\", \"RSSL_WEBSOCKET\".",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompressionType {
    None,
    ZLib,
    Lz4,
}

impl Vocabulary for CompressionType {
    const ACCEPTED: &'static str = "Acceptable inputs: \"None\", \"ZLib\", \"LZ4\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(CompressionType::None),
            "zlib" => Some(CompressionType::ZLib),
            "lz4" => Some(CompressionType::Lz4),
            _ => None,
        }
    }
}

/// Logger severity. `Trace`/`Verbose` and `Info`/`Success` are synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LoggerLevel {
    Trace,
    Info,
    Warning,
    Error,
    Off,
}

impl Vocabulary for LoggerLevel {
    const ACCEPTED: &'static str = "Acceptable inputs: \"Trace\" or \"Verbose\", \"Info\" or \"Success\", \
        \"Warning\", \"Error\", \"NoLogMsg\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "trace" | "verbose" => Some(LoggerLevel::Trace),
            "info" | "success" => Some(LoggerLevel::Info),
            "warning" => Some(LoggerLevel::Warning),
            "error" => Some(LoggerLevel::Error),
            "nologmsg" => Some(LoggerLevel::Off),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoggerType {
    File,
    Stdout,
}

impl Vocabulary for LoggerType {
    const ACCEPTED: &'static str = "Acceptable inputs: \"File\", \"Stdout\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "file" => Some(LoggerType::File),
            "stdout" => Some(LoggerType::Stdout),
            _ => None,
        }
    }
}

/// Where a dictionary is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DictionaryMode {
    File,
    Channel,
}

impl Vocabulary for DictionaryMode {
    const ACCEPTED: &'static str =
        "Acceptable inputs: \"FileDictionary\", \"ChannelDictionary\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "filedictionary" => Some(DictionaryMode::File),
            "channeldictionary" => Some(DictionaryMode::Channel),
            _ => None,
        }
    }
}

impl Vocabulary for Timeliness {
    const ACCEPTED: &'static str =
        "Acceptable inputs: \"RealTime\", \"InexactDelayed\" or a number of seconds.";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "realtime" => Some(Timeliness::Realtime),
            "inexactdelayed" => Some(Timeliness::DelayedUnknown),
            other => other.parse::<u32>().ok().map(Timeliness::Delayed),
        }
    }
}

impl Vocabulary for Rate {
    const ACCEPTED: &'static str =
        "Acceptable inputs: \"TickByTick\", \"JustInTimeConflated\" or a number of milliseconds.";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "tickbytick" => Some(Rate::TickByTick),
            "justintimeconflated" => Some(Rate::JitConflated),
            other => other.parse::<u32>().ok().map(Rate::TimeConflated),
        }
    }
}

impl Vocabulary for StreamState {
    const ACCEPTED: &'static str = "Acceptable inputs: \"Open\", \"NonStreaming\", \
        \"ClosedRecover\", \"Closed\", \"ClosedRedirected\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "open" => Some(StreamState::Open),
            "nonstreaming" => Some(StreamState::NonStreaming),
            "closedrecover" | "closerecover" => Some(StreamState::ClosedRecover),
            "closed" | "close" => Some(StreamState::Closed),
            "closedredirected" | "closeredirected" => Some(StreamState::ClosedRedirected),
            _ => None,
        }
    }
}

impl Vocabulary for DataState {
    const ACCEPTED: &'static str = "Acceptable inputs: \"NoChange\", \"Ok\", \"Suspect\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "nochange" => Some(DataState::NoChange),
            "ok" => Some(DataState::Ok),
            "suspect" => Some(DataState::Suspect),
            _ => None,
        }
    }
}

impl Vocabulary for StatusCode {
    const ACCEPTED: &'static str = "Acceptable inputs: a StatusCode name such as \"None\", \
        \"NotFound\", \"Timeout\", \"NotAuthorized\" or \"SourceUnknown\".";

    fn lookup(keyword: &str) -> Option<Self> {
        StatusCode::ALL
            .iter()
            .copied()
            .find(|code| format!("{:?}", code).eq_ignore_ascii_case(keyword))
    }
}

/// Who answers directory requests for a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AdminControl {
    #[default]
    ApiControl,
    UserControl,
}

impl Vocabulary for AdminControl {
    const ACCEPTED: &'static str = "Acceptable inputs: \"ApiControl\", \"UserControl\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "apicontrol" => Some(AdminControl::ApiControl),
            "usercontrol" => Some(AdminControl::UserControl),
            _ => None,
        }
    }
}

/// Which thread dispatches session events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum OperationModel {
    #[default]
    ApiDispatch,
    UserDispatch,
}

impl Vocabulary for OperationModel {
    const ACCEPTED: &'static str = "Acceptable inputs: \"ApiDispatch\", \"UserDispatch\".";

    fn lookup(keyword: &str) -> Option<Self> {
        match keyword {
            "apidispatch" => Some(OperationModel::ApiDispatch),
            "userdispatch" => Some(OperationModel::UserDispatch),
            _ => None,
        }
    }
}

/// Parse a capability given either as an `MMT_*` name or a number.
pub fn parse_capability(field: &str, raw: &str) -> Result<u16, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<u16>() {
        return Ok(number);
    }
    CAPABILITY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, value)| *value)
        .ok_or_else(|| {
            ConfigError::invalid_value(
                field,
                raw,
                "Acceptable inputs: an \"MMT_*\" domain name or a numeric domain type.",
            )
        })
}
