//! Stream/data state and status codes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StreamState {
    Unspecified = 0,
    Open = 1,
    NonStreaming = 2,
    ClosedRecover = 3,
    Closed = 4,
    ClosedRedirected = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataState {
    NoChange = 0,
    Ok = 1,
    Suspect = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusCode {
    None = 0,
    NotFound = 1,
    Timeout = 2,
    NotAuthorized = 3,
    InvalidArgument = 4,
    UsageError = 5,
    Preempted = 6,
    JustInTimeConflationStarted = 7,
    TickByTickResumed = 8,
    FailoverStarted = 9,
    FailoverCompleted = 10,
    GapDetected = 11,
    NoResources = 12,
    TooManyItems = 13,
    AlreadyOpen = 14,
    SourceUnknown = 15,
    NotOpen = 16,
    NonUpdatingItem = 19,
    UnsupportedViewType = 20,
    InvalidView = 21,
    FullViewProvided = 22,
    UnableToRequestAsBatch = 23,
    NoBatchViewSupportInReq = 26,
    ExceededMaxMountsPerUser = 27,
    Error = 28,
    DacsDown = 29,
    UserUnknownToPermSys = 30,
    DacsMaxLoginsReached = 31,
    DacsUserAccessToAppDenied = 32,
    GapFill = 34,
    AppAuthorizationFailed = 35,
}

impl StatusCode {
    pub(crate) const ALL: [StatusCode; 31] = [
        StatusCode::None,
        StatusCode::NotFound,
        StatusCode::Timeout,
        StatusCode::NotAuthorized,
        StatusCode::InvalidArgument,
        StatusCode::UsageError,
        StatusCode::Preempted,
        StatusCode::JustInTimeConflationStarted,
        StatusCode::TickByTickResumed,
        StatusCode::FailoverStarted,
        StatusCode::FailoverCompleted,
        StatusCode::GapDetected,
        StatusCode::NoResources,
        StatusCode::TooManyItems,
        StatusCode::AlreadyOpen,
        StatusCode::SourceUnknown,
        StatusCode::NotOpen,
        StatusCode::NonUpdatingItem,
        StatusCode::UnsupportedViewType,
        StatusCode::InvalidView,
        StatusCode::FullViewProvided,
        StatusCode::UnableToRequestAsBatch,
        StatusCode::NoBatchViewSupportInReq,
        StatusCode::ExceededMaxMountsPerUser,
        StatusCode::Error,
        StatusCode::DacsDown,
        StatusCode::UserUnknownToPermSys,
        StatusCode::DacsMaxLoginsReached,
        StatusCode::DacsUserAccessToAppDenied,
        StatusCode::GapFill,
        StatusCode::AppAuthorizationFailed,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Stream state, data state, code and text of a status block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub stream_state: StreamState,
    pub data_state: DataState,
    pub code: StatusCode,
    pub text: String,
}

impl State {
    pub fn new(
        stream_state: StreamState,
        data_state: DataState,
        code: StatusCode,
        text: impl Into<String>,
    ) -> Self {
        State {
            stream_state,
            data_state,
            code,
            text: text.into(),
        }
    }

    pub fn open_ok(text: impl Into<String>) -> Self {
        State::new(StreamState::Open, DataState::Ok, StatusCode::None, text)
    }
}

impl Default for State {
    fn default() -> Self {
        State::open_ok("")
    }
}
