//! Protocol-facing records populated from resolved configuration.
//!
//! These are plain data descriptions of what the transport and codec layers
//! consume (connect/bind options, login and directory payloads). Nothing in
//! this module encodes or sends anything.

pub mod connect;
pub mod login;
pub mod qos;
pub mod rdm;
pub mod service;
pub mod state;

pub use connect::{
    BindOptions, ConnectInfo, ConnectOptions, ConnectionEntry, ConnectionList, ProxyOptions,
    ReconnectPolicy, ServerBindInfo, TlsOptions,
};
pub use login::{LoginAttrib, LoginRequest, LoginRole};
pub use qos::{Qos, Rate, Timeliness};
pub use rdm::{FilterFlags, DIRECTORY_REFRESH_TEXT};
pub use service::{DirectoryRefresh, Service, ServiceInfo, ServiceLoad, ServiceState};
pub use state::{DataState, State, StatusCode, StreamState};
