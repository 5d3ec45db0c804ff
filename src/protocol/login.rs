//! Login request payload.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoginRole {
    Consumer,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginAttrib {
    pub application_id: String,
    pub application_name: String,
    pub position: Option<String>,
    pub single_open: bool,
    pub allow_suspect_data: bool,
    pub provide_permission_profile: bool,
    pub support_round_trip_latency_monitoring: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub stream_id: i32,
    pub role: LoginRole,
    pub user_name: String,
    pub password: Option<String>,
    pub attrib: LoginAttrib,
}
