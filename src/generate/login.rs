use crate::config::RoleKind;
use crate::protocol::{LoginAttrib, LoginRequest, LoginRole};
use crate::resolve::Snapshot;
use tracing::debug;

pub const LOGIN_STREAM_ID: i32 = 1;

const DEFAULT_APPLICATION_ID: &str = "256";
const DEFAULT_APPLICATION_NAME: &str = "ema";
const FALLBACK_USER_NAME: &str = "user";

/// Name of the user running the process.
fn system_user_name() -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|value| !value.is_empty()))
        .unwrap_or_else(|| FALLBACK_USER_NAME.to_string())
}

/// Login request for the snapshot's role.
///
/// Fields set in an admin login payload win; method-level values fill what
/// the payload leaves unset, then defaults.
pub fn login_request(snapshot: &Snapshot) -> LoginRequest {
    let role = &snapshot.role;
    let method = &role.method;
    let admin = method.admin_login.clone().unwrap_or_default();

    let user_name = admin
        .user_name
        .or_else(|| method.user_name.clone())
        .unwrap_or_else(system_user_name);
    let request = LoginRequest {
        stream_id: LOGIN_STREAM_ID,
        role: match role.kind {
            RoleKind::Consumer => LoginRole::Consumer,
            RoleKind::NiProvider | RoleKind::IProvider => LoginRole::Provider,
        },
        user_name,
        password: admin.password.or_else(|| method.password.clone()),
        attrib: LoginAttrib {
            application_id: admin
                .application_id
                .or_else(|| method.application_id.clone())
                .unwrap_or_else(|| DEFAULT_APPLICATION_ID.to_string()),
            application_name: admin
                .application_name
                .or_else(|| method.application_name.clone())
                .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string()),
            position: admin.position.or_else(|| method.position.clone()),
            single_open: admin.single_open.unwrap_or(true),
            allow_suspect_data: admin.allow_suspect_data.unwrap_or(true),
            provide_permission_profile: admin.provide_permission_profile.unwrap_or(false),
            support_round_trip_latency_monitoring: role.kind == RoleKind::Consumer
                && role.tuning.enable_rtt,
        },
    };
    debug!(role = %role.describe(), user = %request.user_name, "Generated login request");
    request
}
