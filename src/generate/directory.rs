use crate::config::{AdminControl, RoleKind};
use crate::directory::{build_directory_cache, DirectoryCache};
use crate::error::ConfigError;
use crate::protocol::{DirectoryRefresh, FilterFlags, State, DIRECTORY_REFRESH_TEXT};
use crate::resolve::Snapshot;
use tracing::debug;

/// Source directory stream used by non-interactive providers.
pub const NIPROVIDER_DIRECTORY_STREAM_ID: i32 = -1;

fn require_provider(snapshot: &Snapshot) -> Result<(), ConfigError> {
    if snapshot.kind().is_provider() {
        Ok(())
    } else {
        Err(ConfigError::InvalidUsage(format!(
            "{} has no source directory",
            snapshot.role.describe()
        )))
    }
}

/// Directory cache of a provider role. Empty when the application answers
/// directory requests itself.
pub fn directory_cache(snapshot: &Snapshot) -> Result<DirectoryCache, ConfigError> {
    require_provider(snapshot)?;
    let Some(directory) = &snapshot.directory else {
        return Ok(DirectoryCache::empty(""));
    };
    if snapshot.role.method.admin_control() == AdminControl::UserControl {
        debug!(role = %snapshot.role.describe(), "Directory under user control; cache left empty");
        return Ok(DirectoryCache::empty(directory.name.clone()));
    }
    build_directory_cache(directory, &snapshot.dictionaries)
}

/// Directory refresh a provider publishes, or `None` under user control.
pub fn directory_refresh(snapshot: &Snapshot) -> Result<Option<DirectoryRefresh>, ConfigError> {
    require_provider(snapshot)?;
    let method = &snapshot.role.method;
    if method.admin_control() == AdminControl::UserControl {
        return Ok(None);
    }

    let cache = directory_cache(snapshot)?;
    let admin = method.admin_directory.clone().unwrap_or_default();
    let services = admin.services.unwrap_or(cache.services);
    let filter = admin.filter.unwrap_or_else(|| {
        services
            .iter()
            .fold(FilterFlags::NONE, |flags, service| flags | service.filter())
    });

    let refresh = DirectoryRefresh {
        stream_id: match snapshot.kind() {
            RoleKind::NiProvider => NIPROVIDER_DIRECTORY_STREAM_ID,
            RoleKind::Consumer | RoleKind::IProvider => 0,
        },
        filter,
        clear_cache: admin.clear_cache.unwrap_or(true),
        solicited: snapshot.kind() == RoleKind::IProvider,
        state: admin
            .state
            .unwrap_or_else(|| State::open_ok(DIRECTORY_REFRESH_TEXT)),
        services,
    };
    debug!(
        role = %snapshot.role.describe(),
        services = refresh.services.len(),
        filter = refresh.filter.bits(),
        "Generated directory refresh"
    );
    Ok(Some(refresh))
}
