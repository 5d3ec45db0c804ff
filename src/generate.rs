//! Generators turning a resolved snapshot into protocol-ready artifacts.
//!
//! Generators only read the snapshot, so calling one twice gives equal
//! output.

mod connection;
mod directory;
mod login;
mod role;

pub use connection::connection_list;
pub use directory::{directory_cache, directory_refresh, NIPROVIDER_DIRECTORY_STREAM_ID};
pub use login::{login_request, LOGIN_STREAM_ID};
pub use role::{role_options, RoleOptions};

use crate::directory::DirectoryCache;
use crate::error::ConfigError;
use crate::protocol::{ConnectionList, DirectoryRefresh, LoginRequest};
use crate::resolve::Snapshot;

impl Snapshot {
    pub fn connection_list(&self) -> ConnectionList {
        connection_list(self)
    }

    pub fn login_request(&self) -> LoginRequest {
        login_request(self)
    }

    pub fn directory_cache(&self) -> Result<DirectoryCache, ConfigError> {
        directory_cache(self)
    }

    pub fn directory_refresh(&self) -> Result<Option<DirectoryRefresh>, ConfigError> {
        directory_refresh(self)
    }

    pub fn role_options(&self) -> Result<RoleOptions, ConfigError> {
        role_options(self)
    }
}
