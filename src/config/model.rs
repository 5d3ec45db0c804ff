//! Configuration entities and the overlay patches that update them.
//!
//! A patch mirrors its entity with every field optional: `Some` means the
//! overlay set the field explicitly, `None` means it said nothing about it.

mod channel;
mod dictionary;
mod directory;
mod logger;
mod role;
mod server;

pub use channel::{ChannelConfig, ChannelPatch};
pub use dictionary::{DictionaryConfig, DictionaryPatch};
pub use directory::{
    DirectoryConfig, DirectoryPatch, InfoPatch, LoadPatch, ServiceConfig, ServicePatch, StatePatch,
};
pub use logger::{LoggerConfig, LoggerPatch};
pub use role::{ProviderPolicy, RoleConfig, RoleKind, RolePatch, RoleTuning, XmlTrace};
pub use server::{ServerConfig, ServerPatch};

/// Overwrite `target` when the overlay carries a value.
pub(crate) fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Overwrite an optional `target` when the overlay carries a value.
pub(crate) fn set_some<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}
