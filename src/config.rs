//! Session configuration model and the layered merge engine.
//!
//! Configuration arrives as generic trees (file and programmatic layers)
//! and as method-level override records. Trees are read into [`Overlay`]s,
//! folded into a [`ConfigSet`] by [`merge_overlays`], and the selected role
//! receives the method layer through [`apply_method_layer`].

pub mod defaults;
pub mod entity;
mod merge;
pub mod method;
mod model;
mod tree;
mod vocabulary;

pub use entity::{EntityMap, Named};
pub use merge::{apply_method_layer, merge_overlays, ConfigSet, RoleSelection};
pub use method::{
    AdminDirectoryRefresh, AdminLoginRequest, HostPort, MethodLayer, MethodOverride,
    MethodSettings,
};
pub use model::{
    ChannelConfig, ChannelPatch, DictionaryConfig, DictionaryPatch, DirectoryConfig,
    DirectoryPatch, InfoPatch, LoadPatch, LoggerConfig, LoggerPatch, ProviderPolicy, RoleConfig,
    RoleKind, RolePatch, RoleTuning, ServerConfig, ServerPatch, ServiceConfig, ServicePatch,
    StatePatch, XmlTrace,
};
pub use tree::{DefaultNames, Overlay};
pub use vocabulary::{
    parse_capability, AdminControl, CompressionType, ConnectionType, DictionaryMode, LoggerLevel,
    LoggerType, OperationModel, Vocabulary,
};
