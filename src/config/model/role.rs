//! Consumer, non-interactive provider and interactive provider roles.

use super::{set, set_some};
use crate::config::entity::Named;
use crate::config::method::MethodSettings;
use crate::config::tree::FieldReader;
use crate::error::{ConfigError, EntityKind};
use crate::protocol::ReconnectPolicy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RoleKind {
    #[default]
    Consumer,
    NiProvider,
    IProvider,
}

impl RoleKind {
    pub const ALL: [RoleKind; 3] = [RoleKind::Consumer, RoleKind::NiProvider, RoleKind::IProvider];

    pub fn group_key(self) -> &'static str {
        match self {
            RoleKind::Consumer => "ConsumerGroup",
            RoleKind::NiProvider => "NiProviderGroup",
            RoleKind::IProvider => "IProviderGroup",
        }
    }

    pub fn list_key(self) -> &'static str {
        match self {
            RoleKind::Consumer => "ConsumerList",
            RoleKind::NiProvider => "NiProviderList",
            RoleKind::IProvider => "IProviderList",
        }
    }

    pub fn default_key(self) -> &'static str {
        match self {
            RoleKind::Consumer => "DefaultConsumer",
            RoleKind::NiProvider => "DefaultNiProvider",
            RoleKind::IProvider => "DefaultIProvider",
        }
    }

    /// Name given to a role synthesized when none is configured.
    pub fn default_role_name(self) -> &'static str {
        match self {
            RoleKind::Consumer => "DefaultEmaConsumer",
            RoleKind::NiProvider => "DefaultEmaNiProvider",
            RoleKind::IProvider => "DefaultEmaIProvider",
        }
    }

    pub fn entity_kind(self) -> EntityKind {
        match self {
            RoleKind::Consumer => EntityKind::Consumer,
            RoleKind::NiProvider => EntityKind::NiProvider,
            RoleKind::IProvider => EntityKind::IProvider,
        }
    }

    /// Port used when a host is given without one.
    pub fn default_port(self) -> &'static str {
        match self {
            RoleKind::Consumer | RoleKind::IProvider => "14002",
            RoleKind::NiProvider => "14003",
        }
    }

    /// Interactive providers listen on a server; the others connect over channels.
    pub fn uses_server(self) -> bool {
        self == RoleKind::IProvider
    }

    pub fn is_provider(self) -> bool {
        self != RoleKind::Consumer
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.entity_kind(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleTuning {
    pub item_count_hint: u32,
    pub service_count_hint: u32,
    pub max_dispatch_count_api_thread: u32,
    pub max_dispatch_count_user_thread: u32,
    /// Microseconds; -1 waits forever.
    pub dispatch_timeout_api_thread: i64,
    pub request_timeout: u32,
    pub post_ack_timeout: u32,
    pub max_outstanding_posts: u32,
    pub obey_open_window: bool,
    pub msg_key_in_updates: bool,
    pub login_request_timeout: u32,
    pub directory_request_timeout: u32,
    pub dictionary_request_timeout: u32,
    pub enable_rtt: bool,
}

/// Wire tracing switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlTrace {
    pub to_stdout: bool,
    pub to_file: bool,
    pub to_multiple_files: bool,
    pub write: bool,
    pub read: bool,
    pub ping: bool,
    pub file_name: String,
    pub max_file_size: u64,
}

/// Provider-only behaviour flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPolicy {
    pub refresh_first_required: bool,
    pub merge_source_directory_streams: bool,
    pub recover_user_submit_source_directory: bool,
    pub remove_items_on_disconnect: bool,
    pub field_dictionary_fragment_size: u32,
    pub enum_type_fragment_size: u32,
    pub accept_message_without_being_login: bool,
    pub accept_message_without_accepting_requests: bool,
    pub accept_dir_message_without_min_filters: bool,
    pub accept_message_without_qos_in_range: bool,
    pub accept_message_same_key_but_diff_stream: bool,
    pub accept_message_that_changes_service: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleConfig {
    pub kind: RoleKind,
    pub name: String,
    /// Channels tried in order. Unused by interactive providers.
    pub channel_set: Vec<String>,
    pub server: Option<String>,
    pub logger: Option<String>,
    pub dictionary: Option<String>,
    pub directory: Option<String>,
    pub tuning: RoleTuning,
    pub reconnect: ReconnectPolicy,
    pub xml_trace: XmlTrace,
    pub provider: ProviderPolicy,
    /// Values only the method layer can set.
    pub method: MethodSettings,
}

impl Named for RoleConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

impl RoleConfig {
    /// Human readable reference used in error messages.
    pub fn describe(&self) -> String {
        format!("{} '{}'", self.kind, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolePatch {
    pub kind: RoleKind,
    pub name: String,
    pub channel: Option<String>,
    pub channel_set: Option<Vec<String>>,
    pub server: Option<String>,
    pub logger: Option<String>,
    pub dictionary: Option<String>,
    pub directory: Option<String>,

    pub item_count_hint: Option<u32>,
    pub service_count_hint: Option<u32>,
    pub max_dispatch_count_api_thread: Option<u32>,
    pub max_dispatch_count_user_thread: Option<u32>,
    pub dispatch_timeout_api_thread: Option<i64>,
    pub request_timeout: Option<u32>,
    pub post_ack_timeout: Option<u32>,
    pub max_outstanding_posts: Option<u32>,
    pub obey_open_window: Option<bool>,
    pub msg_key_in_updates: Option<bool>,
    pub login_request_timeout: Option<u32>,
    pub directory_request_timeout: Option<u32>,
    pub dictionary_request_timeout: Option<u32>,
    pub enable_rtt: Option<bool>,

    pub reconnect_attempt_limit: Option<i64>,
    pub reconnect_min_delay: Option<i64>,
    pub reconnect_max_delay: Option<i64>,

    pub xml_trace_to_stdout: Option<bool>,
    pub xml_trace_to_file: Option<bool>,
    pub xml_trace_to_multiple_files: Option<bool>,
    pub xml_trace_write: Option<bool>,
    pub xml_trace_read: Option<bool>,
    pub xml_trace_ping: Option<bool>,
    pub xml_trace_file_name: Option<String>,
    pub xml_trace_max_file_size: Option<u64>,

    pub refresh_first_required: Option<bool>,
    pub merge_source_directory_streams: Option<bool>,
    pub recover_user_submit_source_directory: Option<bool>,
    pub remove_items_on_disconnect: Option<bool>,
    pub field_dictionary_fragment_size: Option<u32>,
    pub enum_type_fragment_size: Option<u32>,
    pub accept_message_without_being_login: Option<bool>,
    pub accept_message_without_accepting_requests: Option<bool>,
    pub accept_dir_message_without_min_filters: Option<bool>,
    pub accept_message_without_qos_in_range: Option<bool>,
    pub accept_message_same_key_but_diff_stream: Option<bool>,
    pub accept_message_that_changes_service: Option<bool>,
}

impl RolePatch {
    pub fn new(kind: RoleKind, name: impl Into<String>) -> Self {
        RolePatch {
            kind,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Read the fields a role of `kind` understands.
    pub(crate) fn read(
        kind: RoleKind,
        name: &str,
        reader: &mut FieldReader<'_>,
    ) -> Result<Self, ConfigError> {
        let mut patch = RolePatch::new(kind, name);

        if kind.uses_server() {
            patch.server = reader.name("Server")?;
        } else {
            patch.channel = reader.name("Channel")?;
            patch.channel_set = reader.name_list("ChannelSet")?;
        }
        patch.logger = reader.name("Logger")?;
        match kind {
            RoleKind::Consumer => {
                patch.dictionary = reader.name("Dictionary")?;
                patch.post_ack_timeout = reader.u32("PostAckTimeout")?;
                patch.max_outstanding_posts = reader.u32("MaxOutstandingPosts")?;
                patch.obey_open_window = reader.bool("ObeyOpenWindow")?;
                patch.msg_key_in_updates = reader.bool("MsgKeyInUpdates")?;
                patch.directory_request_timeout = reader.u32("DirectoryRequestTimeOut")?;
                patch.dictionary_request_timeout = reader.u32("DictionaryRequestTimeOut")?;
            }
            RoleKind::NiProvider => {
                patch.directory = reader.name("Directory")?;
                patch.merge_source_directory_streams =
                    reader.bool("MergeSourceDirectoryStreams")?;
                patch.recover_user_submit_source_directory =
                    reader.bool("RecoverUserSubmitSourceDirectory")?;
                patch.refresh_first_required = reader.bool("RefreshFirstRequired")?;
                patch.remove_items_on_disconnect = reader.bool("RemoveItemsOnDisconnect")?;
            }
            RoleKind::IProvider => {
                patch.directory = reader.name("Directory")?;
                patch.refresh_first_required = reader.bool("RefreshFirstRequired")?;
                patch.field_dictionary_fragment_size =
                    reader.u32("FieldDictionaryFragmentSize")?;
                patch.enum_type_fragment_size = reader.u32("EnumTypeFragmentSize")?;
                patch.accept_message_without_being_login =
                    reader.bool("AcceptMessageWithoutBeingLogin")?;
                patch.accept_message_without_accepting_requests =
                    reader.bool("AcceptMessageWithoutAcceptingRequests")?;
                patch.accept_dir_message_without_min_filters =
                    reader.bool("AcceptDirMessageWithoutMinFilters")?;
                patch.accept_message_without_qos_in_range =
                    reader.bool("AcceptMessageWithoutQosInRange")?;
                patch.accept_message_same_key_but_diff_stream =
                    reader.bool("AcceptMessageSameKeyButDiffStream")?;
                patch.accept_message_that_changes_service =
                    reader.bool("AcceptMessageThatChangesService")?;
            }
        }

        patch.item_count_hint = reader.u32("ItemCountHint")?;
        patch.service_count_hint = reader.u32("ServiceCountHint")?;
        patch.max_dispatch_count_api_thread = reader.u32("MaxDispatchCountApiThread")?;
        patch.max_dispatch_count_user_thread = reader.u32("MaxDispatchCountUserThread")?;
        patch.dispatch_timeout_api_thread = reader.i64("DispatchTimeoutApiThread")?;
        patch.request_timeout = reader.u32("RequestTimeout")?;
        patch.login_request_timeout = reader.u32("LoginRequestTimeOut")?;
        patch.enable_rtt = reader.bool("EnableRtt")?;

        patch.reconnect_attempt_limit = reader.i64("ReconnectAttemptLimit")?;
        patch.reconnect_min_delay = reader.i64("ReconnectMinDelay")?;
        patch.reconnect_max_delay = reader.i64("ReconnectMaxDelay")?;

        patch.xml_trace_to_stdout = reader.bool("XmlTraceToStdout")?;
        patch.xml_trace_to_file = reader.bool("XmlTraceToFile")?;
        patch.xml_trace_to_multiple_files = reader.bool("XmlTraceToMultipleFiles")?;
        patch.xml_trace_write = reader.bool("XmlTraceWrite")?;
        patch.xml_trace_read = reader.bool("XmlTraceRead")?;
        patch.xml_trace_ping = reader.bool("XmlTracePing")?;
        patch.xml_trace_file_name = reader.string("XmlTraceFileName")?;
        patch.xml_trace_max_file_size = reader.u64("XmlTraceMaxFileSize")?;

        Ok(patch)
    }

    /// Apply the explicitly set fields on top of `role`.
    pub fn apply(&self, role: &mut RoleConfig) {
        // ChannelSet wins over Channel within one overlay.
        if let Some(set) = &self.channel_set {
            role.channel_set = set.clone();
        } else if let Some(channel) = &self.channel {
            role.channel_set = vec![channel.clone()];
        }
        set_some(&mut role.server, &self.server);
        set_some(&mut role.logger, &self.logger);
        set_some(&mut role.dictionary, &self.dictionary);
        set_some(&mut role.directory, &self.directory);

        let tuning = &mut role.tuning;
        set(&mut tuning.item_count_hint, &self.item_count_hint);
        set(&mut tuning.service_count_hint, &self.service_count_hint);
        set(&mut tuning.max_dispatch_count_api_thread, &self.max_dispatch_count_api_thread);
        set(&mut tuning.max_dispatch_count_user_thread, &self.max_dispatch_count_user_thread);
        set(&mut tuning.dispatch_timeout_api_thread, &self.dispatch_timeout_api_thread);
        set(&mut tuning.request_timeout, &self.request_timeout);
        set(&mut tuning.post_ack_timeout, &self.post_ack_timeout);
        set(&mut tuning.max_outstanding_posts, &self.max_outstanding_posts);
        set(&mut tuning.obey_open_window, &self.obey_open_window);
        set(&mut tuning.msg_key_in_updates, &self.msg_key_in_updates);
        set(&mut tuning.login_request_timeout, &self.login_request_timeout);
        set(&mut tuning.directory_request_timeout, &self.directory_request_timeout);
        set(&mut tuning.dictionary_request_timeout, &self.dictionary_request_timeout);
        set(&mut tuning.enable_rtt, &self.enable_rtt);

        set(&mut role.reconnect.attempt_limit, &self.reconnect_attempt_limit);
        set(&mut role.reconnect.min_delay_ms, &self.reconnect_min_delay);
        set(&mut role.reconnect.max_delay_ms, &self.reconnect_max_delay);

        let trace = &mut role.xml_trace;
        set(&mut trace.to_stdout, &self.xml_trace_to_stdout);
        set(&mut trace.to_file, &self.xml_trace_to_file);
        set(&mut trace.to_multiple_files, &self.xml_trace_to_multiple_files);
        set(&mut trace.write, &self.xml_trace_write);
        set(&mut trace.read, &self.xml_trace_read);
        set(&mut trace.ping, &self.xml_trace_ping);
        set(&mut trace.file_name, &self.xml_trace_file_name);
        set(&mut trace.max_file_size, &self.xml_trace_max_file_size);

        let policy = &mut role.provider;
        set(&mut policy.refresh_first_required, &self.refresh_first_required);
        set(&mut policy.merge_source_directory_streams, &self.merge_source_directory_streams);
        set(
            &mut policy.recover_user_submit_source_directory,
            &self.recover_user_submit_source_directory,
        );
        set(&mut policy.remove_items_on_disconnect, &self.remove_items_on_disconnect);
        set(&mut policy.field_dictionary_fragment_size, &self.field_dictionary_fragment_size);
        set(&mut policy.enum_type_fragment_size, &self.enum_type_fragment_size);
        set(
            &mut policy.accept_message_without_being_login,
            &self.accept_message_without_being_login,
        );
        set(
            &mut policy.accept_message_without_accepting_requests,
            &self.accept_message_without_accepting_requests,
        );
        set(
            &mut policy.accept_dir_message_without_min_filters,
            &self.accept_dir_message_without_min_filters,
        );
        set(
            &mut policy.accept_message_without_qos_in_range,
            &self.accept_message_without_qos_in_range,
        );
        set(
            &mut policy.accept_message_same_key_but_diff_stream,
            &self.accept_message_same_key_but_diff_stream,
        );
        set(
            &mut policy.accept_message_that_changes_service,
            &self.accept_message_that_changes_service,
        );
    }
}
