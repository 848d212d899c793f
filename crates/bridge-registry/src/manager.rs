//! Process-wide session registry
//!
//! [`SessionRegistry`] is the single owner of record for the client
//! connection and every call, conversation and message the host refers to by
//! identifier. Commands from the host and callbacks from the communication
//! engine reach it from different threads with no outer coordination; each
//! mapping and the client slot synchronize themselves.
//!
//! The registry never decides when an entry goes away. Whoever observes a
//! terminal event (call ended, message deleted, conversation closed) removes
//! the entry.

use std::sync::OnceLock;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::config::RegistryConfig;
use crate::handles::{
    Call2Handle, CallHandle, ConversationHandle, MessageHandle, SharedCall, SharedCall2,
    SharedClient, SharedConversation, SharedMessage,
};
use crate::store::ObjectRegistry;
use crate::view_options::ViewOptions;

/// Global session registry
static SESSION_REGISTRY: OnceLock<SessionRegistry> = OnceLock::new();

/// Get the process-wide registry, creating it on first access.
///
/// The instance lives for the rest of the process. Shutdown is done by
/// removing entries and clearing the client, not by dropping the registry.
pub fn get_global_registry() -> &'static SessionRegistry {
    SESSION_REGISTRY.get_or_init(|| {
        let config = RegistryConfig::from_env();
        info!(
            growth_warning_threshold = config.growth_warning_threshold,
            "Initializing session registry"
        );
        SessionRegistry::new(config)
    })
}

/// Entry counts, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Whether a client connection is set
    pub client_connected: bool,
    /// Registered calls
    pub calls: usize,
    /// Registered legacy calls
    pub call2s: usize,
    /// Registered conversations
    pub conversations: usize,
    /// Registered messages
    pub messages: usize,
    /// Calls with view options
    pub view_options: usize,
}

/// Identifier-to-object table shared by the host bridge and the engine
#[derive(Debug)]
pub struct SessionRegistry {
    client: RwLock<Option<SharedClient>>,
    calls: ObjectRegistry<SharedCall>,
    call2s: ObjectRegistry<SharedCall2>,
    conversations: ObjectRegistry<SharedConversation>,
    messages: ObjectRegistry<SharedMessage>,
    view_options: ObjectRegistry<ViewOptions>,
}

impl SessionRegistry {
    /// Create a standalone registry.
    ///
    /// Most callers want [`SessionRegistry::instance`]; separate instances are
    /// for embedding several bridges in one process and for tests.
    pub fn new(config: RegistryConfig) -> Self {
        let threshold = config.growth_warning_threshold;
        Self {
            client: RwLock::new(None),
            calls: ObjectRegistry::new("calls", threshold),
            call2s: ObjectRegistry::new("call2s", threshold),
            conversations: ObjectRegistry::new("conversations", threshold),
            messages: ObjectRegistry::new("messages", threshold),
            view_options: ObjectRegistry::new("view_options", threshold),
        }
    }

    /// The process-wide registry
    pub fn instance() -> &'static SessionRegistry {
        get_global_registry()
    }

    /// Current client connection, if one is set
    pub fn client(&self) -> Option<SharedClient> {
        self.client.read().clone()
    }

    /// Whether a client connection is set
    pub fn has_client(&self) -> bool {
        self.client.read().is_some()
    }

    /// Install the client connection, returning the one it replaces
    pub fn set_client(&self, client: SharedClient) -> Option<SharedClient> {
        let previous = self.client.write().replace(client);
        if previous.is_some() {
            info!("Replaced client connection");
        } else {
            info!("Client connection set");
        }
        previous
    }

    /// Drop the registry's client reference on disconnect or teardown
    pub fn clear_client(&self) -> Option<SharedClient> {
        let previous = self.client.write().take();
        if previous.is_some() {
            info!("Client connection cleared");
        }
        previous
    }

    /// Current-generation calls by call id
    pub fn calls(&self) -> &ObjectRegistry<SharedCall> {
        &self.calls
    }

    /// Legacy-generation calls by call id
    pub fn call2s(&self) -> &ObjectRegistry<SharedCall2> {
        &self.call2s
    }

    /// Conversations by conversation id
    pub fn conversations(&self) -> &ObjectRegistry<SharedConversation> {
        &self.conversations
    }

    /// Messages by message id
    pub fn messages(&self) -> &ObjectRegistry<SharedMessage> {
        &self.messages
    }

    /// View options by call id
    pub fn view_options(&self) -> &ObjectRegistry<ViewOptions> {
        &self.view_options
    }

    /// Register a call under its own identifier
    pub fn register_call(&self, call: SharedCall) -> Option<SharedCall> {
        let id = call.call_id().to_string();
        self.calls.insert(id, call)
    }

    /// Register a legacy call under its own identifier
    pub fn register_call2(&self, call: SharedCall2) -> Option<SharedCall2> {
        let id = call.call_id().to_string();
        self.call2s.insert(id, call)
    }

    /// Register a conversation under its own identifier
    pub fn register_conversation(&self, conversation: SharedConversation) -> Option<SharedConversation> {
        let id = conversation.conversation_id().to_string();
        self.conversations.insert(id, conversation)
    }

    /// Register a message under its own identifier
    pub fn register_message(&self, message: SharedMessage) -> Option<SharedMessage> {
        let id = message.message_id().to_string();
        self.messages.insert(id, message)
    }

    /// Entry counts per mapping
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            client_connected: self.has_client(),
            calls: self.calls.len(),
            call2s: self.call2s.len(),
            conversations: self.conversations.len(),
            messages: self.messages.len(),
            view_options: self.view_options.len(),
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
