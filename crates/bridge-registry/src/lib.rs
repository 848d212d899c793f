//! # Bridge Registry - identifier table for host-bridged sessions
//!
//! A host application talks to the communication engine through a narrow
//! command/event bridge and refers to live objects by opaque string
//! identifiers. This crate is the process-wide table behind those
//! identifiers:
//!
//! - the single client connection
//! - calls and legacy-generation calls
//! - conversations and messages
//! - per-call view options
//!
//! plus the [`EventType`] tag that routes events across the bridge.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rvoip_bridge_registry::{CallHandle, SessionRegistry, ViewOptions};
//!
//! #[derive(Debug)]
//! struct EngineCall { id: String }
//!
//! impl CallHandle for EngineCall {
//!     fn call_id(&self) -> &str { &self.id }
//! }
//!
//! let registry = SessionRegistry::instance();
//! registry.register_call(Arc::new(EngineCall { id: "doc-call-1".into() }));
//! registry.view_options().insert("doc-call-1", ViewOptions::new().with_mirror(true));
//!
//! // Later, from an engine callback thread
//! if let Some(call) = registry.calls().get("doc-call-1") {
//!     assert_eq!(call.call_id(), "doc-call-1");
//! }
//!
//! // Terminal event: the caller removes what it registered
//! registry.calls().remove("doc-call-1");
//! registry.view_options().remove("doc-call-1");
//! ```
//!
//! ## Concurrency
//!
//! Every operation is synchronous, O(1) for point access, and never waits on
//! the network. Each mapping synchronizes itself, so the command-dispatch
//! thread and any number of engine callback threads may use the registry at
//! once. Callers needing to wait for an object to appear must poll with their
//! own timeout.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod handles;
pub mod logging;
pub mod manager;
pub mod store;
pub mod view_options;

// Re-export main types
pub use config::RegistryConfig;
pub use error::{validate_id, RegistryError, RegistryResult};
pub use event::{BridgeEvent, BridgeEventHandler, EventType};
pub use handles::{
    Call2Handle, CallHandle, ClientHandle, ConversationHandle, MessageHandle, SharedCall,
    SharedCall2, SharedClient, SharedConversation, SharedMessage,
};
pub use logging::{setup_logging, LoggingConfig};
pub use manager::{get_global_registry, RegistryStats, SessionRegistry};
pub use store::ObjectRegistry;
pub use view_options::{ScalingType, ViewOption, ViewOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
