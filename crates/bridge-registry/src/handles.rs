//! Seams for the communication engine's native objects
//!
//! The registry never inspects the objects it stores. It only needs them to
//! be shareable across the command-dispatch thread and the engine's callback
//! threads, and to report the identifier the engine assigned to them.

use std::fmt::Debug;
use std::sync::Arc;

/// Authenticated connection to the communication backend
pub trait ClientHandle: Send + Sync + Debug {
    /// User the connection authenticated as, once known
    fn user_id(&self) -> Option<&str> {
        None
    }
}

/// Call object of the current protocol generation
pub trait CallHandle: Send + Sync + Debug {
    /// Identifier assigned by the engine
    fn call_id(&self) -> &str;
}

/// Call object of the legacy protocol generation
pub trait Call2Handle: Send + Sync + Debug {
    /// Identifier assigned by the engine
    fn call_id(&self) -> &str;
}

/// Conversation object (participants and state stay internal to it)
pub trait ConversationHandle: Send + Sync + Debug {
    /// Identifier assigned by the engine
    fn conversation_id(&self) -> &str;
}

/// Message object, usually alive only while an operation on it is pending
pub trait MessageHandle: Send + Sync + Debug {
    /// Identifier assigned by the engine
    fn message_id(&self) -> &str;
}

/// Shared reference to the client connection
pub type SharedClient = Arc<dyn ClientHandle>;
/// Shared reference to a call
pub type SharedCall = Arc<dyn CallHandle>;
/// Shared reference to a legacy call
pub type SharedCall2 = Arc<dyn Call2Handle>;
/// Shared reference to a conversation
pub type SharedConversation = Arc<dyn ConversationHandle>;
/// Shared reference to a message
pub type SharedMessage = Arc<dyn MessageHandle>;
