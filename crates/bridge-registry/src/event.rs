//! Event classification for the host bridge
//!
//! Every event sent to the host carries an [`EventType`] tag next to its
//! payload. The receiving side dispatches on the tag alone, without looking
//! at the payload's shape.
//!
//! On the wire an event is a JSON object:
//!
//! ```json
//! { "nativeEventType": 1, "event": "didChangeSignalingState", "uuid": "c-1", "body": { } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};

/// Subsystem an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EventType {
    /// Client connection events (connect, disconnect, incoming call, ...)
    ClientEvent,
    /// Events of current-generation calls
    CallEvent,
    /// Events of legacy-generation calls
    Call2Event,
}

impl EventType {
    /// All tags, in encoding order
    pub const ALL: [EventType; 3] = [EventType::ClientEvent, EventType::CallEvent, EventType::Call2Event];

    /// Integer encoding used on the bridge
    pub const fn code(self) -> u8 {
        match self {
            EventType::ClientEvent => 0,
            EventType::CallEvent => 1,
            EventType::Call2Event => 2,
        }
    }
}

impl From<EventType> for u8 {
    fn from(event_type: EventType) -> Self {
        event_type.code()
    }
}

impl TryFrom<u8> for EventType {
    type Error = RegistryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::ClientEvent),
            1 => Ok(EventType::CallEvent),
            2 => Ok(EventType::Call2Event),
            value => Err(RegistryError::UnknownEventType { value }),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::ClientEvent => write!(f, "ClientEvent"),
            EventType::CallEvent => write!(f, "CallEvent"),
            EventType::Call2Event => write!(f, "Call2Event"),
        }
    }
}

/// Event as it crosses the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeEvent {
    /// Routing tag
    #[serde(rename = "nativeEventType")]
    pub event_type: EventType,
    /// Event name understood by the host
    pub event: String,
    /// Host-side identifier of the client instance the event is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Payload, produced and consumed outside the registry
    #[serde(default)]
    pub body: Value,
}

impl BridgeEvent {
    /// Create an event with an empty body
    pub fn new(event_type: EventType, event: impl Into<String>) -> Self {
        Self {
            event_type,
            event: event.into(),
            uuid: None,
            body: Value::Null,
        }
    }

    /// Client connection event
    pub fn client(event: impl Into<String>) -> Self {
        Self::new(EventType::ClientEvent, event)
    }

    /// Current-generation call event
    pub fn call(event: impl Into<String>) -> Self {
        Self::new(EventType::CallEvent, event)
    }

    /// Legacy-generation call event
    pub fn call2(event: impl Into<String>) -> Self {
        Self::new(EventType::Call2Event, event)
    }

    /// Attach the host-side client identifier
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Attach the payload
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Encode for the bridge
    pub fn to_json(&self) -> RegistryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode an event received from the bridge
    pub fn from_json(raw: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Hand the event to the handler method matching its tag
    pub fn dispatch<H: BridgeEventHandler + ?Sized>(&self, handler: &H) {
        tracing::trace!(event_type = %self.event_type, event = %self.event, "Dispatching bridge event");
        match self.event_type {
            EventType::ClientEvent => handler.on_client_event(self),
            EventType::CallEvent => handler.on_call_event(self),
            EventType::Call2Event => handler.on_call2_event(self),
        }
    }
}

/// Receiver of classified bridge events
///
/// Methods default to ignoring the event, so a handler implements only the
/// subsystems it cares about.
pub trait BridgeEventHandler: Send + Sync {
    /// Client connection event
    fn on_client_event(&self, _event: &BridgeEvent) {}

    /// Current-generation call event
    fn on_call_event(&self, _event: &BridgeEvent) {}

    /// Legacy-generation call event
    fn on_call2_event(&self, _event: &BridgeEvent) {}
}
