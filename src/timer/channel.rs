//! Message channel between the countdown controller and its host

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::state::TimerSettings;

/// Messages exchanged with the host.
///
/// Serialized as `{"event": "<name>", "payload": ...}` using the event names
/// the host already understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum HostMessage {
    /// Host → controller: start a new run, superseding any current one
    StartTimer(TimerSettings),
    /// Controller → host: a pause was requested
    Pause,
    /// Controller → host: block until the host says whether to stay paused
    PauseWait,
    /// Controller → host: terminate the application
    Exit,
}

impl HostMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            HostMessage::StartTimer(_) => "start-timer",
            HostMessage::Pause => "pause",
            HostMessage::PauseWait => "pause-wait",
            HostMessage::Exit => "exit",
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host channel closed")]
    Disconnected,

    #[error("Unexpected reply to {event}: {reply}")]
    UnexpectedReply { event: &'static str, reply: Value },

    #[error("{0} cannot be sent this way")]
    Unsupported(&'static str),

    #[error("Host state unavailable: {0}")]
    State(String),
}

/// Capability the controller uses to talk to its host.
///
/// Inbound messages are not part of this trait; they are delivered to
/// whoever drives the controller (see the interval timer task).
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Fire-and-forget notification
    async fn notify(&self, message: HostMessage) -> Result<(), HostError>;

    /// Request that suspends until the host replies
    async fn request(&self, message: HostMessage) -> Result<Value, HostError>;
}
