//! Boundary to the matchmaking and relay service.
//!
//! The service pairs two clients, relays move payloads between them and
//! reports when the opponent leaves. A client only sees the messages it
//! sends and the events it receives.

use derive_more::{Display, Error};
use hare_hounds::{InboundEvent, OutboundMessage};
use tracing::instrument;

/// Players a Hare and Hounds match needs.
pub const MATCH_PLAYERS: u8 = 2;

/// A connection to the relay service.
#[async_trait::async_trait]
pub trait Actor: Send {
    /// Hands a message to the service.
    async fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError>;

    /// Leaves the current match; the opponent receives a withdrawal.
    async fn withdraw(&mut self) -> Result<(), TransportError>;

    /// Waits for the next event. `None` once the service is gone.
    async fn next_event(&mut self) -> Option<InboundEvent>;

    /// Name this client registered with.
    fn name(&self) -> &str;
}

/// Transport failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
