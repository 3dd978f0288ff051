//! Wire contract with the remote peer.
//!
//! The transport is an opaque message channel. It delivers three kinds
//! of event to a client and accepts two kinds of message from it. Moves
//! travel as JSON, addressed by node coordinates.

use super::player::PlayerDescriptor;
use super::types::{Animal, Point};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Whether the match continues after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    /// The opponent moves next.
    Next,
    /// The move decided the match.
    Finished,
}

/// Outcome of a local move, relayed to the remote peer.
///
/// ```json
/// {"from_pos":[440,560],"to_pos":[440,360],"winner":null,"match_status":"next"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Coordinates of the origin node.
    pub from_pos: Point,
    /// Coordinates of the destination node.
    pub to_pos: Point,
    /// Winning animal, if the move ended the match.
    pub winner: Option<Animal>,
    /// `finished` when `winner` is set, `next` otherwise.
    pub match_status: MoveStatus,
}

impl MoveResult {
    /// Builds the payload, deriving the status from the winner.
    pub fn new(from_pos: Point, to_pos: Point, winner: Option<Animal>) -> Self {
        let match_status = if winner.is_some() {
            MoveStatus::Finished
        } else {
            MoveStatus::Next
        };
        Self {
            from_pos,
            to_pos,
            winner,
            match_status,
        }
    }

    /// Encodes the payload for the transport.
    #[instrument]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a payload received from the transport.
    #[instrument]
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Notifications the transport delivers to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Two clients were paired. The local player's descriptor comes first.
    MatchStarted {
        /// Local descriptor, then remote descriptor.
        players: [PlayerDescriptor; 2],
    },
    /// The opponent moved.
    MoveReceived {
        /// The opponent's move result.
        payload: MoveResult,
    },
    /// The opponent left the match.
    Withdrawal,
}

/// Messages a client hands to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Ask to be paired with another client.
    StartMatchRequest {
        /// Number of players the match needs.
        players: u8,
    },
    /// Relay a local move to the opponent.
    SendMove {
        /// The local move result.
        payload: MoveResult,
    },
}
