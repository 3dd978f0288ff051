//! First-class move and error types.
//!
//! A move is a request to slide the piece standing on `from` to `to`.
//! Rejections are ordinary values: the caller shows a message and
//! snaps the piece back.

use super::position::PositionId;
use super::types::{Animal, MatchStatus, Point, Side};
use serde::{Deserialize, Serialize};

/// A single-step move between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Origin node.
    pub from: PositionId,
    /// Destination node.
    pub to: PositionId,
}

impl Move {
    /// Creates a move.
    pub fn new(from: PositionId, to: PositionId) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The piece was dropped outside every node.
    #[display("No destination position")]
    MissingDestination,

    /// Nothing stands on the origin.
    #[display("No piece on {}", _0)]
    EmptyOrigin(PositionId),

    /// The destination already holds a piece.
    #[display("Position {} is already occupied", _0)]
    Occupied(PositionId),

    /// Origin and destination are the same node.
    #[display("Piece dropped back on {}", _0)]
    SamePosition(PositionId),

    /// The nodes are not connected.
    #[display("{} is not adjacent to {}", to, from)]
    NotAdjacent {
        /// Origin.
        from: PositionId,
        /// Destination.
        to: PositionId,
    },

    /// Hounds may never move towards their home side.
    #[display("Hounds cannot move back from {} to {}", from, to)]
    HoundRetreat {
        /// Origin.
        from: PositionId,
        /// Destination.
        to: PositionId,
    },

    /// No match is running.
    #[display("Match is not in progress ({:?})", _0)]
    MatchNotInProgress(MatchStatus),

    /// The side asking to move does not hold the turn.
    #[display("It's not the {} player's turn", _0)]
    NotYourTurn(Side),

    /// The piece belongs to the other player.
    #[display("The {} player cannot move a {}", side, animal)]
    NotYourPiece {
        /// Who tried to move.
        side: Side,
        /// Kind of the piece they grabbed.
        animal: Animal,
    },

    /// A remote payload named coordinates that match no node.
    #[display("No position at {}", _0)]
    UnknownCoordinates(Point),
}

impl std::error::Error for MoveError {}

/// Why a match could not be started.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// A match is already running on this board.
    #[display("A match is already in progress")]
    AlreadyInProgress,

    /// The descriptors do not name exactly one first mover.
    #[display("Expected exactly one first mover, found {}", _0)]
    InvalidOrder(usize),
}

impl std::error::Error for MatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoveError::Occupied(PositionId::TopLeft).to_string(),
            "Position top-left is already occupied"
        );
        assert_eq!(
            MoveError::HoundRetreat {
                from: PositionId::Middle,
                to: PositionId::MiddleLeft
            }
            .to_string(),
            "Hounds cannot move back from middle to middle-left"
        );
        assert_eq!(Move::new(PositionId::Top, PositionId::Middle).to_string(), "top -> middle");
    }
}
