//! Pieces: one hare and three hounds, each bound to a board position.

use super::position::PositionId;
use super::types::Animal;
use serde::{Deserialize, Serialize};

/// Handle into the board's piece arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[display("piece #{_0}")]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    /// The hare is always the first piece.
    pub const HARE: PieceId = PieceId(0);

    /// Index into the piece arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// An animal token.
///
/// The position is only `None` between construction and the first
/// placement; pieces are never removed from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    animal: Animal,
    position: Option<PositionId>,
}

impl Piece {
    /// Creates an unplaced piece.
    pub fn new(id: PieceId, animal: Animal) -> Self {
        Self {
            id,
            animal,
            position: None,
        }
    }

    /// Arena handle.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// The piece's kind.
    pub fn animal(&self) -> Animal {
        self.animal
    }

    /// Current position.
    ///
    /// # Panics
    ///
    /// Panics if the piece was never placed, which means board setup is broken.
    pub fn position(&self) -> PositionId {
        match self.position {
            Some(position) => position,
            None => panic!("{} ({}) queried before being placed", self.id, self.animal),
        }
    }

    /// Current position, or `None` before the first placement.
    pub fn try_position(&self) -> Option<PositionId> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: PositionId) {
        self.position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "queried before being placed")]
    fn test_unplaced_piece_fails_fast() {
        let piece = Piece::new(PieceId(1), Animal::Hound);
        let _ = piece.position();
    }

    #[test]
    fn test_set_position() {
        let mut piece = Piece::new(PieceId::HARE, Animal::Hare);
        assert_eq!(piece.try_position(), None);
        piece.set_position(PositionId::OuterRight);
        assert_eq!(piece.position(), PositionId::OuterRight);
    }
}
