//! First-class board invariants.
//!
//! Invariants are logical properties that must hold after every board
//! operation. The board checks them in debug builds after each move,
//! and they can be tested on their own.

use super::board::Board;
use super::position::PositionId;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Adjacency is symmetric and irreflexive.
pub struct SymmetricAdjacency;

impl Invariant<Board> for SymmetricAdjacency {
    fn holds(board: &Board) -> bool {
        board.positions().iter().all(|position| {
            position.adjacent().iter().all(|other| {
                *other != position.id() && board.position(*other).is_adjacent_to(position.id())
            })
        })
    }

    fn description() -> &'static str {
        "Adjacency is symmetric and no position neighbours itself"
    }
}

/// Every placed piece's position points back at it, and every occupant
/// points back at its position.
pub struct OccupancyConsistent;

impl Invariant<Board> for OccupancyConsistent {
    fn holds(board: &Board) -> bool {
        let pieces_agree = board.pieces().iter().all(|piece| match piece.try_position() {
            Some(at) => board.position(at).piece() == Some(piece.id()),
            None => true,
        });

        let positions_agree = PositionId::ALL.into_iter().all(|id| {
            match board.position(id).piece() {
                Some(piece) => board.piece(piece).try_position() == Some(id),
                None => true,
            }
        });

        pieces_agree && positions_agree
    }

    fn description() -> &'static str {
        "Piece and position occupancy references agree"
    }
}

/// The move counter equals the length of the move history.
pub struct CounterMatchesHistory;

impl Invariant<Board> for CounterMatchesHistory {
    fn holds(board: &Board) -> bool {
        board.move_counter() as usize == board.history().len()
    }

    fn description() -> &'static str {
        "Move counter matches number of executed moves"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (SymmetricAdjacency, OccupancyConsistent, CounterMatchesHistory);
