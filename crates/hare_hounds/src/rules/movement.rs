//! Move legality.

use crate::{Animal, Board, MoveError, PositionId};
use tracing::instrument;

/// Checks a move against the board graph and the piece's movement rule.
///
/// Checks run in a fixed order and the first failure is returned:
/// missing destination, empty origin, occupied destination, same node,
/// not adjacent, hound moving left. Hares move freely along edges.
#[instrument(skip(board))]
pub fn validate_move(
    board: &Board,
    from: PositionId,
    to: Option<PositionId>,
) -> Result<(), MoveError> {
    let to = to.ok_or(MoveError::MissingDestination)?;

    let piece = board.occupant(from).ok_or(MoveError::EmptyOrigin(from))?;

    if board.position(to).is_occupied() {
        return Err(MoveError::Occupied(to));
    }

    if from == to {
        return Err(MoveError::SamePosition(from));
    }

    let origin = board.position(from);
    if !origin.is_adjacent_to(to) {
        return Err(MoveError::NotAdjacent { from, to });
    }

    match piece.animal() {
        Animal::Hound if board.position(to).x() < origin.x() => {
            Err(MoveError::HoundRetreat { from, to })
        }
        Animal::Hound | Animal::Hare => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layout, Placement};

    fn board(hare: PositionId, hounds: [PositionId; 3]) -> Board {
        Board::with_placement(Layout::default(), Placement::new(hare, hounds).unwrap())
    }

    #[test]
    fn test_rejects_missing_destination() {
        let board = Board::new();
        assert_eq!(
            validate_move(&board, PositionId::OuterLeft, None),
            Err(MoveError::MissingDestination)
        );
    }

    #[test]
    fn test_rejects_empty_origin() {
        let board = Board::new();
        assert_eq!(
            validate_move(&board, PositionId::Middle, Some(PositionId::Top)),
            Err(MoveError::EmptyOrigin(PositionId::Middle))
        );
    }

    #[test]
    fn test_occupied_checked_before_same_position() {
        // Dropping a piece on its own node reports the node as occupied.
        let board = Board::new();
        assert_eq!(
            validate_move(&board, PositionId::OuterRight, Some(PositionId::OuterRight)),
            Err(MoveError::Occupied(PositionId::OuterRight))
        );
    }

    #[test]
    fn test_hound_cannot_retreat() {
        let board = board(
            PositionId::OuterRight,
            [PositionId::Middle, PositionId::Top, PositionId::Bottom],
        );
        assert_eq!(
            validate_move(&board, PositionId::Middle, Some(PositionId::MiddleLeft)),
            Err(MoveError::HoundRetreat {
                from: PositionId::Middle,
                to: PositionId::MiddleLeft
            })
        );
        assert!(validate_move(&board, PositionId::Middle, Some(PositionId::MiddleRight)).is_ok());
    }

    #[test]
    fn test_hound_may_move_vertically() {
        let board = Board::new();
        assert!(validate_move(&board, PositionId::TopLeft, Some(PositionId::MiddleLeft)).is_ok());
    }

    #[test]
    fn test_hare_may_move_left() {
        let board = board(
            PositionId::Middle,
            [PositionId::OuterLeft, PositionId::TopLeft, PositionId::BottomLeft],
        );
        assert!(validate_move(&board, PositionId::Middle, Some(PositionId::MiddleLeft)).is_ok());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let board = Board::new();
        for from in PositionId::ALL {
            for to in PositionId::ALL {
                assert_eq!(
                    validate_move(&board, from, Some(to)),
                    validate_move(&board, from, Some(to))
                );
            }
        }
    }
}
