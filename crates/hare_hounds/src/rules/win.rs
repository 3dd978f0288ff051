//! Win detection.

use crate::{Animal, Board};
use tracing::{debug, instrument};

/// Number of executed moves after which the hare wins by holding out.
pub const MOVE_LIMIT: u32 = 50;

/// True if no hound stands strictly left of the hare.
#[instrument(skip(board))]
pub fn hare_broke_through(board: &Board) -> bool {
    let hare_x = board.position(board.hare().position()).x();
    board
        .hounds()
        .all(|hound| board.position(hound.position()).x() >= hare_x)
}

/// True if every neighbour of the hare is occupied.
#[instrument(skip(board))]
pub fn hare_encircled(board: &Board) -> bool {
    board
        .position(board.hare().position())
        .adjacent()
        .iter()
        .all(|id| board.position(*id).is_occupied())
}

/// Decides the winner after a move, if any.
///
/// The hare check runs first and the hound check second, so a board
/// where both hold reports the hounds.
#[instrument(skip(board), fields(move_counter = board.move_counter()))]
pub fn evaluate_winner(board: &Board) -> Option<Animal> {
    let mut winner = None;

    if hare_broke_through(board) || board.move_counter() >= MOVE_LIMIT {
        winner = Some(Animal::Hare);
    }

    if hare_encircled(board) {
        winner = Some(Animal::Hound);
    }

    debug!(?winner, "Evaluated winner");
    winner
}
