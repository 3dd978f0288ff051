//! Plain-text board rendering for the terminal.

use hare_hounds::{Animal, Board, PositionId};
use tracing::instrument;

/// Symbol for an empty node.
const EMPTY: char = '.';

fn symbol(board: &Board, id: PositionId) -> char {
    match board.occupant(id).map(|piece| piece.animal()) {
        Some(Animal::Hare) => 'H',
        Some(Animal::Hound) => 'D',
        None => EMPTY,
    }
}

/// Draws the lattice, one text row per board row.
///
/// ```text
///       D   .   .
///   D   .   .   .   H
///       D   .   .
/// ```
#[instrument(skip(board))]
pub fn render_board(board: &Board) -> String {
    let mut rows = Vec::with_capacity(3);
    for row in -1..=1 {
        let mut line = String::new();
        for column in -2..=2 {
            let cell = PositionId::ALL
                .into_iter()
                .find(|id| id.cell() == (column, row));
            let c = cell.map_or(' ', |id| symbol(board, id));
            line.push_str(&format!("  {c} "));
        }
        rows.push(line.trim_end().to_string());
    }
    rows.join("\n")
}

/// One line per node: label, coordinates, occupant and neighbours.
#[instrument(skip(board))]
pub fn render_topology(board: &Board) -> String {
    board
        .positions()
        .iter()
        .map(|position| {
            let neighbours: Vec<_> = position.adjacent().iter().map(|id| id.label()).collect();
            format!(
                "{:<13} {:<11} {}  -> {}",
                position.id().label(),
                position.point().to_string(),
                symbol(board, position.id()),
                neighbours.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
