//! Game rules for Hare and Hounds.
//!
//! Pure functions over a [`Board`](crate::Board): which moves are legal
//! and who, if anyone, has won. Kept apart from board storage so the
//! board's mutating operations stay small.

pub mod movement;
pub mod win;

pub use movement::validate_move;
pub use win::{MOVE_LIMIT, evaluate_winner, hare_broke_through, hare_encircled};
