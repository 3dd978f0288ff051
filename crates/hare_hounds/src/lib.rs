//! Hare and Hounds rules engine.
//!
//! A pure, synchronous model of the two-player board game: an eleven-node
//! graph, one hare and three hounds, turn handling and win detection.
//! Rendering and networking live outside this crate and talk to it
//! through [`Board`] and the [`protocol`] types.
//!
//! # Example
//!
//! ```
//! use hare_hounds::{Board, MatchStatus, PlayerDescriptor, PositionId, Side};
//!
//! let mut board = Board::new();
//! board
//!     .start_match(&[
//!         PlayerDescriptor::new("Ana", "a", "1"),
//!         PlayerDescriptor::new("Bia", "b", "2"),
//!     ])
//!     .unwrap();
//!
//! let payload = board
//!     .move_piece(PositionId::BottomLeft, PositionId::MiddleLeft, Side::Local)
//!     .unwrap();
//! assert!(payload.is_some());
//! assert_eq!(board.status(), MatchStatus::RemoteTurn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod invariants;
mod piece;
mod placement;
mod player;
mod position;
pub mod protocol;
pub mod rules;
mod topology;
mod types;

pub use action::{MatchError, Move, MoveError};
pub use board::Board;
pub use piece::{Piece, PieceId};
pub use placement::{Placement, PlacementError};
pub use player::{FIRST_MOVER_ORDER, Player, PlayerDescriptor};
pub use position::{Position, PositionId};
pub use protocol::{InboundEvent, MoveResult, MoveStatus, OutboundMessage};
pub use topology::{EDGES, Layout, LayoutError, Topology, TopologyError};
pub use types::{Animal, MatchStatus, Point, Side};
