//! Board positions: the named nodes of the graph and their runtime state.

use super::piece::PieceId;
use super::types::Point;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Handle naming one of the eleven nodes of the board.
///
/// The board is a three-row, five-column lattice with the four corner
/// cells removed. Discriminant order is the arena index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum PositionId {
    /// Leftmost node, the hounds' home.
    OuterLeft,
    /// Left column, top row.
    TopLeft,
    /// Left column, middle row.
    MiddleLeft,
    /// Left column, bottom row.
    BottomLeft,
    /// Centre column, top row.
    Top,
    /// Centre of the board; the only node with diagonals.
    Middle,
    /// Centre column, bottom row.
    Bottom,
    /// Right column, top row.
    TopRight,
    /// Right column, middle row.
    MiddleRight,
    /// Right column, bottom row.
    BottomRight,
    /// Rightmost node, the hare's home.
    OuterRight,
}

impl PositionId {
    /// Number of nodes on the board.
    pub const COUNT: usize = 11;

    /// All nodes in arena order.
    pub const ALL: [PositionId; Self::COUNT] = [
        PositionId::OuterLeft,
        PositionId::TopLeft,
        PositionId::MiddleLeft,
        PositionId::BottomLeft,
        PositionId::Top,
        PositionId::Middle,
        PositionId::Bottom,
        PositionId::TopRight,
        PositionId::MiddleRight,
        PositionId::BottomRight,
        PositionId::OuterRight,
    ];

    /// Index into the position arena.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PositionId::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label, also accepted by [`PositionId::from_label`].
    pub fn label(self) -> &'static str {
        match self {
            PositionId::OuterLeft => "outer-left",
            PositionId::TopLeft => "top-left",
            PositionId::MiddleLeft => "middle-left",
            PositionId::BottomLeft => "bottom-left",
            PositionId::Top => "top",
            PositionId::Middle => "middle",
            PositionId::Bottom => "bottom",
            PositionId::TopRight => "top-right",
            PositionId::MiddleRight => "middle-right",
            PositionId::BottomRight => "bottom-right",
            PositionId::OuterRight => "outer-right",
        }
    }

    /// Parses a label (`"top-left"`, `"top_left"`, `"Top Left"`) or an arena index.
    #[instrument]
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }

        let normalized: String = s
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|id| id.label() == normalized)
    }

    /// Lattice cell as `(column, row)` offsets from the centre, each in `-2..=2` / `-1..=1`.
    pub fn cell(self) -> (i32, i32) {
        match self {
            PositionId::OuterLeft => (-2, 0),
            PositionId::TopLeft => (-1, -1),
            PositionId::MiddleLeft => (-1, 0),
            PositionId::BottomLeft => (-1, 1),
            PositionId::Top => (0, -1),
            PositionId::Middle => (0, 0),
            PositionId::Bottom => (0, 1),
            PositionId::TopRight => (1, -1),
            PositionId::MiddleRight => (1, 0),
            PositionId::BottomRight => (1, 1),
            PositionId::OuterRight => (2, 0),
        }
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A node of the board graph with its coordinates, neighbours and occupant.
///
/// The occupant is a non-owning handle; the board keeps it consistent
/// with the piece's own position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    id: PositionId,
    point: Point,
    adjacent: Vec<PositionId>,
    piece: Option<PieceId>,
}

impl Position {
    /// Creates an unconnected, empty position.
    pub fn new(id: PositionId, point: Point) -> Self {
        Self {
            id,
            point,
            adjacent: Vec::new(),
            piece: None,
        }
    }

    /// Which node this is.
    pub fn id(&self) -> PositionId {
        self.id
    }

    /// Screen coordinates.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> i32 {
        self.point.x
    }

    /// Vertical coordinate.
    pub fn y(&self) -> i32 {
        self.point.y
    }

    /// Neighbours in insertion order.
    pub fn adjacent(&self) -> &[PositionId] {
        &self.adjacent
    }

    /// True if `other` is a neighbour.
    pub fn is_adjacent_to(&self, other: PositionId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Handle of the occupying piece, if any.
    pub fn piece(&self) -> Option<PieceId> {
        self.piece
    }

    /// True if a piece stands here.
    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }

    pub(crate) fn set_piece(&mut self, piece: Option<PieceId>) {
        self.piece = piece;
    }

    pub(crate) fn add_adjacent(&mut self, other: PositionId) {
        if !self.adjacent.contains(&other) {
            self.adjacent.push(other);
        }
    }
}
