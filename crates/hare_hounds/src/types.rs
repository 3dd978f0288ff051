//! Core domain types for Hare and Hounds.

use serde::{Deserialize, Serialize};

/// The two kinds of animal a piece (and a player) can be.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
    /// The single hare, trying to slip past the hounds.
    #[display("hare")]
    Hare,
    /// One of the three hounds (always moves first).
    #[display("hound")]
    Hound,
}

impl Animal {
    /// Returns the opposing animal.
    pub fn opponent(self) -> Self {
        match self {
            Animal::Hare => Animal::Hound,
            Animal::Hound => Animal::Hare,
        }
    }
}

/// Lifecycle of a match as seen from the local client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchStatus {
    /// No match has started yet (or the board was reset).
    #[default]
    NotStarted,
    /// Match running, local player to move.
    LocalTurn,
    /// Match running, remote player to move.
    RemoteTurn,
    /// A winner was determined.
    Finished,
    /// The remote player withdrew.
    Abandoned,
}

impl MatchStatus {
    /// True while either side holds the turn.
    pub fn is_in_progress(self) -> bool {
        matches!(self, MatchStatus::LocalTurn | MatchStatus::RemoteTurn)
    }

    /// True once the match can be reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Abandoned)
    }
}

/// Which client a move or a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Side {
    /// The player sitting at this client.
    #[display("local")]
    Local,
    /// The opponent on the other end of the transport.
    #[display("remote")]
    Remote,
}

impl Side {
    /// Status value meaning "this side holds the turn".
    pub fn turn_status(self) -> MatchStatus {
        match self {
            Side::Local => MatchStatus::LocalTurn,
            Side::Remote => MatchStatus::RemoteTurn,
        }
    }
}

/// Screen coordinates of a board position.
///
/// Serialized as a two-element array `[x, y]`, which is the shape the
/// move payload uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
#[display("({x}, {y})")]
pub struct Point {
    /// Horizontal coordinate; hounds may never decrease it.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from this point to an arbitrary screen coordinate.
    pub fn distance_to(self, x: f64, y: f64) -> f64 {
        (x - f64::from(self.x)).hypot(y - f64::from(self.y))
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [i32; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}
