//! Board graph construction.
//!
//! The adjacency list below is the only source of truth for move
//! legality. Coordinates come from a [`Layout`] and are used for
//! hit-testing, rendering and the hound direction rule.

use super::position::{Position, PositionId};
use super::types::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Every undirected edge of the board, listed once.
pub const EDGES: [(PositionId, PositionId); 22] = [
    (PositionId::OuterLeft, PositionId::TopLeft),
    (PositionId::OuterLeft, PositionId::MiddleLeft),
    (PositionId::OuterLeft, PositionId::BottomLeft),
    (PositionId::Top, PositionId::TopLeft),
    (PositionId::Top, PositionId::TopRight),
    (PositionId::MiddleRight, PositionId::TopRight),
    (PositionId::MiddleRight, PositionId::BottomRight),
    (PositionId::Bottom, PositionId::BottomLeft),
    (PositionId::Bottom, PositionId::BottomRight),
    (PositionId::MiddleLeft, PositionId::TopLeft),
    (PositionId::MiddleLeft, PositionId::BottomLeft),
    (PositionId::Middle, PositionId::Top),
    (PositionId::Middle, PositionId::Bottom),
    (PositionId::Middle, PositionId::MiddleLeft),
    (PositionId::Middle, PositionId::MiddleRight),
    (PositionId::Middle, PositionId::TopLeft),
    (PositionId::Middle, PositionId::TopRight),
    (PositionId::Middle, PositionId::BottomLeft),
    (PositionId::Middle, PositionId::BottomRight),
    (PositionId::OuterRight, PositionId::TopRight),
    (PositionId::OuterRight, PositionId::MiddleRight),
    (PositionId::OuterRight, PositionId::BottomRight),
];

/// Geometry of the board on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Coordinates of the middle node.
    pub center: Point,
    /// Distance in pixels between neighbouring columns and rows.
    pub gap: i32,
    /// Hit-test radius around each node.
    pub pick_radius: i32,
}

impl Layout {
    /// Creates a layout.
    pub const fn new(center: Point, gap: i32, pick_radius: i32) -> Self {
        Self {
            center,
            gap,
            pick_radius,
        }
    }

    /// Screen coordinates of a node.
    ///
    /// Saturates at the `i32` bounds; [`Layout::validate`] rejects layouts
    /// where that would happen.
    pub fn point_of(&self, id: PositionId) -> Point {
        let (column, row) = id.cell();
        Point::new(
            self.center.x.saturating_add(column.saturating_mul(self.gap)),
            self.center.y.saturating_add(row.saturating_mul(self.gap)),
        )
    }

    /// Checks that nodes lie left to right, hit circles do not overlap and
    /// every coordinate fits in an `i32`.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.pick_radius <= 0 {
            return Err(LayoutError::PickRadius(self.pick_radius));
        }
        if self.gap <= self.pick_radius {
            return Err(LayoutError::Gap {
                gap: self.gap,
                pick_radius: self.pick_radius,
            });
        }
        for id in PositionId::ALL {
            let (column, row) = id.cell();
            let x = column
                .checked_mul(self.gap)
                .and_then(|dx| self.center.x.checked_add(dx));
            let y = row
                .checked_mul(self.gap)
                .and_then(|dy| self.center.y.checked_add(dy));
            if x.is_none() || y.is_none() {
                return Err(LayoutError::OutOfRange(id));
            }
        }
        Ok(())
    }
}

/// A layout the board cannot be drawn or played on.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LayoutError {
    /// The hit-test radius is zero or negative.
    #[display("Pick radius must be positive, got {}", _0)]
    PickRadius(i32),
    /// Nodes would overlap or run right to left.
    #[display("Layout gap ({}) must exceed the pick radius ({})", gap, pick_radius)]
    Gap {
        /// Configured gap.
        gap: i32,
        /// Configured pick radius.
        pick_radius: i32,
    },
    /// A node's coordinates overflow.
    #[display("Coordinates of {} do not fit the coordinate range", _0)]
    OutOfRange(PositionId),
}

impl std::error::Error for LayoutError {}

impl Default for Layout {
    /// A 1280x720 canvas with 200 px between nodes.
    fn default() -> Self {
        Self::new(Point::new(640, 360), 200, 40)
    }
}

/// Error raised while wiring the graph.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TopologyError {
    /// Tried to connect a node to itself.
    #[display("Position {} cannot be adjacent to itself", _0)]
    SelfLoop(PositionId),
}

impl std::error::Error for TopologyError {}

/// The position arena, indexed by [`PositionId::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    positions: Vec<Position>,
}

impl Topology {
    /// Creates all eleven positions without any edges.
    #[instrument]
    pub fn unconnected(layout: &Layout) -> Self {
        Self {
            positions: PositionId::ALL
                .into_iter()
                .map(|id| Position::new(id, layout.point_of(id)))
                .collect(),
        }
    }

    /// Builds the fixed Hare and Hounds graph.
    #[instrument]
    pub fn standard(layout: &Layout) -> Self {
        let mut topology = Self::unconnected(layout);
        for (a, b) in EDGES {
            topology.link(a, b);
        }
        debug!(edges = EDGES.len(), "Board graph built");
        topology
    }

    /// Adds the undirected edge `a`–`b`. Adding an existing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::SelfLoop`] if `a == b`.
    #[instrument(skip(self))]
    pub fn connect(&mut self, a: PositionId, b: PositionId) -> Result<(), TopologyError> {
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        self.link(a, b);
        Ok(())
    }

    fn link(&mut self, a: PositionId, b: PositionId) {
        debug_assert_ne!(a, b, "self-loop in edge list");
        self.positions[a.index()].add_adjacent(b);
        self.positions[b.index()].add_adjacent(a);
    }

    /// All positions in arena order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Looks up a position.
    pub fn get(&self, id: PositionId) -> &Position {
        &self.positions[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: PositionId) -> &mut Position {
        &mut self.positions[id.index()]
    }

    /// Each edge once, as `(lower, higher)` by arena order.
    pub fn edges(&self) -> Vec<(PositionId, PositionId)> {
        let mut edges: Vec<_> = self
            .positions
            .iter()
            .flat_map(|p| {
                p.adjacent()
                    .iter()
                    .filter(move |other| p.id() < **other)
                    .map(move |other| (p.id(), *other))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Removes every occupant.
    pub(crate) fn clear_occupancy(&mut self) {
        for position in &mut self.positions {
            position.set_piece(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_coordinates() {
        let layout = Layout::default();
        assert_eq!(layout.point_of(PositionId::OuterLeft), Point::new(240, 360));
        assert_eq!(layout.point_of(PositionId::TopLeft), Point::new(440, 160));
        assert_eq!(layout.point_of(PositionId::Middle), Point::new(640, 360));
        assert_eq!(layout.point_of(PositionId::BottomRight), Point::new(840, 560));
        assert_eq!(layout.point_of(PositionId::OuterRight), Point::new(1040, 360));
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert_eq!(Layout::default().validate(), Ok(()));
    }

    #[test]
    fn test_layout_rejects_non_positive_radius() {
        let layout = Layout::new(Point::new(640, 360), -200, -300);
        assert_eq!(layout.validate(), Err(LayoutError::PickRadius(-300)));
        let layout = Layout::new(Point::new(640, 360), 200, 0);
        assert_eq!(layout.validate(), Err(LayoutError::PickRadius(0)));
    }

    #[test]
    fn test_layout_rejects_negative_gap() {
        let layout = Layout::new(Point::new(640, 360), -200, 40);
        assert_eq!(
            layout.validate(),
            Err(LayoutError::Gap {
                gap: -200,
                pick_radius: 40
            })
        );
    }

    #[test]
    fn test_layout_rejects_overflowing_coordinates() {
        let layout = Layout::new(Point::new(640, 360), 2_000_000_000, 40);
        assert_eq!(
            layout.validate(),
            Err(LayoutError::OutOfRange(PositionId::OuterLeft))
        );

        let layout = Layout::new(Point::new(i32::MAX - 100, 360), 200, 40);
        assert!(matches!(layout.validate(), Err(LayoutError::OutOfRange(_))));
    }

    #[test]
    fn test_largest_valid_gap() {
        // OuterLeft and OuterRight sit two gaps from the centre.
        let gap = i32::MAX / 2;
        assert_eq!(Layout::new(Point::new(0, 0), gap, 40).validate(), Ok(()));
        assert!(Layout::new(Point::new(0, 0), gap + 1, 40).validate().is_err());
    }

    #[test]
    fn test_point_of_saturates() {
        let layout = Layout::new(Point::new(640, 360), 2_000_000_000, 40);
        assert_eq!(layout.point_of(PositionId::OuterLeft).x, i32::MIN + 640);
        assert_eq!(layout.point_of(PositionId::OuterRight).x, i32::MAX);
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let mut topology = Topology::unconnected(&Layout::default());
        assert_eq!(
            topology.connect(PositionId::Top, PositionId::Top),
            Err(TopologyError::SelfLoop(PositionId::Top))
        );
        assert!(topology.get(PositionId::Top).adjacent().is_empty());
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut topology = Topology::unconnected(&Layout::default());
        topology.connect(PositionId::Top, PositionId::TopLeft).unwrap();
        assert!(topology.get(PositionId::Top).is_adjacent_to(PositionId::TopLeft));
        assert!(topology.get(PositionId::TopLeft).is_adjacent_to(PositionId::Top));
    }

    #[test]
    fn test_standard_degrees() {
        let topology = Topology::standard(&Layout::default());
        let degree = |id: PositionId| topology.get(id).adjacent().len();

        assert_eq!(degree(PositionId::Middle), 8);
        assert_eq!(degree(PositionId::OuterLeft), 3);
        assert_eq!(degree(PositionId::OuterRight), 3);
        assert_eq!(degree(PositionId::Top), 3);
        assert_eq!(degree(PositionId::Bottom), 3);
        assert_eq!(degree(PositionId::MiddleLeft), 4);
        assert_eq!(degree(PositionId::TopLeft), 4);
        assert_eq!(topology.edges().len(), EDGES.len());
    }

    #[test]
    fn test_outer_left_not_adjacent_to_middle() {
        let topology = Topology::standard(&Layout::default());
        assert!(!topology.get(PositionId::OuterLeft).is_adjacent_to(PositionId::Middle));
    }
}
