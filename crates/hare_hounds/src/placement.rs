//! Starting placement of the pieces.

use super::position::PositionId;
use serde::{Deserialize, Serialize};

/// Where the hare and the three hounds stand when a board is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    hare: PositionId,
    hounds: [PositionId; 3],
}

/// A placement that puts two pieces on one node.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Placement puts more than one piece on {}", _0)]
pub struct PlacementError(pub PositionId);

impl std::error::Error for PlacementError {}

impl Placement {
    /// Hounds on the left edge, hare on the far right.
    pub const STANDARD: Placement = Placement {
        hare: PositionId::OuterRight,
        hounds: [
            PositionId::OuterLeft,
            PositionId::TopLeft,
            PositionId::BottomLeft,
        ],
    };

    /// Creates a custom placement.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError`] if any two pieces share a node.
    pub fn new(hare: PositionId, hounds: [PositionId; 3]) -> Result<Self, PlacementError> {
        let all = [hare, hounds[0], hounds[1], hounds[2]];
        for (i, a) in all.iter().enumerate() {
            if all[i + 1..].contains(a) {
                return Err(PlacementError(*a));
            }
        }
        Ok(Self { hare, hounds })
    }

    /// The hare's node.
    pub fn hare(&self) -> PositionId {
        self.hare
    }

    /// The hounds' nodes.
    pub fn hounds(&self) -> [PositionId; 3] {
        self.hounds
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_shared_node() {
        let result = Placement::new(
            PositionId::Middle,
            [PositionId::Top, PositionId::Middle, PositionId::Bottom],
        );
        assert_eq!(result, Err(PlacementError(PositionId::Middle)));
    }

    #[test]
    fn test_standard_is_valid() {
        let standard = Placement::STANDARD;
        assert!(Placement::new(standard.hare(), standard.hounds()).is_ok());
    }
}
