//! Players and the descriptors the matchmaking service hands out.

use super::types::Animal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Order value that marks the first mover.
pub const FIRST_MOVER_ORDER: &str = "1";

/// Player description delivered by the transport when a match starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerDescriptor {
    /// Display name.
    pub name: String,
    /// Identity token assigned by the transport.
    pub id: String,
    /// Move order; `"1"` moves first and plays the hounds.
    pub order: String,
}

impl PlayerDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, id: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            order: order.into(),
        }
    }

    /// True for the player who opens the match.
    pub fn is_first_mover(&self) -> bool {
        self.order == FIRST_MOVER_ORDER
    }
}

/// A participant in the current match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: String,
    name: String,
    animal: Animal,
    has_turn: bool,
    is_winner: bool,
}

impl Player {
    /// Creates a player without the turn.
    pub fn new(id: impl Into<String>, name: impl Into<String>, animal: Animal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animal,
            has_turn: false,
            is_winner: false,
        }
    }

    /// Builds a player from a descriptor. The first mover is always the hound side
    /// and starts holding the turn.
    #[instrument]
    pub fn from_descriptor(descriptor: &PlayerDescriptor) -> Self {
        let first = descriptor.is_first_mover();
        let animal = if first { Animal::Hound } else { Animal::Hare };
        let mut player = Self::new(descriptor.id.clone(), descriptor.name.clone(), animal);
        if first {
            player.toggle_turn();
        }
        player
    }

    /// Identity token.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Which pieces this player moves.
    pub fn animal(&self) -> Animal {
        self.animal
    }

    /// True while it is this player's move.
    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// True once this player won the match.
    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    pub(crate) fn toggle_turn(&mut self) {
        self.has_turn = !self.has_turn;
    }

    pub(crate) fn set_winner(&mut self) {
        self.is_winner = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mover_is_hound_with_turn() {
        let player = Player::from_descriptor(&PlayerDescriptor::new("Ana", "p1", "1"));
        assert_eq!(player.animal(), Animal::Hound);
        assert!(player.has_turn());
        assert!(!player.is_winner());
    }

    #[test]
    fn test_second_mover_is_hare_without_turn() {
        let player = Player::from_descriptor(&PlayerDescriptor::new("Bia", "p2", "2"));
        assert_eq!(player.animal(), Animal::Hare);
        assert!(!player.has_turn());
        assert_eq!(player.name(), "Bia");
        assert_eq!(player.id(), "p2");
    }
}
