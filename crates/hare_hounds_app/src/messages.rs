//! User-facing status messages.

use derive_more::Display;

/// Messages the UI shows in its status line or dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter)]
pub enum GameMessage {
    /// Shown when the client starts.
    #[display("Welcome to Hare and Hounds!")]
    Welcome,
    /// Hint before the first move.
    #[display("Drag and drop a piece to start")]
    StartDrag,
    /// The move broke a rule.
    #[display("Invalid move!")]
    InvalidMove,
    /// The player grabbed an opponent's piece.
    #[display("That piece is not yours!")]
    InvalidPiece,
    /// The local player may move.
    #[display("Your turn! Drag and drop a piece onto the destination.")]
    YourTurn,
    /// The remote player is to move.
    #[display("Waiting for opponent...")]
    WaitingOpponent,
    /// The local player won.
    #[display("You win!")]
    YouWin,
    /// The local player lost.
    #[display("You lose :(")]
    YouLose,
    /// The opponent left.
    #[display("Your opponent abandoned the match!")]
    Abandoned,
}

impl GameMessage {
    /// Message for the local player's turn state.
    pub fn for_turn(local_turn: bool) -> Self {
        if local_turn {
            GameMessage::YourTurn
        } else {
            GameMessage::WaitingOpponent
        }
    }

    /// Message for a decided match.
    pub fn for_outcome(local_won: bool) -> Self {
        if local_won {
            GameMessage::YouWin
        } else {
            GameMessage::YouLose
        }
    }
}
