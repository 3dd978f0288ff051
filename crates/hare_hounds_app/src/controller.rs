//! Match controller: binds a board to a transport and a renderer.
//!
//! Local input and inbound transport events are processed one at a
//! time. Outcomes go out twice: move payloads to the transport, and
//! [`GameEvent`]s to whatever draws the board.

use crate::actor::{Actor, MATCH_PLAYERS};
use crate::messages::GameMessage;
use anyhow::Result;
use hare_hounds::{
    Animal, Board, InboundEvent, MatchError, MatchStatus, Move, MoveError, MoveResult,
    OutboundMessage, PositionId, Side,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Notifications sent from the controller to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Status line text changed.
    Message(GameMessage),
    /// A match began.
    MatchStarted {
        /// Animal the local player controls.
        local_animal: Animal,
        /// Opponent's display name.
        opponent: String,
    },
    /// A piece moved.
    MoveApplied {
        /// The move.
        mv: Move,
        /// True if the local player made it.
        local: bool,
    },
    /// A local move was refused.
    MoveRejected(MoveError),
    /// The match was decided.
    MatchFinished {
        /// Winning animal.
        winner: Animal,
        /// True if the local player won.
        local_won: bool,
    },
    /// The match ended without a winner: the opponent left or the
    /// connection to it was lost.
    Abandoned,
}

/// Result of submitting a local move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The move was executed and relayed.
    Sent(MoveResult),
    /// The move was refused; the board is unchanged.
    Rejected(MoveError),
}

/// Drives one client's board.
pub struct MatchController<A: Actor> {
    board: Board,
    actor: A,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl<A: Actor> MatchController<A> {
    /// Creates a controller and greets the player.
    pub fn new(board: Board, actor: A, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        let controller = Self {
            board,
            actor,
            event_tx,
        };
        controller.emit(GameEvent::Message(GameMessage::Welcome));
        controller
    }

    /// The board, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Name the player registered with.
    pub fn name(&self) -> &str {
        self.actor.name()
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("UI event receiver dropped");
        }
    }

    /// Asks the transport for an opponent.
    ///
    /// Refused while a match is running; withdraw first.
    #[instrument(skip(self), fields(player = %self.actor.name()))]
    pub async fn request_match(&mut self) -> Result<()> {
        if self.board.is_match_in_progress() {
            warn!(status = ?self.board.status(), "Match requested while one is running");
            anyhow::bail!(MatchError::AlreadyInProgress);
        }
        self.actor
            .send(OutboundMessage::StartMatchRequest {
                players: MATCH_PLAYERS,
            })
            .await?;
        self.emit(GameEvent::Message(GameMessage::WaitingOpponent));
        Ok(())
    }

    /// Validates and executes a local move, relaying the payload.
    ///
    /// A rejected move is reported through the return value and a
    /// [`GameEvent::MoveRejected`]; transport failures are errors.
    #[instrument(skip(self), fields(player = %self.actor.name()))]
    pub async fn submit_move(
        &mut self,
        from: PositionId,
        to: Option<PositionId>,
    ) -> Result<SubmitOutcome> {
        let Some(to) = to else {
            return Ok(self.reject(MoveError::MissingDestination));
        };

        let payload = match self.board.move_piece(from, to, Side::Local) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                // Only reachable if the turn check let a non-local move through.
                warn!("Local move produced no payload");
                return Ok(self.reject(MoveError::NotYourTurn(Side::Local)));
            }
            Err(e) => return Ok(self.reject(e)),
        };

        if let Err(e) = self.actor.send(OutboundMessage::SendMove { payload }).await {
            // The board already advanced; without the peer it can never sync.
            warn!(error = %e, "Move could not be relayed, abandoning match");
            self.board.withdraw();
            self.emit(GameEvent::Abandoned);
            self.emit(GameEvent::Message(GameMessage::Abandoned));
            return Err(e.into());
        }
        self.emit(GameEvent::MoveApplied {
            mv: Move::new(from, to),
            local: true,
        });
        self.announce_state();
        Ok(SubmitOutcome::Sent(payload))
    }

    fn reject(&self, error: MoveError) -> SubmitOutcome {
        info!(%error, "Local move rejected");
        let message = match error {
            MoveError::NotYourPiece { .. } => GameMessage::InvalidPiece,
            _ => GameMessage::InvalidMove,
        };
        self.emit(GameEvent::MoveRejected(error.clone()));
        self.emit(GameEvent::Message(message));
        SubmitOutcome::Rejected(error)
    }

    /// Leaves the match; the local board is abandoned as well.
    #[instrument(skip(self), fields(player = %self.actor.name()))]
    pub async fn withdraw(&mut self) -> Result<()> {
        self.actor.withdraw().await?;
        self.board.withdraw();
        Ok(())
    }

    /// Waits for one transport event and applies it.
    ///
    /// Returns `false` once the transport has closed.
    pub async fn pump(&mut self) -> Result<bool> {
        match self.actor.next_event().await {
            Some(event) => {
                self.handle_event(event)?;
                Ok(true)
            }
            None => {
                info!("Transport closed");
                Ok(false)
            }
        }
    }

    /// Applies an inbound transport event to the board.
    ///
    /// A remote move the board refuses is logged and dropped; the peer
    /// is out of sync but the local board stays consistent.
    #[instrument(skip(self), fields(player = %self.actor.name()))]
    pub fn handle_event(&mut self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::MatchStarted { players } => {
                self.board.start_match(&players)?;
                let local_animal = self
                    .board
                    .local_player()
                    .map(|p| p.animal())
                    .unwrap_or(Animal::Hare);
                self.emit(GameEvent::MatchStarted {
                    local_animal,
                    opponent: players[1].name.clone(),
                });
                self.announce_state();
            }
            InboundEvent::MoveReceived { payload } => {
                let from = self.board.position_at(payload.from_pos);
                let to = self.board.position_at(payload.to_pos);
                match self.board.apply_remote_move(&payload) {
                    Ok(_) => {
                        if let (Some(from), Some(to)) = (from, to) {
                            self.emit(GameEvent::MoveApplied {
                                mv: Move::new(from, to),
                                local: false,
                            });
                        }
                        self.announce_state();
                    }
                    Err(e) => {
                        warn!(error = %e, ?payload, "Remote move refused");
                    }
                }
            }
            InboundEvent::Withdrawal => {
                let was_running = self.board.is_match_in_progress();
                self.board.receive_withdrawal_notification();
                if was_running {
                    self.emit(GameEvent::Abandoned);
                    self.emit(GameEvent::Message(GameMessage::Abandoned));
                }
            }
        }
        Ok(())
    }

    /// Resets a finished or abandoned board and asks for a new opponent.
    #[instrument(skip(self), fields(player = %self.actor.name()))]
    pub async fn rematch(&mut self) -> Result<bool> {
        if !self.board.reset() {
            return Ok(false);
        }
        self.request_match().await?;
        Ok(true)
    }

    fn announce_state(&self) {
        match self.board.status() {
            MatchStatus::LocalTurn | MatchStatus::RemoteTurn => {
                self.emit(GameEvent::Message(GameMessage::for_turn(
                    self.board.is_local_player_turn(),
                )));
            }
            MatchStatus::Finished => {
                if let Some(winner) = self.board.winner() {
                    let local_won = self.board.is_local_player_winner();
                    self.emit(GameEvent::MatchFinished { winner, local_won });
                    self.emit(GameEvent::Message(GameMessage::for_outcome(local_won)));
                }
            }
            MatchStatus::NotStarted | MatchStatus::Abandoned => {}
        }
    }
}
