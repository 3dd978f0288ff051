//! The board aggregate: graph, pieces, players and match state.
//!
//! All mutation goes through named operations. Piece movement has a
//! single choke point, [`Board::place`], which keeps the piece's
//! position and the positions' occupants in agreement.

use super::action::{MatchError, Move, MoveError};
use super::invariants::{BoardInvariants, InvariantSet};
use super::piece::{Piece, PieceId};
use super::placement::Placement;
use super::player::{Player, PlayerDescriptor};
use super::position::{Position, PositionId};
use super::protocol::MoveResult;
use super::rules;
use super::topology::{Layout, Topology};
use super::types::{Animal, MatchStatus, Point, Side};
use tracing::{debug, info, instrument, warn};

/// Hare and Hounds rules engine.
#[derive(Debug, Clone)]
pub struct Board {
    layout: Layout,
    topology: Topology,
    pieces: Vec<Piece>,
    placement: Placement,
    local: Option<Player>,
    remote: Option<Player>,
    status: MatchStatus,
    move_counter: u32,
    history: Vec<Move>,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Creates a board with the default layout and standard placement.
    #[instrument]
    pub fn new() -> Self {
        Self::with_placement(Layout::default(), Placement::STANDARD)
    }

    /// Creates a board with custom geometry and the standard placement.
    #[instrument]
    pub fn with_layout(layout: Layout) -> Self {
        Self::with_placement(layout, Placement::STANDARD)
    }

    /// Creates a board with custom geometry and placement.
    ///
    /// The placement is re-applied on every [`Board::reset`].
    #[instrument]
    pub fn with_placement(layout: Layout, placement: Placement) -> Self {
        let mut board = Self {
            layout,
            topology: Topology::standard(&layout),
            pieces: Vec::new(),
            placement,
            local: None,
            remote: None,
            status: MatchStatus::NotStarted,
            move_counter: 0,
            history: Vec::new(),
        };
        board.seed_pieces();
        board
    }

    /// Creates the four pieces and puts them on the placement's nodes.
    fn seed_pieces(&mut self) {
        self.topology.clear_occupancy();
        self.pieces = std::iter::once(Animal::Hare)
            .chain(std::iter::repeat_n(Animal::Hound, 3))
            .enumerate()
            .map(|(i, animal)| Piece::new(PieceId(i), animal))
            .collect();

        self.place(PieceId::HARE, self.placement.hare());
        for (i, at) in self.placement.hounds().into_iter().enumerate() {
            self.place(PieceId(i + 1), at);
        }
    }

    /// Moves a piece, keeping both occupancy references consistent.
    fn place(&mut self, piece: PieceId, to: PositionId) {
        if let Some(from) = self.pieces[piece.index()].try_position() {
            self.topology.get_mut(from).set_piece(None);
        }
        self.topology.get_mut(to).set_piece(Some(piece));
        self.pieces[piece.index()].set_position(to);
    }

    #[cfg(test)]
    pub(crate) fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Geometry used to place the nodes.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The position graph.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// All positions in arena order.
    pub fn positions(&self) -> &[Position] {
        self.topology.positions()
    }

    /// Looks up a position.
    pub fn position(&self, id: PositionId) -> &Position {
        self.topology.get(id)
    }

    /// Looks up a piece.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// All pieces; the hare first.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The hare.
    pub fn hare(&self) -> &Piece {
        self.piece(PieceId::HARE)
    }

    /// The three hounds.
    pub fn hounds(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.animal() == Animal::Hound)
    }

    /// Piece standing on a position, if any.
    pub fn occupant(&self, id: PositionId) -> Option<&Piece> {
        self.position(id).piece().map(|piece| self.piece(piece))
    }

    /// Placement applied on construction and reset.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Current match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Number of moves executed in the current match.
    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// Moves executed in the current match, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The local player, once a match has started.
    pub fn local_player(&self) -> Option<&Player> {
        self.local.as_ref()
    }

    /// The remote player, once a match has started.
    pub fn remote_player(&self) -> Option<&Player> {
        self.remote.as_ref()
    }

    /// Player seated on the given side.
    pub fn player(&self, side: Side) -> Option<&Player> {
        match side {
            Side::Local => self.local.as_ref(),
            Side::Remote => self.remote.as_ref(),
        }
    }

    /// True while either side holds the turn.
    pub fn is_match_in_progress(&self) -> bool {
        self.status.is_in_progress()
    }

    /// True when the local player may move.
    pub fn is_local_player_turn(&self) -> bool {
        self.status == MatchStatus::LocalTurn
    }

    /// True once the local player has won.
    pub fn is_local_player_winner(&self) -> bool {
        self.local.as_ref().is_some_and(Player::is_winner)
    }

    /// True if the local player moves pieces of this kind.
    pub fn is_local_player_piece(&self, piece: &Piece) -> bool {
        self.local
            .as_ref()
            .is_some_and(|player| player.animal() == piece.animal())
    }

    /// Winning animal, once the match has finished.
    pub fn winner(&self) -> Option<Animal> {
        [self.local.as_ref(), self.remote.as_ref()]
            .into_iter()
            .flatten()
            .find(|player| player.is_winner())
            .map(Player::animal)
    }

    /// Hit-tests a screen coordinate against the nodes.
    #[instrument(skip(self))]
    pub fn get_position(&self, x: f64, y: f64) -> Option<PositionId> {
        let radius = f64::from(self.layout.pick_radius);
        self.positions()
            .iter()
            .find(|position| position.point().distance_to(x, y) <= radius)
            .map(Position::id)
    }

    /// Finds the node with exactly these coordinates.
    pub fn position_at(&self, point: Point) -> Option<PositionId> {
        self.positions()
            .iter()
            .find(|position| position.point() == point)
            .map(Position::id)
    }
}

// ─────────────────────────────────────────────────────────────
//  Match lifecycle
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Starts a match from the transport's descriptors, local player first.
    ///
    /// The descriptor with order `"1"` plays the hounds and moves first.
    /// A finished or abandoned board is reset before the new match.
    ///
    /// # Errors
    ///
    /// [`MatchError::AlreadyInProgress`] while a match is running, and
    /// [`MatchError::InvalidOrder`] unless exactly one descriptor moves first.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn start_match(&mut self, players: &[PlayerDescriptor; 2]) -> Result<MatchStatus, MatchError> {
        if self.is_match_in_progress() {
            warn!("Match start requested while a match is running");
            return Err(MatchError::AlreadyInProgress);
        }

        let first_movers = players.iter().filter(|d| d.is_first_mover()).count();
        if first_movers != 1 {
            warn!(first_movers, "Descriptors do not name a single first mover");
            return Err(MatchError::InvalidOrder(first_movers));
        }

        if self.status.is_terminal() {
            self.reset();
        }

        let local = Player::from_descriptor(&players[0]);
        let remote = Player::from_descriptor(&players[1]);

        self.status = if local.has_turn() {
            MatchStatus::LocalTurn
        } else {
            MatchStatus::RemoteTurn
        };

        info!(
            local = %local.name(),
            local_animal = %local.animal(),
            remote = %remote.name(),
            status = ?self.status,
            "Match started"
        );

        self.local = Some(local);
        self.remote = Some(remote);
        Ok(self.status)
    }

    /// Marks the match abandoned after the remote player left.
    ///
    /// Only a running match is affected, so repeated notifications are harmless.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn receive_withdrawal_notification(&mut self) {
        self.abandon(Side::Remote);
    }

    /// Abandons the match because the local player left.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn withdraw(&mut self) {
        self.abandon(Side::Local);
    }

    fn abandon(&mut self, leaver: Side) {
        if self.is_match_in_progress() {
            info!(%leaver, "Player withdrew");
            self.status = MatchStatus::Abandoned;
        } else {
            debug!("Withdrawal ignored outside a running match");
        }
    }

    /// Restores the placement and zeroes the counter after a match ended.
    ///
    /// Returns `false`, changing nothing, unless the match is finished or
    /// abandoned.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn reset(&mut self) -> bool {
        if !self.status.is_terminal() {
            debug!("Reset ignored outside a finished or abandoned match");
            return false;
        }
        self.status = MatchStatus::NotStarted;

        self.move_counter = 0;
        self.history.clear();
        self.seed_pieces();
        info!("Board reset");
        true
    }

    /// Passes the turn to the other side. No-op outside a running match.
    fn toggle_players_turn(&mut self) {
        self.status = match self.status {
            MatchStatus::LocalTurn => MatchStatus::RemoteTurn,
            MatchStatus::RemoteTurn => MatchStatus::LocalTurn,
            _ => return,
        };

        for player in [self.local.as_mut(), self.remote.as_mut()].into_iter().flatten() {
            player.toggle_turn();
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Checks a move against the graph; see [`rules::validate_move`].
    pub fn validate_move(&self, from: PositionId, to: Option<PositionId>) -> Result<(), MoveError> {
        rules::validate_move(self, from, to)
    }

    /// True if the piece on `from` may move to `to`.
    pub fn is_valid_move(&self, from: PositionId, to: Option<PositionId>) -> bool {
        self.validate_move(from, to).is_ok()
    }

    /// Decides the winner of the current position, if any.
    pub fn evaluate_winner(&self) -> Option<Animal> {
        rules::evaluate_winner(self)
    }

    /// Executes a move for one side.
    ///
    /// The move must be legal, the side must hold the turn and the piece
    /// must be of the side's animal; nothing changes otherwise. On success
    /// the piece moves, the counter increments, the winner is evaluated
    /// and the turn passes. A local move returns the payload to relay.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] explaining the rejection.
    #[instrument(skip(self), fields(status = ?self.status, move_counter = self.move_counter))]
    pub fn move_piece(
        &mut self,
        from: PositionId,
        to: PositionId,
        side: Side,
    ) -> Result<Option<MoveResult>, MoveError> {
        if !self.is_match_in_progress() {
            return Err(MoveError::MatchNotInProgress(self.status));
        }

        if self.status != side.turn_status() {
            warn!(%side, "Move attempted out of turn");
            return Err(MoveError::NotYourTurn(side));
        }

        if let (Some(piece), Some(player)) = (self.occupant(from), self.player(side)) {
            if piece.animal() != player.animal() {
                warn!(%side, animal = %piece.animal(), "Move attempted with opponent's piece");
                return Err(MoveError::NotYourPiece {
                    side,
                    animal: piece.animal(),
                });
            }
        }

        self.validate_move(from, Some(to)).inspect_err(|e| {
            debug!(error = %e, "Move rejected");
        })?;

        let was_local_turn = self.status == MatchStatus::LocalTurn;

        // Validation guarantees an occupant.
        let Some(piece) = self.position(from).piece() else {
            return Err(MoveError::EmptyOrigin(from));
        };
        self.place(piece, to);
        self.move_counter += 1;
        self.history.push(Move::new(from, to));

        let winner = self.evaluate_winner();
        if let Some(animal) = winner {
            self.finish(animal);
        }

        self.toggle_players_turn();

        #[cfg(debug_assertions)]
        if let Err(violations) = BoardInvariants::check_all(self) {
            panic!("Board invariants violated after move: {violations:?}");
        }

        info!(
            %from,
            %to,
            %side,
            move_counter = self.move_counter,
            ?winner,
            status = ?self.status,
            "Move executed"
        );

        let payload = (side == Side::Local && was_local_turn).then(|| {
            MoveResult::new(self.position(from).point(), self.position(to).point(), winner)
        });
        Ok(payload)
    }

    /// Replays a move received from the remote peer.
    ///
    /// # Errors
    ///
    /// [`MoveError::UnknownCoordinates`] if the payload names no node, or
    /// any rejection from [`Board::move_piece`].
    #[instrument(skip(self))]
    pub fn apply_remote_move(&mut self, payload: &MoveResult) -> Result<Option<Animal>, MoveError> {
        let from = self
            .position_at(payload.from_pos)
            .ok_or(MoveError::UnknownCoordinates(payload.from_pos))?;
        let to = self
            .position_at(payload.to_pos)
            .ok_or(MoveError::UnknownCoordinates(payload.to_pos))?;

        self.move_piece(from, to, Side::Remote)?;

        let winner = self.winner();
        if winner != payload.winner {
            warn!(
                local = ?winner,
                remote = ?payload.winner,
                "Remote peer disagrees about the winner"
            );
        }
        Ok(winner)
    }

    /// Records the winner and closes the match.
    fn finish(&mut self, animal: Animal) {
        for player in [self.local.as_mut(), self.remote.as_mut()].into_iter().flatten() {
            if player.animal() == animal {
                player.set_winner();
            }
        }
        self.status = MatchStatus::Finished;
        info!(winner = %animal, "Match finished");
    }
}
