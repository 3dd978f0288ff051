//! In-process matchmaking and move relay.
//!
//! Stands in for the external actor service: clients connect, ask for a
//! match, and are paired in arrival order. The first client of a pair
//! moves first. Moves cross the relay as JSON text, exactly as they
//! would cross a network.

use crate::actor::{Actor, MATCH_PLAYERS, TransportError};
use hare_hounds::{FIRST_MOVER_ORDER, InboundEvent, MoveResult, OutboundMessage, PlayerDescriptor};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Order given to the second client of a pair.
const SECOND_MOVER_ORDER: &str = "2";

/// What the relay pushes into a client's inbox.
#[derive(Debug, Clone)]
enum Frame {
    Started([PlayerDescriptor; 2]),
    Move(String),
    Withdrawn,
}

#[derive(Debug)]
struct Client {
    id: String,
    name: String,
    inbox: mpsc::UnboundedSender<Frame>,
    peer: Option<usize>,
}

impl Client {
    fn descriptor(&self, order: &str) -> PlayerDescriptor {
        PlayerDescriptor::new(self.name.clone(), self.id.clone(), order)
    }
}

#[derive(Debug, Default)]
struct RelayState {
    clients: Vec<Client>,
    waiting: Option<usize>,
}

/// Shared relay; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct LocalRelay {
    state: Arc<Mutex<RelayState>>,
}

impl LocalRelay {
    /// Creates an empty relay.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating local relay");
        Self::default()
    }

    /// Registers a client and returns its endpoint.
    #[instrument(skip(self))]
    pub fn connect(&self, name: &str) -> Result<RelayEndpoint, TransportError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock()?;
        let index = state.clients.len();
        let id = format!("client-{}", index + 1);

        info!(%id, %name, "Client connected");
        state.clients.push(Client {
            id: id.clone(),
            name: name.to_string(),
            inbox: tx,
            peer: None,
        });

        Ok(RelayEndpoint {
            relay: self.clone(),
            index,
            id,
            name: name.to_string(),
            inbox: rx,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, RelayState>, TransportError> {
        self.state
            .lock()
            .map_err(|_| TransportError::new("Relay state poisoned"))
    }

    #[instrument(skip(self))]
    fn request_match(&self, index: usize, players: u8) -> Result<(), TransportError> {
        if players != MATCH_PLAYERS {
            return Err(TransportError::new(format!(
                "Matches need {} players, {} requested",
                MATCH_PLAYERS, players
            )));
        }

        let mut state = self.lock()?;
        // Asking again ends the previous pairing; the old peer is told.
        if let Some(old) = state.clients[index].peer.take() {
            if state.clients[old].peer == Some(index) {
                state.clients[old].peer = None;
                info!(peer = %state.clients[old].id, "Leaving previous pairing");
                deliver(&state.clients[old], Frame::Withdrawn);
            }
        }

        match state.waiting.take() {
            Some(first) if first != index => {
                state.clients[first].peer = Some(index);
                state.clients[index].peer = Some(first);

                let first_desc = state.clients[first].descriptor(FIRST_MOVER_ORDER);
                let second_desc = state.clients[index].descriptor(SECOND_MOVER_ORDER);

                info!(first = %first_desc.id, second = %second_desc.id, "Paired clients");
                deliver(
                    &state.clients[first],
                    Frame::Started([first_desc.clone(), second_desc.clone()]),
                );
                deliver(&state.clients[index], Frame::Started([second_desc, first_desc]));
            }
            _ => {
                debug!("Client waiting for an opponent");
                state.waiting = Some(index);
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn relay_move(&self, index: usize, payload: &MoveResult) -> Result<(), TransportError> {
        let json = payload
            .to_json()
            .map_err(|e| TransportError::new(format!("Failed to encode move: {}", e)))?;

        let state = self.lock()?;
        let peer = state.clients[index]
            .peer
            .ok_or_else(|| TransportError::new("No opponent to send the move to"))?;

        debug!(%json, "Relaying move");
        deliver(&state.clients[peer], Frame::Move(json));
        Ok(())
    }

    #[instrument(skip(self))]
    fn withdraw(&self, index: usize) -> Result<(), TransportError> {
        let mut state = self.lock()?;
        if state.waiting == Some(index) {
            state.waiting = None;
        }

        if let Some(peer) = state.clients[index].peer.take() {
            state.clients[peer].peer = None;
            info!(peer = %state.clients[peer].id, "Notifying opponent of withdrawal");
            deliver(&state.clients[peer], Frame::Withdrawn);
        }
        Ok(())
    }
}

/// Sends a frame; a client that dropped its endpoint just misses it.
fn deliver(client: &Client, frame: Frame) {
    if client.inbox.send(frame).is_err() {
        warn!(client = %client.id, "Client inbox closed");
    }
}

/// One client's connection to a [`LocalRelay`].
#[derive(Debug)]
pub struct RelayEndpoint {
    relay: LocalRelay,
    index: usize,
    id: String,
    name: String,
    inbox: mpsc::UnboundedReceiver<Frame>,
}

impl RelayEndpoint {
    /// Identity token the relay assigned.
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait::async_trait]
impl Actor for RelayEndpoint {
    #[instrument(skip(self), fields(client = %self.id))]
    async fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError> {
        match message {
            OutboundMessage::StartMatchRequest { players } => {
                self.relay.request_match(self.index, players)
            }
            OutboundMessage::SendMove { payload } => self.relay.relay_move(self.index, &payload),
        }
    }

    #[instrument(skip(self), fields(client = %self.id))]
    async fn withdraw(&mut self) -> Result<(), TransportError> {
        self.relay.withdraw(self.index)
    }

    #[instrument(skip(self), fields(client = %self.id))]
    async fn next_event(&mut self) -> Option<InboundEvent> {
        loop {
            let event = match self.inbox.recv().await? {
                Frame::Started(players) => InboundEvent::MatchStarted { players },
                Frame::Withdrawn => InboundEvent::Withdrawal,
                Frame::Move(json) => match MoveResult::from_json(&json) {
                    Ok(payload) => InboundEvent::MoveReceived { payload },
                    Err(e) => {
                        warn!(error = %e, %json, "Dropping undecodable move");
                        continue;
                    }
                },
            };
            debug!(?event, "Event received");
            return Some(event);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
