//! Hare and Hounds client.
//!
//! Wraps the [`hare_hounds`] rules engine with everything a playable
//! client needs: configuration, the match controller, a transport to the
//! relay service and a terminal front end.

#![warn(missing_docs)]

pub mod actor;
pub mod cli;
pub mod config;
pub mod controller;
pub mod messages;
pub mod relay;
pub mod render;
pub mod terminal;

pub use actor::{Actor, MATCH_PLAYERS, TransportError};
pub use config::{AppConfig, ConfigError};
pub use controller::{GameEvent, MatchController, SubmitOutcome};
pub use messages::GameMessage;
pub use relay::{LocalRelay, RelayEndpoint};
pub use terminal::{HotSeat, Input, parse_input, run_hot_seat};
