//! Hot-seat terminal play.
//!
//! Two controllers share one in-process relay, so every move crosses the
//! same JSON path a networked match would. Players type `from to` using
//! node labels or indices.

use crate::controller::{GameEvent, MatchController, SubmitOutcome};
use crate::relay::{LocalRelay, RelayEndpoint};
use crate::render::render_board;
use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use hare_hounds::{Board, Layout, MatchStatus, PositionId};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Names of the two people sharing the terminal.
#[derive(Debug, Clone, PartialEq, Eq, new, Getters)]
pub struct HotSeat {
    /// Connects first, so plays the hounds.
    first: String,
    /// Plays the hare.
    second: String,
    /// Board geometry for both clients.
    layout: Layout,
}

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move a piece. A missing destination is still submitted so the
    /// board can reject it.
    Move {
        /// Origin node.
        from: PositionId,
        /// Destination node.
        to: Option<PositionId>,
    },
    /// Redraw the board.
    Show,
    /// Print the command summary.
    Help,
    /// Withdraw from the match.
    Quit,
}

/// Parses one input line.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err("Empty input".to_string());
    };

    match first.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => return Ok(Input::Quit),
        "help" | "?" => return Ok(Input::Help),
        "show" | "board" => return Ok(Input::Show),
        _ => {}
    }

    let from = PositionId::from_label(first).ok_or_else(|| format!("Unknown node '{first}'"))?;
    let to = match words.next() {
        Some(word) => {
            Some(PositionId::from_label(word).ok_or_else(|| format!("Unknown node '{word}'"))?)
        }
        None => None,
    };
    if words.next().is_some() {
        return Err("Expected: <from> <to>".to_string());
    }
    Ok(Input::Move { from, to })
}

const HELP: &str = "Commands:\n  <from> <to>   move a piece, e.g. `bottom-left middle-left` or `3 2`\n  show          redraw the board\n  quit          abandon the match\nNodes:";

fn help_text() -> String {
    let nodes: Vec<_> = PositionId::ALL
        .iter()
        .map(|id| format!("  {:>2} {}", id.index(), id.label()))
        .collect();
    format!("{HELP}\n{}", nodes.join("\n"))
}

struct Seat {
    controller: MatchController<RelayEndpoint>,
    events: mpsc::UnboundedReceiver<GameEvent>,
}

impl Seat {
    fn connect(relay: &LocalRelay, name: &str, layout: Layout) -> Result<Self> {
        let endpoint = relay.connect(name)?;
        let (tx, events) = mpsc::unbounded_channel();
        Ok(Self {
            controller: MatchController::new(Board::with_layout(layout), endpoint, tx),
            events,
        })
    }

    /// Prints what the controller reported since the last call.
    fn flush(&mut self, out: &mut impl Write) -> Result<()> {
        let name = self.controller.name().to_string();
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::Message(message) => writeln!(out, "[{name}] {message}")?,
                GameEvent::MatchStarted {
                    local_animal,
                    opponent,
                } => writeln!(out, "[{name}] Playing the {local_animal} against {opponent}")?,
                GameEvent::MoveRejected(error) => writeln!(out, "[{name}] {error}")?,
                GameEvent::MoveApplied { .. }
                | GameEvent::MatchFinished { .. }
                | GameEvent::Abandoned => debug!(?event, "Event"),
            }
        }
        Ok(())
    }
}

/// Runs a hot-seat match until it ends, the players quit or input runs out.
///
/// Returns the final status of the first player's board.
#[instrument(skip(settings, input, out), fields(first = %settings.first, second = %settings.second))]
pub async fn run_hot_seat<R>(settings: &HotSeat, input: R, out: &mut impl Write) -> Result<MatchStatus>
where
    R: AsyncBufRead + Unpin,
{
    let relay = LocalRelay::new();
    let mut seats = [
        Seat::connect(&relay, &settings.first, settings.layout)?,
        Seat::connect(&relay, &settings.second, settings.layout)?,
    ];

    for seat in seats.iter_mut() {
        seat.controller.request_match().await?;
    }
    for seat in seats.iter_mut() {
        if !seat.controller.pump().await? {
            anyhow::bail!("Relay closed before the match started");
        }
        seat.flush(out)?;
    }

    info!("Hot-seat match started");
    writeln!(out, "{}\n", render_board(seats[0].controller.board()))?;

    let mut lines = input.lines();
    while seats[0].controller.board().is_match_in_progress() {
        let mover = if seats[0].controller.board().is_local_player_turn() {
            0
        } else {
            1
        };
        let waiter = 1 - mover;

        write!(out, "{} > ", seats[mover].controller.name())?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            info!("Input closed");
            break;
        };

        match parse_input(&line) {
            Ok(Input::Move { from, to }) => {
                match seats[mover].controller.submit_move(from, to).await? {
                    SubmitOutcome::Sent(_) => {
                        seats[waiter].controller.pump().await?;
                        writeln!(out, "\n{}\n", render_board(seats[0].controller.board()))?;
                    }
                    SubmitOutcome::Rejected(_) => {}
                }
            }
            Ok(Input::Show) => writeln!(out, "{}", render_board(seats[0].controller.board()))?,
            Ok(Input::Help) => writeln!(out, "{}", help_text())?,
            Ok(Input::Quit) => {
                seats[mover].controller.withdraw().await?;
                seats[waiter].controller.pump().await?;
                seats[mover].flush(out)?;
                seats[waiter].flush(out)?;
                return Ok(seats[0].controller.board().status());
            }
            Err(message) => {
                warn!(%line, "Unparseable input");
                writeln!(out, "{message}")?;
            }
        }

        seats[mover].flush(out)?;
        seats[waiter].flush(out)?;
    }

    Ok(seats[0].controller.board().status())
}
