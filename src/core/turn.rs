//! Generic turn sequencing: phase plus current-player rotation.
//!
//! Phases form a one-way DAG:
//!
//! ```text
//! Setup ──> Playing ──> Ended
//!   └──────────────────────^
//! ```
//!
//! Nothing re-enters `Setup` or `Playing`. Rotation only happens while
//! `Playing`. The per-player custom state `P` is game-defined.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{EngineError, Result};
use super::player::{PlayerId, PlayerMap};

/// Game lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Playing,
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub is_ai: bool,
}

impl PlayerInfo {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: false,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: true,
        }
    }
}

/// Turn sequencer shared by multi-player games.
#[derive(Clone, Debug)]
pub struct TurnSequencer<P> {
    players: Vec<PlayerInfo>,
    states: PlayerMap<P>,
    phase: Phase,
    current: PlayerId,
    /// Starts at 1, incremented on every advance.
    turn_number: u32,
}

impl<P> TurnSequencer<P> {
    /// Create a sequencer in `Setup` with player 0 to act.
    ///
    /// `states` must hold exactly one entry per player.
    pub fn new(players: Vec<PlayerInfo>, states: Vec<P>) -> Result<Self> {
        if players.is_empty() || players.len() > usize::from(u8::MAX) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be 1-255, got {}",
                players.len()
            )));
        }
        if states.len() != players.len() {
            return Err(EngineError::MalformedConstruction {
                what: "player state list",
                expected: players.len(),
                actual: states.len(),
            });
        }

        Ok(Self {
            players,
            states: PlayerMap::from_vec(states),
            phase: Phase::Setup,
            current: PlayerId::new(0),
            turn_number: 1,
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerInfo] {
        &self.players
    }

    /// Info for a seat. Panics on an unknown seat, like `PlayerMap` indexing.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerInfo {
        &self.players[player.index()]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn states(&self) -> &PlayerMap<P> {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut PlayerMap<P> {
        &mut self.states
    }

    #[must_use]
    pub fn current_state(&self) -> &P {
        &self.states[self.current]
    }

    pub fn current_state_mut(&mut self) -> &mut P {
        let current = self.current;
        &mut self.states[current]
    }

    /// `Setup -> Playing`.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != Phase::Setup {
            return Err(EngineError::InvalidPhase {
                action: "start play",
                phase: self.phase,
            });
        }
        self.phase = Phase::Playing;
        debug!(players = self.players.len(), "play started");
        Ok(())
    }

    /// Rotate to the next player and bump the turn number.
    ///
    /// Only legal while `Playing`.
    pub fn advance(&mut self) -> Result<PlayerId> {
        if self.phase != Phase::Playing {
            return Err(EngineError::InvalidPhase {
                action: "advance turn",
                phase: self.phase,
            });
        }
        self.current = self.current.next(self.players.len());
        self.turn_number += 1;
        Ok(self.current)
    }

    /// `Setup | Playing -> Ended`.
    pub fn end(&mut self) -> Result<()> {
        if self.phase == Phase::Ended {
            return Err(EngineError::InvalidPhase {
                action: "end game",
                phase: self.phase,
            });
        }
        self.phase = Phase::Ended;
        debug!(turn = self.turn_number, "game ended");
        Ok(())
    }
}
