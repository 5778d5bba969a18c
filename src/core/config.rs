//! Session configuration.
//!
//! Sessions are configured at startup rather than hardcoded:
//! - `CastleConfig`: deal seed and auto-move behaviour for Beleaguered Castle
//! - `GolfConfig`: seats and lifecycle settling for 9-Card Golf
//!
//! Both deserialize with serde, so fixture tools can load them from JSON.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::turn::PlayerInfo;

/// Beleaguered Castle session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    /// Seed for the LCG deal.
    pub seed: u32,
    /// Apply safe foundation moves after every player move.
    pub auto_move: bool,
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            auto_move: true,
        }
    }
}

impl CastleConfig {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn auto_move(mut self, enabled: bool) -> Self {
        self.auto_move = enabled;
        self
    }
}

/// One seat in a Golf game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub is_ai: bool,
}

impl From<&PlayerConfig> for PlayerInfo {
    fn from(config: &PlayerConfig) -> Self {
        PlayerInfo {
            name: config.name.clone(),
            is_ai: config.is_ai,
        }
    }
}

/// 9-Card Golf session settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolfConfig {
    pub players: Vec<PlayerConfig>,
    /// Emit `StateSettled` and the next lifecycle event right after each turn.
    /// When false the caller must call `settle()` once its animations finish.
    pub auto_settle: bool,
}

impl Default for GolfConfig {
    fn default() -> Self {
        Self {
            players: vec![
                PlayerConfig {
                    name: "Player".to_string(),
                    is_ai: false,
                },
                PlayerConfig {
                    name: "Computer".to_string(),
                    is_ai: true,
                },
            ],
            auto_settle: true,
        }
    }
}

impl GolfConfig {
    /// Smallest supported table.
    pub const MIN_PLAYERS: usize = 2;
    /// 5 grids of 9 plus the upcard fit in a 52-card deck.
    pub const MAX_PLAYERS: usize = 5;

    /// Empty configuration; add seats with `human` / `ai`.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            auto_settle: true,
        }
    }

    #[must_use]
    pub fn human(mut self, name: impl Into<String>) -> Self {
        self.players.push(PlayerConfig {
            name: name.into(),
            is_ai: false,
        });
        self
    }

    #[must_use]
    pub fn ai(mut self, name: impl Into<String>) -> Self {
        self.players.push(PlayerConfig {
            name: name.into(),
            is_ai: true,
        });
        self
    }

    #[must_use]
    pub fn auto_settle(mut self, enabled: bool) -> Self {
        self.auto_settle = enabled;
        self
    }

    /// Check seat count and names.
    pub fn validate(&self) -> Result<()> {
        let count = self.players.len();
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&count) {
            return Err(EngineError::InvalidConfig(format!(
                "golf needs {}-{} players, got {}",
                Self::MIN_PLAYERS,
                Self::MAX_PLAYERS,
                count
            )));
        }
        if let Some(idx) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(EngineError::InvalidConfig(format!(
                "player {} has an empty name",
                idx
            )));
        }
        Ok(())
    }
}
