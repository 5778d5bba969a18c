//! Core engine types: errors, players, turn sequencing, RNG, configuration.
//!
//! This module holds the game-agnostic building blocks. Individual games
//! live under `games` and build on these.

pub mod error;
pub mod player;
pub mod rng;
pub mod config;
pub mod turn;

pub use error::{EngineError, Result, RevealError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{choose, GameRng, GameRngState, RandomSource, SeededRng};
pub use config::{CastleConfig, GolfConfig, PlayerConfig};
pub use turn::{Phase, PlayerInfo, TurnSequencer};
