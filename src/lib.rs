//! # patience-core
//!
//! Rule engines for patience card games, decoupled from any renderer.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: legality predicates never mutate; apply functions check
//!    first and fail before touching state.
//!
//! 2. **Exact Inverses**: every Beleaguered Castle move has an undo that
//!    restores the previous position exactly, which the undo/redo history
//!    builds on.
//!
//! 3. **Injected Randomness**: every entry point that shuffles or decides
//!    takes a `RandomSource`, so seeded runs are reproducible.
//!
//! ## Modules
//!
//! - `core`: errors, players, RNG, turn sequencing, configuration
//! - `cards`: cards, piles, decks
//! - `rules`: shared legality vocabulary and the reversible-rules trait
//! - `history`: reversible commands and the undo/redo manager
//! - `events`: lifecycle events and move transcripts
//! - `games`: Beleaguered Castle and 9-Card Golf
//!
//! ## Example
//!
//! ```
//! use patience_core::games::castle::{deal, is_won, legal_moves};
//!
//! let state = deal(42).unwrap();
//! assert_eq!(state.total_cards(), 52);
//! assert!(!is_won(&state));
//! let _moves = legal_moves(&state);
//! ```

pub mod cards;
pub mod core;
pub mod events;
pub mod games;
pub mod history;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CastleConfig, EngineError, GameRng, GameRngState, GolfConfig, Phase, PlayerConfig, PlayerId,
    PlayerInfo, PlayerMap, RandomSource, Result, RevealError, SeededRng, TurnSequencer,
};

pub use crate::cards::{Card, CardSnapshot, Deck, Pile, PileSnapshot, Rank, Suit};

pub use crate::rules::{Legality, ReversibleRules};

pub use crate::history::{Command, CompoundCommand, MoveCommand, UndoRedoManager};

pub use crate::events::{EventBus, FinishedTranscript, GameEvent, MoveOrigin, Transcript};

pub use crate::games::castle::{CastleMove, CastleSession, CastleState};

pub use crate::games::golf::{
    DrawSource, GolfAction, GolfGame, GolfGrid, GolfMove, GolfStrategy, GreedyStrategy, RandomStrategy,
};
