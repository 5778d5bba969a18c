//! Engine error taxonomy.
//!
//! Every failure raised by the engine is a caller contract violation: the
//! legality and enumeration functions exist so callers can avoid them. All
//! checks run before any mutation, so an `Err` never leaves a half-applied move.

use thiserror::Error;

use super::turn::Phase;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by rule engines, primitives and sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A move was attempted whose legality predicate is false.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: String },

    /// A draw/pop was attempted on a collection that must not be empty.
    #[error("cannot take a card from empty {pile}")]
    EmptySource { pile: &'static str },

    /// A fixed-size structure was built from the wrong number of parts.
    #[error("malformed {what}: expected {expected}, got {actual}")]
    MalformedConstruction {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The initial three-card reveal selection was invalid.
    #[error("malformed initial reveal: {0}")]
    MalformedReveal(#[from] RevealError),

    /// A grid position outside the 3x3 grid.
    #[error("position ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    /// An operation was attempted in a phase that does not allow it.
    #[error("cannot {action} while phase is {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A new turn was requested before the previous one settled.
    #[error("previous turn has not settled")]
    TurnNotSettled,
}

impl EngineError {
    /// Build an illegal-move error from any displayable reason.
    pub fn illegal(reason: impl Into<String>) -> Self {
        EngineError::IllegalMove {
            reason: reason.into(),
        }
    }
}

/// Reasons an initial reveal selection is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("expected exactly 3 positions, got {count}")]
    WrongCount { count: usize },

    #[error("position {index} selected more than once")]
    Duplicate { index: usize },

    #[error("position {index} is out of bounds")]
    OutOfBounds { index: usize },

    #[error("position {index} is already face-up")]
    AlreadyFaceUp { index: usize },
}
