//! Shared rule-engine vocabulary.
//!
//! - `Legality`: outcome of a legality predicate, with a reason when illegal
//! - `ReversibleRules`: games whose moves have an exact inverse, which is
//!   what the undo/redo layer builds on

use crate::core::{EngineError, Result};

/// Result of checking a move against the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Legality {
    Legal,
    /// Illegal, with a human-readable description of the violated rule.
    Illegal(String),
}

impl Legality {
    #[must_use]
    pub fn is_legal(&self) -> bool {
        matches!(self, Legality::Legal)
    }

    /// `Ok(())` when legal, otherwise an illegal-move error carrying the reason.
    pub fn into_result(self) -> Result<()> {
        match self {
            Legality::Legal => Ok(()),
            Legality::Illegal(reason) => Err(EngineError::IllegalMove { reason }),
        }
    }

    /// The reason, if illegal.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Legality::Legal => None,
            Legality::Illegal(reason) => Some(reason),
        }
    }
}

/// Rules whose moves can be applied and exactly inverted.
///
/// ## Implementation Notes
///
/// - `check`: pure, never mutates
/// - `apply`: checks legality first; on `Err` the state is untouched
/// - `undo`: the paired inverse of a previously applied move, with no
///   legality re-check
/// - `legal_moves`: deterministic order, so replays are reproducible
pub trait ReversibleRules {
    type State;
    type Move: Clone + std::fmt::Debug + std::fmt::Display;

    fn check(state: &Self::State, mv: &Self::Move) -> Legality;

    fn apply(state: &mut Self::State, mv: &Self::Move) -> Result<()>;

    fn undo(state: &mut Self::State, mv: &Self::Move) -> Result<()>;

    fn legal_moves(state: &Self::State) -> Vec<Self::Move>;

    /// True when no legal move remains.
    fn has_no_moves(state: &Self::State) -> bool {
        Self::legal_moves(state).is_empty()
    }
}
