//! Reversible commands.
//!
//! A command holds only the data needed to perform and invert one step.
//! The mutable state is passed in on every call instead of being captured,
//! so commands never alias each other's state.

use std::marker::PhantomData;

use crate::core::{EngineError, Result};
use crate::rules::ReversibleRules;

/// A reversible operation over state `S`.
pub trait Command<S> {
    /// Perform the operation. On `Err` the state must be unchanged.
    fn execute(&mut self, state: &mut S) -> Result<()>;

    /// Invert a previous successful `execute`.
    fn undo(&mut self, state: &mut S) -> Result<()>;

    /// Optional human-readable label.
    fn description(&self) -> Option<String> {
        None
    }
}

/// Several commands treated as one step.
///
/// Executes in order and undoes in strict reverse order.
pub struct CompoundCommand<S> {
    commands: Vec<Box<dyn Command<S>>>,
    description: Option<String>,
}

impl<S> CompoundCommand<S> {
    /// Group `commands`. Fails when given none.
    pub fn new(commands: Vec<Box<dyn Command<S>>>) -> Result<Self> {
        if commands.is_empty() {
            return Err(EngineError::MalformedConstruction {
                what: "compound command",
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self {
            commands,
            description: None,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<S> Command<S> for CompoundCommand<S> {
    fn execute(&mut self, state: &mut S) -> Result<()> {
        for i in 0..self.commands.len() {
            if let Err(err) = self.commands[i].execute(state) {
                // Roll back what already ran so the step is all-or-nothing.
                for done in self.commands[..i].iter_mut().rev() {
                    done.undo(state)?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn undo(&mut self, state: &mut S) -> Result<()> {
        for command in self.commands.iter_mut().rev() {
            command.undo(state)?;
        }
        Ok(())
    }

    fn description(&self) -> Option<String> {
        self.description.clone().or_else(|| {
            let parts: Vec<String> = self
                .commands
                .iter()
                .filter_map(|c| c.description())
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        })
    }
}

/// A single move of a reversible rule set, as a command.
pub struct MoveCommand<R: ReversibleRules> {
    mv: R::Move,
    _rules: PhantomData<fn() -> R>,
}

impl<R: ReversibleRules> MoveCommand<R> {
    pub fn new(mv: R::Move) -> Self {
        Self {
            mv,
            _rules: PhantomData,
        }
    }

    pub fn mv(&self) -> &R::Move {
        &self.mv
    }
}

impl<R: ReversibleRules> Command<R::State> for MoveCommand<R> {
    fn execute(&mut self, state: &mut R::State) -> Result<()> {
        R::apply(state, &self.mv)
    }

    fn undo(&mut self, state: &mut R::State) -> Result<()> {
        R::undo(state, &self.mv)
    }

    fn description(&self) -> Option<String> {
        Some(self.mv.to_string())
    }
}
