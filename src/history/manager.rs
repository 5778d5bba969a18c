//! Linear undo/redo history.
//!
//! Two stacks, both unbounded. Executing a new command clears the redo stack,
//! so history never branches. Adjacent commands are never merged.

use tracing::debug;

use super::command::Command;
use crate::core::Result;

/// Undo/redo manager over state `S`.
///
/// Not reentrant: commands must not call back into the manager.
pub struct UndoRedoManager<S> {
    undo_stack: Vec<Box<dyn Command<S>>>,
    redo_stack: Vec<Box<dyn Command<S>>>,
}

impl<S> Default for UndoRedoManager<S> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<S> UndoRedoManager<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` and record it. Clears the redo stack.
    ///
    /// A failing command is not recorded and leaves both stacks untouched.
    pub fn execute(&mut self, state: &mut S, command: impl Command<S> + 'static) -> Result<()> {
        self.execute_boxed(state, Box::new(command))
    }

    pub fn execute_boxed(&mut self, state: &mut S, mut command: Box<dyn Command<S>>) -> Result<()> {
        command.execute(state)?;
        debug!(
            command = command.description().as_deref().unwrap_or("<unnamed>"),
            dropped_redo = self.redo_stack.len(),
            "command executed"
        );
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent command. Returns `Ok(false)` when there is none.
    pub fn undo(&mut self, state: &mut S) -> Result<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(state) {
            self.undo_stack.push(command);
            return Err(err);
        }
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Redo the most recently undone command. Returns `Ok(false)` when there is none.
    pub fn redo(&mut self, state: &mut S) -> Result<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(state) {
            self.redo_stack.push(command);
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(true)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the command `undo` would revert.
    #[must_use]
    pub fn peek_undo(&self) -> Option<String> {
        self.undo_stack.last().and_then(|c| c.description())
    }

    /// Label of the command `redo` would replay.
    #[must_use]
    pub fn peek_redo(&self) -> Option<String> {
        self.redo_stack.last().and_then(|c| c.description())
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
