//! Command pattern and undo/redo history.
//!
//! - `Command<S>`: a reversible step over state `S`
//! - `CompoundCommand<S>`: several steps undone as one
//! - `MoveCommand<R>`: adapts any `ReversibleRules` move into a command
//! - `UndoRedoManager<S>`: linear, unbounded history

mod command;
mod manager;

pub use command::{Command, CompoundCommand, MoveCommand};
pub use manager::UndoRedoManager;
