//! Rule-engine building blocks shared by the games.
//!
//! Each game implements its own legality predicates and move application;
//! this module holds the common `Legality` outcome and the `ReversibleRules`
//! trait that undo/redo commands are written against.

pub mod engine;

pub use engine::{Legality, ReversibleRules};
