//! Game implementations built on the shared engine.
//!
//! - `castle`: Beleaguered Castle, single-player, with solver and session
//! - `golf`: 9-Card Golf, 2-5 players, with AI strategies

pub mod castle;
pub mod golf;
