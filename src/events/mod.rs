//! Observer-facing surface of a session.
//!
//! - `GameEvent` / `EventBus`: lifecycle events pushed to registered listeners
//! - `Transcript`: ordered record of moves, tagged player vs automatic

mod event;
mod transcript;

pub use event::{EventBus, GameEvent, ListenerId};
pub use transcript::{FinishedTranscript, MoveOrigin, Transcript, TranscriptAction, TranscriptEntry};
