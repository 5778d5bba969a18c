//! Move transcript for replay and fixture tooling.
//!
//! Uses `im::Vector` so a running transcript can be cloned in O(1) for
//! intermediate snapshots while play continues. A running transcript
//! serializes as a plain list of entries and can be reloaded and extended.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Whether a move came from a player decision or was derived by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOrigin {
    Player,
    Automatic,
}

/// What happened at a transcript step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptAction<M> {
    Applied(M),
    Undone,
    Redone,
}

/// One recorded step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry<M> {
    /// 0-based position in the transcript.
    pub sequence: u32,
    pub player: PlayerId,
    pub action: TranscriptAction<M>,
    pub origin: MoveOrigin,
    /// Move count or turn number after the step.
    pub counter: u32,
}

/// Append-only record of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript<M: Clone> {
    entries: Vector<TranscriptEntry<M>>,
}

impl<M: Clone> Default for Transcript<M> {
    fn default() -> Self {
        Self {
            entries: Vector::new(),
        }
    }
}

impl<M: Clone> Transcript<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        player: PlayerId,
        action: TranscriptAction<M>,
        origin: MoveOrigin,
        counter: u32,
    ) {
        let sequence = self.entries.len() as u32;
        self.entries.push_back(TranscriptEntry {
            sequence,
            player,
            action,
            origin,
            counter,
        });
    }

    /// Shorthand for recording an applied move.
    pub fn record_move(&mut self, player: PlayerId, mv: M, origin: MoveOrigin, counter: u32) {
        self.record(player, TranscriptAction::Applied(mv), origin, counter);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TranscriptEntry<M>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry<M>> {
        self.entries.last()
    }

    /// Applied moves with the given origin, in order.
    pub fn moves_by(&self, origin: MoveOrigin) -> Vec<M> {
        self.entries
            .iter()
            .filter(|e| e.origin == origin)
            .filter_map(|e| match &e.action {
                TranscriptAction::Applied(mv) => Some(mv.clone()),
                _ => None,
            })
            .collect()
    }

    /// Close the transcript, attaching the final board snapshot.
    pub fn finalize<S>(self, final_state: S) -> FinishedTranscript<M, S> {
        FinishedTranscript {
            entries: self.entries.into_iter().collect(),
            final_state,
        }
    }
}

/// A closed transcript: every step plus the final snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedTranscript<M, S> {
    pub entries: Vec<TranscriptEntry<M>>,
    pub final_state: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_assigns_sequence() {
        let mut transcript = Transcript::new();
        transcript.record_move(PlayerId::new(0), "a", MoveOrigin::Player, 1);
        transcript.record_move(PlayerId::new(0), "b", MoveOrigin::Automatic, 2);
        transcript.record(PlayerId::new(0), TranscriptAction::Undone, MoveOrigin::Player, 1);

        let seqs: Vec<_> = transcript.entries().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(transcript.moves_by(MoveOrigin::Player), vec!["a"]);
        assert_eq!(transcript.moves_by(MoveOrigin::Automatic), vec!["b"]);
        assert_eq!(transcript.last().map(|e| e.counter), Some(1));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut transcript = Transcript::new();
        transcript.record_move(PlayerId::new(0), 1u8, MoveOrigin::Player, 1);
        let snapshot = transcript.clone();
        transcript.record_move(PlayerId::new(0), 2u8, MoveOrigin::Player, 2);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_running_transcript_reloads() {
        let mut transcript = Transcript::new();
        transcript.record_move(PlayerId::new(0), 4u8, MoveOrigin::Player, 1);
        transcript.record_move(PlayerId::new(0), 9u8, MoveOrigin::Automatic, 2);

        let json = serde_json::to_string(&transcript).unwrap();
        let mut reloaded: Transcript<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, transcript);

        reloaded.record(PlayerId::new(0), TranscriptAction::Undone, MoveOrigin::Player, 0);
        assert_eq!(reloaded.last().map(|e| e.sequence), Some(2));
    }

    #[test]
    fn test_finalize_serializes() {
        let mut transcript = Transcript::new();
        transcript.record_move(PlayerId::new(1), 7u32, MoveOrigin::Player, 3);
        let finished = transcript.finalize("board");

        let json = serde_json::to_string(&finished).unwrap();
        let back: FinishedTranscript<u32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries.len(), 1);
        assert_eq!(back.final_state, "board");
    }
}
