//! Interactive Beleaguered Castle session.
//!
//! Owns the position, its undo/redo history, the move transcript and the
//! lifecycle event bus. One call to `play` is one step: the player move plus
//! any safe auto-moves it unlocks, grouped into a single compound command so
//! one `undo` reverts all of it.
//!
//! `Setup` lasts until `start`. The session moves to `Ended` the first time a
//! step leaves the board won or stuck, and stays there: play, undo and redo
//! are refused from then on.

use tracing::debug;

use super::rules::{
    apply_move, check_move, deal, deal_with_rng, has_no_moves, is_won, legal_moves, BeleagueredCastle,
};
use super::solver::{apply_safe_auto_moves, auto_complete_moves};
use super::state::{CastleMove, CastleSnapshot, CastleState};
use crate::core::{CastleConfig, EngineError, Phase, PlayerId, RandomSource, Result};
use crate::events::{
    EventBus, FinishedTranscript, GameEvent, ListenerId, MoveOrigin, Transcript, TranscriptAction,
};
use crate::history::{Command, CompoundCommand, MoveCommand, UndoRedoManager};

/// A single castle move as an undoable command.
pub type CastleMoveCommand = MoveCommand<BeleagueredCastle>;

/// Castle is single-player; every event and transcript entry uses this seat.
const SOLO: PlayerId = PlayerId::new(0);

pub struct CastleSession {
    config: CastleConfig,
    state: CastleState,
    history: UndoRedoManager<CastleState>,
    transcript: Transcript<CastleMove>,
    events: EventBus,
    started: bool,
    ended: bool,
    /// Steps taken, starting at 1. Never decreases, undo included.
    turn: u32,
}

impl CastleSession {
    /// Deal from `config.seed` with the LCG.
    pub fn new(config: CastleConfig) -> Result<Self> {
        let state = deal(config.seed)?;
        Ok(Self::from_state(config, state))
    }

    /// Deal with an injected generator; `config.seed` is only recorded.
    pub fn with_rng<R: RandomSource + ?Sized>(config: CastleConfig, rng: &mut R) -> Result<Self> {
        let state = deal_with_rng(config.seed, rng)?;
        Ok(Self::from_state(config, state))
    }

    /// Wrap an existing position, e.g. one built with `CastleState::from_parts`.
    pub fn from_state(config: CastleConfig, state: CastleState) -> Self {
        debug!(seed = state.seed(), auto_move = config.auto_move, "castle session created");
        Self {
            config,
            state,
            history: UndoRedoManager::new(),
            transcript: Transcript::new(),
            events: EventBus::new(),
            started: false,
            ended: false,
            turn: 1,
        }
    }

    pub fn config(&self) -> &CastleConfig {
        &self.config
    }

    pub fn state(&self) -> &CastleState {
        &self.state
    }

    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        match (self.started, self.ended) {
            (false, _) => Phase::Setup,
            (true, true) => Phase::Ended,
            (true, false) => Phase::Playing,
        }
    }

    pub fn is_won(&self) -> bool {
        is_won(&self.state)
    }

    pub fn legal_moves(&self) -> Vec<CastleMove> {
        legal_moves(&self.state)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn transcript(&self) -> &Transcript<CastleMove> {
        &self.transcript
    }

    pub fn snapshot(&self) -> CastleSnapshot {
        self.state.snapshot()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Leave `Setup` and announce the first turn.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(EngineError::InvalidPhase {
                action: "start castle session",
                phase: self.phase(),
            });
        }
        self.started = true;
        self.ended = board_finished(&self.state);
        let phase = self.phase();
        if phase == Phase::Ended {
            self.emit(|turn, player| GameEvent::GameEnded { turn, player, phase });
        } else {
            self.emit(|turn, player| GameEvent::TurnStarted { turn, player, phase });
        }
        Ok(())
    }

    /// Play one move, followed by the safe auto-move fixed point when
    /// `auto_move` is on. Returns the automatic moves that followed.
    ///
    /// An illegal move fails before anything changes.
    pub fn play(&mut self, mv: CastleMove) -> Result<Vec<CastleMove>> {
        self.require_playing("play move")?;
        check_move(&self.state, &mv).into_result()?;

        let automatic = if self.config.auto_move {
            let mut preview = self.state.clone();
            apply_move(&mut preview, &mv)?;
            apply_safe_auto_moves(&mut preview)?
        } else {
            Vec::new()
        };

        let commands: Vec<Box<dyn Command<CastleState>>> = std::iter::once(mv)
            .chain(automatic.iter().copied())
            .map(|m| Box::new(CastleMoveCommand::new(m)) as Box<dyn Command<CastleState>>)
            .collect();
        let base = self.state.move_count();
        self.history.execute(&mut self.state, CompoundCommand::new(commands)?)?;

        self.transcript.record_move(SOLO, mv, MoveOrigin::Player, base + 1);
        for (offset, auto) in (2..).zip(&automatic) {
            self.transcript.record_move(SOLO, *auto, MoveOrigin::Automatic, base + offset);
        }
        self.complete_step();
        Ok(automatic)
    }

    /// Drain the board when the position is trivially winnable.
    ///
    /// Runs as one undoable step. Returns the moves played, empty (and no
    /// step taken) when the position does not qualify.
    pub fn auto_complete(&mut self) -> Result<Vec<CastleMove>> {
        self.require_playing("auto-complete")?;
        let moves = auto_complete_moves(&self.state);
        if moves.is_empty() {
            return Ok(moves);
        }

        let commands: Vec<Box<dyn Command<CastleState>>> = moves
            .iter()
            .map(|m| Box::new(CastleMoveCommand::new(*m)) as Box<dyn Command<CastleState>>)
            .collect();
        let base = self.state.move_count();
        let step = CompoundCommand::new(commands)?.with_description("auto-complete");
        self.history.execute(&mut self.state, step)?;

        for (offset, mv) in (1..).zip(&moves) {
            self.transcript.record_move(SOLO, *mv, MoveOrigin::Automatic, base + offset);
        }
        debug!(moves = moves.len(), "castle auto-completed");
        self.complete_step();
        Ok(moves)
    }

    /// Revert the last step. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        self.require_playing("undo")?;
        let undone = self.history.undo(&mut self.state)?;
        if undone {
            self.record_history(TranscriptAction::Undone);
        }
        Ok(undone)
    }

    /// Replay the last undone step. `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        self.require_playing("redo")?;
        let redone = self.history.redo(&mut self.state)?;
        if redone {
            self.record_history(TranscriptAction::Redone);
        }
        Ok(redone)
    }

    /// Close the session, returning the transcript with the final board.
    pub fn finish(self) -> FinishedTranscript<CastleMove, CastleSnapshot> {
        let snapshot = self.state.snapshot();
        self.transcript.finalize(snapshot)
    }

    fn require_playing(&self, action: &'static str) -> Result<()> {
        match self.phase() {
            Phase::Playing => Ok(()),
            phase => Err(EngineError::InvalidPhase { action, phase }),
        }
    }

    /// Undo and redo settle the board without starting a turn. Every step
    /// still on the stacks began with a player move: auto-complete always
    /// wins, and an ended session refuses undo.
    fn record_history(&mut self, action: TranscriptAction<CastleMove>) {
        debug!(?action, move_count = self.state.move_count(), "castle history step");
        self.transcript
            .record(SOLO, action, MoveOrigin::Player, self.state.move_count());
        let phase = self.phase();
        self.emit(|turn, player| GameEvent::StateSettled { turn, player, phase });
    }

    /// `TurnCompleted`, `StateSettled`, then the next `TurnStarted` or `GameEnded`.
    fn complete_step(&mut self) {
        self.ended = board_finished(&self.state);
        let phase = self.phase();
        self.emit(|turn, player| GameEvent::TurnCompleted { turn, player, phase });
        self.emit(|turn, player| GameEvent::StateSettled { turn, player, phase });
        if phase == Phase::Ended {
            debug!(turn = self.turn, won = is_won(&self.state), "castle game over");
            self.emit(|turn, player| GameEvent::GameEnded { turn, player, phase });
        } else {
            self.turn += 1;
            self.emit(|turn, player| GameEvent::TurnStarted { turn, player, phase });
        }
    }

    fn emit(&mut self, event: impl FnOnce(u32, PlayerId) -> GameEvent) {
        self.events.emit(event(self.turn, SOLO));
    }
}

/// Won, or no legal move left.
fn board_finished(state: &CastleState) -> bool {
    is_won(state) || has_no_moves(state)
}

impl std::fmt::Debug for CastleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastleSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("turn", &self.turn)
            .field("ended", &self.ended)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("transcript_len", &self.transcript.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Every suit in its own column, descending, with aces home.
    fn ready_to_finish() -> CastleState {
        let mut foundations: [Vec<Card>; 4] = Default::default();
        let mut tableau: [Vec<Card>; 8] = Default::default();
        for suit in Suit::ALL {
            foundations[suit.index()].push(Card::new(Rank::Ace, suit));
            for rank in Rank::ALL.iter().rev().filter(|r| **r != Rank::Ace) {
                tableau[suit.index()].push(Card::new(*rank, suit));
            }
        }
        CastleState::from_parts(foundations, tableau, 0).unwrap()
    }

    /// `ready_to_finish` with the 2 of clubs parked alone in column 4.
    fn parked_two() -> CastleState {
        let foundations = std::array::from_fn(|f| ready_to_finish().foundations()[f].to_vec());
        let mut tableau: [Vec<Card>; 8] = std::array::from_fn(|c| ready_to_finish().tableau()[c].to_vec());
        let two = tableau[0].pop().unwrap();
        tableau[4].push(two);
        CastleState::from_parts(foundations, tableau, 0).unwrap()
    }

    fn started(auto_move: bool) -> CastleSession {
        let config = CastleConfig::default().auto_move(auto_move);
        let mut session = CastleSession::from_state(config, parked_two());
        session.start().unwrap();
        session
    }

    #[test]
    fn test_phase_lifecycle() {
        let mut session = CastleSession::new(CastleConfig::new(42)).unwrap();
        assert_eq!(session.phase(), Phase::Setup);
        assert!(matches!(
            session.play(CastleMove::ToTableau { from: 0, to: 1 }),
            Err(EngineError::InvalidPhase { phase: Phase::Setup, .. })
        ));

        session.start().unwrap();
        assert!(session.start().is_err());
        assert_ne!(session.phase(), Phase::Setup);
    }

    #[test]
    fn test_play_then_undo_redo() {
        let mut session = started(false);
        let before = session.state().clone();
        let mv = CastleMove::ToTableau { from: 4, to: 0 };

        session.play(mv).unwrap();
        assert_eq!(session.state().move_count(), 1);
        assert!(session.can_undo());

        assert!(session.undo().unwrap());
        assert_eq!(session.state(), &before);
        assert!(session.redo().unwrap());
        assert_eq!(session.state().move_count(), 1);
        assert!(!session.redo().unwrap());

        let actions: Vec<_> = session.transcript().entries().map(|e| e.action.clone()).collect();
        assert_eq!(
            actions,
            vec![TranscriptAction::Applied(mv), TranscriptAction::Undone, TranscriptAction::Redone]
        );
    }

    #[test]
    fn test_illegal_play_changes_nothing() {
        let mut session = started(false);
        let before = session.snapshot();
        assert!(session.play(CastleMove::ToTableau { from: 2, to: 2 }).is_err());
        assert_eq!(session.snapshot(), before);
        assert!(session.transcript().is_empty());
        assert!(!session.can_undo());
    }

    /// `parked_two` with the diamonds column upside down, so diamonds stay
    /// stuck at the Ace and only the other 2s are ever safe.
    fn parked_two_diamonds_reversed() -> CastleState {
        let foundations = std::array::from_fn(|f| parked_two().foundations()[f].to_vec());
        let mut tableau: [Vec<Card>; 8] = std::array::from_fn(|c| parked_two().tableau()[c].to_vec());
        tableau[1].reverse();
        CastleState::from_parts(foundations, tableau, 0).unwrap()
    }

    #[test]
    fn test_auto_moves_grouped_into_one_step() {
        let config = CastleConfig::default().auto_move(true);
        let mut session = CastleSession::from_state(config, parked_two_diamonds_reversed());
        session.start().unwrap();

        // 2C back onto 3C, then the 2s of clubs, hearts and spades go home.
        let automatic = session.play(CastleMove::ToTableau { from: 4, to: 0 }).unwrap();
        assert_eq!(automatic.len(), 3);
        assert!(automatic.iter().all(CastleMove::is_foundation_move));
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.transcript().moves_by(MoveOrigin::Automatic), automatic);
        assert_eq!(session.transcript().moves_by(MoveOrigin::Player).len(), 1);

        // One undo reverts the player move and the whole cascade.
        assert!(session.undo().unwrap());
        assert_eq!(session.state(), &parked_two_diamonds_reversed());
    }

    #[test]
    fn test_ended_session_stays_ended() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut session = started(true);
        let sink = Rc::clone(&log);
        session.subscribe(move |e| sink.borrow_mut().push((e.name(), e.phase())));

        // 2C back onto 3C; from there every card is safe and the game is won.
        let automatic = session.play(CastleMove::ToTableau { from: 4, to: 0 }).unwrap();
        assert_eq!(automatic.len(), 48);
        assert!(session.is_won());
        assert_eq!(session.phase(), Phase::Ended);
        assert!(session.can_undo());

        for refused in [session.undo().map(|_| ()), session.redo().map(|_| ())] {
            assert!(matches!(refused, Err(EngineError::InvalidPhase { phase: Phase::Ended, .. })));
        }
        assert!(matches!(
            session.play(CastleMove::ToTableau { from: 0, to: 1 }),
            Err(EngineError::InvalidPhase { phase: Phase::Ended, .. })
        ));
        assert!(session.auto_complete().is_err());
        assert_eq!(session.phase(), Phase::Ended);
        assert!(session.is_won());

        let log = log.borrow();
        assert_eq!(log.last(), Some(&("game-ended", Phase::Ended)));
        assert_eq!(log.iter().filter(|(name, _)| *name == "game-ended").count(), 1);
    }

    #[test]
    fn test_auto_complete() {
        let mut session = CastleSession::from_state(
            CastleConfig::default().auto_move(false),
            ready_to_finish(),
        );
        session.start().unwrap();

        let moves = session.auto_complete().unwrap();
        assert_eq!(moves.len(), 48);
        assert!(session.is_won());
        assert_eq!(session.phase(), Phase::Ended);
        assert_eq!(session.transcript().moves_by(MoveOrigin::Automatic), moves);
        assert!(session.undo().is_err());
    }

    #[test]
    fn test_auto_complete_noop_when_not_winnable() {
        // Diamonds column turned upside down: K on top, 2 buried.
        let foundations = std::array::from_fn(|f| ready_to_finish().foundations()[f].to_vec());
        let mut tableau: [Vec<Card>; 8] = std::array::from_fn(|c| ready_to_finish().tableau()[c].to_vec());
        tableau[1].reverse();
        let state = CastleState::from_parts(foundations, tableau, 0).unwrap();

        let mut session = CastleSession::from_state(CastleConfig::default(), state);
        session.start().unwrap();
        assert!(session.auto_complete().unwrap().is_empty());
        assert!(!session.can_undo());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_event_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let config = CastleConfig::default().auto_move(false);
        let mut session = CastleSession::from_state(config, parked_two());
        let sink = Rc::clone(&log);
        session.subscribe(move |e| sink.borrow_mut().push((e.name(), e.turn())));

        session.start().unwrap();
        session.play(CastleMove::ToTableau { from: 4, to: 0 }).unwrap();

        let log = log.borrow();
        assert_eq!(log[0], ("turn-started", 1));
        assert_eq!(log[1], ("turn-completed", 1));
        assert_eq!(log[2], ("state-settled", 1));
        assert_eq!(log[3], ("turn-started", 2));
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_finish_attaches_snapshot() {
        let mut session = started(false);
        session.play(CastleMove::ToTableau { from: 4, to: 0 }).unwrap();
        let snapshot = session.snapshot();

        let finished = session.finish();
        assert_eq!(finished.final_state, snapshot);
        assert_eq!(finished.entries.len(), 1);
    }
}
