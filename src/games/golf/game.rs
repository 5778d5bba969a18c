//! 9-Card Golf game: deal, initial reveals, turn execution and results.
//!
//! ## Turn flow
//!
//! 1. Everything is validated (phase, settling, source, move) before any card moves.
//! 2. Draw from the chosen source, apply the move, push the discard.
//! 3. Ask the round-end tracker whether the round is over.
//! 4. End the game (revealing every grid) or rotate to the next player,
//!    recycling the discard pile into the stock if the stock ran out.
//! 5. Emit `TurnCompleted`; settling emits `StateSettled` and then either
//!    `TurnStarted` or `GameEnded`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::ai::GolfStrategy;
use super::grid::{GolfGrid, GridSnapshot, GRID_SIZE};
use super::rules::{apply_move, check_move, initial_reveal, DrawSource, GolfAction, RoundEndTracker};
use super::scoring::score_grid;
use crate::cards::{Card, Deck, Pile, PileSnapshot};
use crate::core::{
    EngineError, GolfConfig, Phase, PlayerId, PlayerInfo, PlayerMap, RandomSource, Result, TurnSequencer,
};
use crate::events::{EventBus, FinishedTranscript, GameEvent, ListenerId, MoveOrigin, Transcript};

/// Table state every player sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GolfShared {
    /// Face-down draw pile; the last card is the top.
    pub stock: Pile,
    /// Face-up discard pile.
    pub discard: Pile,
    pub round_end: RoundEndTracker,
}

impl GolfShared {
    /// Sources a player may draw from right now: stock when it has cards,
    /// discard when it has cards.
    pub fn draw_sources(&self) -> SmallVec<[DrawSource; 2]> {
        let mut sources = SmallVec::new();
        if !self.stock.is_empty() {
            sources.push(DrawSource::Stock);
        }
        if !self.discard.is_empty() {
            sources.push(DrawSource::Discard);
        }
        sources
    }

    /// The card a draw from `source` would take, without taking it.
    #[must_use]
    pub fn peek(&self, source: DrawSource) -> Option<&Card> {
        self.pile(source).peek()
    }

    fn pile(&self, source: DrawSource) -> &Pile {
        match source {
            DrawSource::Stock => &self.stock,
            DrawSource::Discard => &self.discard,
        }
    }

    fn pile_mut(&mut self, source: DrawSource) -> &mut Pile {
        match source {
            DrawSource::Stock => &mut self.stock,
            DrawSource::Discard => &mut self.discard,
        }
    }

    /// Turn the discard pile, minus its top card, into a fresh stock.
    fn recycle_discard(&mut self) -> usize {
        let Some(top) = self.discard.pop() else {
            return 0;
        };
        let rest = self.discard.clear();
        let count = rest.len();
        self.stock.push_all(rest.into_iter().rev().map(Card::turned_down));
        self.discard.push(top);
        count
    }
}

/// One player's private state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GolfPlayerState {
    pub grid: GolfGrid,
    /// Whether the opening reveal is done.
    pub revealed: bool,
}

/// Summary of an executed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub turn: u32,
    pub drawn: Card,
    pub discarded: Card,
    pub game_over: bool,
}

/// A completed turn waiting for `settle`.
#[derive(Clone, Copy, Debug)]
struct PendingSettle {
    turn: u32,
    player: PlayerId,
}

/// A game of 9-Card Golf.
pub struct GolfGame {
    config: GolfConfig,
    sequencer: TurnSequencer<GolfPlayerState>,
    shared: GolfShared,
    transcript: Transcript<GolfAction>,
    events: EventBus,
    pending: Option<PendingSettle>,
}

impl GolfGame {
    /// Shuffle with `rng`, deal nine face-down cards to each player
    /// round-robin and turn one card up to start the discard pile.
    ///
    /// The game starts in `Setup`; play begins once every player has made
    /// an initial reveal.
    pub fn new<R: RandomSource + ?Sized>(config: GolfConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let player_count = config.players.len();
        let mut deck = Deck::shuffled(rng);

        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(GRID_SIZE); player_count];
        for _ in 0..GRID_SIZE {
            for hand in hands.iter_mut() {
                hand.push(deck.draw_or_fail()?.turned_down());
            }
        }
        let upcard = deck.draw_or_fail()?.turned_up();

        let states = hands
            .into_iter()
            .map(|cards| {
                Ok(GolfPlayerState {
                    grid: GolfGrid::from_cards(cards)?,
                    revealed: false,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let players: Vec<PlayerInfo> = config.players.iter().map(PlayerInfo::from).collect();
        let sequencer = TurnSequencer::new(players, states)?;

        let mut discard = Pile::new();
        discard.push(upcard);
        let stock: Pile = deck.into_cards().into_iter().map(Card::turned_down).collect();

        debug!(players = player_count, stock = stock.len(), %upcard, "golf dealt");
        Ok(Self {
            config,
            sequencer,
            shared: GolfShared {
                stock,
                discard,
                round_end: RoundEndTracker::new(player_count),
            },
            transcript: Transcript::new(),
            events: EventBus::new(),
            pending: None,
        })
    }

    pub fn config(&self) -> &GolfConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn current_player(&self) -> PlayerId {
        self.sequencer.current_player()
    }

    pub fn turn_number(&self) -> u32 {
        self.sequencer.turn_number()
    }

    pub fn player_count(&self) -> usize {
        self.sequencer.player_count()
    }

    pub fn players(&self) -> &[PlayerInfo] {
        self.sequencer.players()
    }

    pub fn player_state(&self, player: PlayerId) -> Option<&GolfPlayerState> {
        self.sequencer.states().get(player)
    }

    pub fn current_state(&self) -> &GolfPlayerState {
        self.sequencer.current_state()
    }

    pub fn grid(&self, player: PlayerId) -> Option<&GolfGrid> {
        self.player_state(player).map(|s| &s.grid)
    }

    pub fn shared(&self) -> &GolfShared {
        &self.shared
    }

    pub fn transcript(&self) -> &Transcript<GolfAction> {
        &self.transcript
    }

    /// True when no completed turn is waiting for `settle`.
    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Sources the current player may draw from.
    pub fn enumerate_draw_sources(&self) -> SmallVec<[DrawSource; 2]> {
        self.shared.draw_sources()
    }

    /// Make `player`'s opening reveal of three face-down cells.
    ///
    /// When the last player has revealed, play starts and the first
    /// `TurnStarted` is emitted.
    pub fn reveal_initial(&mut self, player: PlayerId, indices: &[usize]) -> Result<()> {
        if self.phase() != Phase::Setup {
            return Err(EngineError::InvalidPhase {
                action: "make initial reveal",
                phase: self.phase(),
            });
        }
        let state = self
            .sequencer
            .states_mut()
            .get_mut(player)
            .ok_or_else(|| EngineError::illegal(format!("{} is not seated", player)))?;
        if state.revealed {
            return Err(EngineError::illegal(format!("{} has already revealed", player)));
        }
        initial_reveal(&mut state.grid, indices)?;
        state.revealed = true;
        debug!(%player, ?indices, "initial reveal");

        if self.sequencer.states().values().all(|s| s.revealed) {
            self.sequencer.start()?;
            let (turn, player, phase) = (self.turn_number(), self.current_player(), self.phase());
            self.events.emit(GameEvent::TurnStarted { turn, player, phase });
        }
        Ok(())
    }

    /// Let `strategy` pick `player`'s opening reveal.
    pub fn reveal_initial_with(
        &mut self,
        player: PlayerId,
        strategy: &dyn GolfStrategy,
        rng: &mut dyn RandomSource,
    ) -> Result<()> {
        let grid = self
            .grid(player)
            .ok_or_else(|| EngineError::illegal(format!("{} is not seated", player)))?;
        let indices = strategy.choose_initial_reveal(grid, rng);
        self.reveal_initial(player, &indices)
    }

    /// Play the current player's turn.
    ///
    /// Fails without changing anything when the phase is wrong, the previous
    /// turn has not settled, the source is empty or the move is illegal.
    pub fn execute_turn(&mut self, action: GolfAction) -> Result<TurnReport> {
        if self.pending.is_some() {
            return Err(EngineError::TurnNotSettled);
        }
        if self.phase() != Phase::Playing {
            return Err(EngineError::InvalidPhase {
                action: "execute turn",
                phase: self.phase(),
            });
        }
        if self.shared.peek(action.source).is_none() {
            return Err(EngineError::EmptySource {
                pile: action.source.pile_name(),
            });
        }
        check_move(&self.current_state().grid, &action.mv).into_result()?;

        let player = self.current_player();
        let turn = self.turn_number();
        let drawn = self.shared.pile_mut(action.source).pop_or_fail(action.source.pile_name())?;
        let state = self.sequencer.current_state_mut();
        let discarded = match apply_move(&mut state.grid, &action.mv, drawn) {
            Ok(card) => card,
            Err(err) => {
                self.shared.pile_mut(action.source).push(drawn);
                return Err(err);
            }
        };
        self.shared.discard.push(discarded);
        let game_over = self.shared.round_end.check_round_end(player, &state.grid);

        self.transcript.record_move(player, action, MoveOrigin::Player, turn);
        debug!(%player, turn, %action, %drawn, %discarded, "golf turn executed");

        if game_over {
            for (_, state) in self.sequencer.states_mut().iter_mut() {
                state.grid.reveal_all();
            }
            self.sequencer.end()?;
            debug!(turn, winners = ?self.winners(), "golf round over");
        } else {
            self.sequencer.advance()?;
            if self.shared.stock.is_empty() {
                let recycled = self.shared.recycle_discard();
                warn!(recycled, "stock exhausted, discard pile recycled");
            }
        }

        let phase = self.phase();
        self.events.emit(GameEvent::TurnCompleted { turn, player, phase });
        self.pending = Some(PendingSettle { turn, player });
        if self.config.auto_settle {
            self.settle();
        }

        Ok(TurnReport {
            player,
            turn,
            drawn,
            discarded,
            game_over,
        })
    }

    /// Let `strategy` choose the current player's action and play it.
    pub fn play_turn_with(
        &mut self,
        strategy: &dyn GolfStrategy,
        rng: &mut dyn RandomSource,
    ) -> Result<TurnReport> {
        let action = strategy
            .choose_action(self.current_state(), &self.shared, rng)
            .ok_or_else(|| EngineError::illegal(format!("{} has no playable action", strategy.name())))?;
        self.execute_turn(action)
    }

    /// Finish the pending turn: emit `StateSettled`, then `TurnStarted` for
    /// the next player or `GameEnded`. Returns false when nothing was pending.
    pub fn settle(&mut self) -> bool {
        let Some(done) = self.pending.take() else {
            return false;
        };
        let phase = self.phase();
        self.events.emit(GameEvent::StateSettled {
            turn: done.turn,
            player: done.player,
            phase,
        });
        if phase == Phase::Ended {
            self.events.emit(GameEvent::GameEnded {
                turn: done.turn,
                player: done.player,
                phase,
            });
        } else {
            let (turn, player) = (self.turn_number(), self.current_player());
            self.events.emit(GameEvent::TurnStarted { turn, player, phase });
        }
        true
    }

    /// Full grid score per player, hidden cards included.
    pub fn final_scores(&self) -> PlayerMap<i32> {
        let scores = self.sequencer.states().values().map(|s| score_grid(&s.grid)).collect();
        PlayerMap::from_vec(scores)
    }

    /// Player(s) with the lowest score.
    pub fn winners(&self) -> Vec<PlayerId> {
        let scores = self.final_scores();
        let Some(best) = scores.values().min().copied() else {
            return Vec::new();
        };
        scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(player, _)| player)
            .collect()
    }

    pub fn snapshot(&self) -> GolfSnapshot {
        GolfSnapshot {
            phase: self.phase(),
            turn_number: self.turn_number(),
            current_player: self.current_player(),
            players: self
                .sequencer
                .players()
                .iter()
                .zip(self.sequencer.states().values())
                .map(|(info, state)| GolfPlayerSnapshot {
                    name: info.name.clone(),
                    is_ai: info.is_ai,
                    grid: state.grid.snapshot(),
                })
                .collect(),
            stock_size: self.shared.stock.len(),
            discard: self.shared.discard.snapshot(),
            triggering_player: self.shared.round_end.triggering_player(),
        }
    }

    /// Close the game, returning the transcript with the final table.
    pub fn finish(self) -> FinishedTranscript<GolfAction, GolfSnapshot> {
        let snapshot = self.snapshot();
        self.transcript.finalize(snapshot)
    }
}

impl std::fmt::Debug for GolfGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GolfGame")
            .field("phase", &self.phase())
            .field("turn", &self.turn_number())
            .field("current_player", &self.current_player())
            .field("stock", &self.shared.stock.len())
            .field("discard", &self.shared.discard.len())
            .finish()
    }
}

/// Plain-data view of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfPlayerSnapshot {
    pub name: String,
    pub is_ai: bool,
    pub grid: GridSnapshot,
}

/// Plain-data view of the whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfSnapshot {
    pub phase: Phase,
    pub turn_number: u32,
    pub current_player: PlayerId,
    pub players: Vec<GolfPlayerSnapshot>,
    pub stock_size: usize,
    pub discard: PileSnapshot,
    pub triggering_player: Option<PlayerId>,
}
