//! Golf AI strategies.
//!
//! Strategies are trait-based so callers can plug in their own:
//! - `RandomStrategy`: uniform over available sources and legal moves
//! - `GreedyStrategy`: lowest resulting full grid score, random tie-break

use smallvec::SmallVec;
use tracing::{trace, warn};

use super::game::{GolfPlayerState, GolfShared};
use super::grid::GolfGrid;
use super::rules::{apply_move, legal_moves, GolfAction, INITIAL_REVEAL_COUNT};
use super::scoring::score_grid;
use crate::cards::shuffle;
use crate::core::{choose, RandomSource};

/// Decides a Golf player's actions.
pub trait GolfStrategy {
    fn name(&self) -> &'static str;

    /// Pick a draw source and move. `None` only when nothing can be drawn.
    fn choose_action(
        &self,
        player: &GolfPlayerState,
        shared: &GolfShared,
        rng: &mut dyn RandomSource,
    ) -> Option<GolfAction>;

    /// Pick the opening reveal: three distinct face-down cells at random.
    fn choose_initial_reveal(&self, grid: &GolfGrid, rng: &mut dyn RandomSource) -> Vec<usize> {
        let mut hidden = grid.face_down_indices();
        shuffle(&mut hidden, rng);
        hidden.truncate(INITIAL_REVEAL_COUNT);
        hidden
    }
}

/// Uniformly random play.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl GolfStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_action(
        &self,
        player: &GolfPlayerState,
        shared: &GolfShared,
        rng: &mut dyn RandomSource,
    ) -> Option<GolfAction> {
        let sources = shared.draw_sources();
        let source = *choose(rng, &sources)?;
        let moves = legal_moves(&player.grid);
        let mv = *choose(rng, &moves)?;
        Some(GolfAction::new(source, mv))
    }
}

/// Minimises the full grid score after the move.
///
/// Uses `score_grid` rather than the visible score, so flipping an unknown
/// card is never penalised just for exposing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

impl GolfStrategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_action(
        &self,
        player: &GolfPlayerState,
        shared: &GolfShared,
        rng: &mut dyn RandomSource,
    ) -> Option<GolfAction> {
        let mut best_score = i32::MAX;
        let mut best: SmallVec<[GolfAction; 8]> = SmallVec::new();

        for source in shared.draw_sources() {
            let Some(&drawn) = shared.peek(source) else {
                continue;
            };
            for mv in legal_moves(&player.grid) {
                // GolfGrid is Copy: each candidate works on its own grid.
                let mut trial = player.grid;
                if apply_move(&mut trial, &mv, drawn).is_err() {
                    continue;
                }
                let score = score_grid(&trial);
                trace!(?source, %mv, score, "greedy candidate");
                if score < best_score {
                    best_score = score;
                    best.clear();
                }
                if score == best_score {
                    best.push(GolfAction::new(source, mv));
                }
            }
        }

        match choose(rng, &best) {
            Some(action) => Some(*action),
            None => {
                warn!("greedy strategy found no candidate, falling back to random");
                RandomStrategy.choose_action(player, shared, rng)
            }
        }
    }
}
