//! 9-Card Golf.
//!
//! Each player owns a 3x3 grid dealt face-down and turns three cards up
//! before play. On a turn the player draws from the stock or the discard
//! pile, then either swaps the drawn card into the grid or discards it and
//! flips a face-down card. The first player to expose a full grid triggers
//! the end of the round; everyone else gets one more turn. Lowest score wins.

pub mod ai;
pub mod game;
pub mod grid;
pub mod rules;
pub mod scoring;

pub use ai::{GolfStrategy, GreedyStrategy, RandomStrategy};
pub use game::{GolfGame, GolfPlayerSnapshot, GolfPlayerState, GolfShared, GolfSnapshot, TurnReport};
pub use grid::{GolfGrid, GridPosition, GridSnapshot, GRID_COLS, GRID_ROWS, GRID_SIZE};
pub use rules::{
    apply_move, check_move, initial_reveal, legal_moves, DrawSource, GolfAction, GolfMove, RoundEndTracker,
    INITIAL_REVEAL_COUNT,
};
pub use scoring::{card_points, score_grid, score_visible_cards};
