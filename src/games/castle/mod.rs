//! Beleaguered Castle.
//!
//! Four suit foundations built Ace to King and eight tableau columns built
//! down by one rank regardless of suit. Only top cards move. Aces start on
//! the foundations; the other 48 cards are dealt face-up, six per column.

pub mod rules;
pub mod session;
pub mod solver;
pub mod state;

pub use rules::{
    apply_move, can_move_to_foundation, can_move_to_tableau, check_move, deal, deal_with_rng,
    has_no_moves, is_won, legal_moves, next_rank, undo_move, BeleagueredCastle,
};
pub use session::{CastleMoveCommand, CastleSession};
pub use solver::{apply_safe_auto_moves, auto_complete_moves, find_safe_auto_moves, is_trivially_winnable};
pub use state::{CastleMove, CastleSnapshot, CastleState, COLUMN_COUNT, COLUMN_DEPTH, FOUNDATION_COUNT};
