//! Heuristic auto-play for Beleaguered Castle.
//!
//! Two tools:
//!
//! - **Safe auto-moves**: a foundation-eligible top card of rank R is moved
//!   automatically only when every foundation has reached at least R-1. At
//!   that point every card of rank R-1 is home, so nothing left in the
//!   tableau can still want the R card as a build target. This is a
//!   conservative under-approximation; it never removes a card a player
//!   might need.
//! - **Auto-complete**: when each column is a strictly descending run and no
//!   card is already overtaken by its foundation, repeatedly playing any
//!   column top that its foundation accepts drains the board.

use tracing::trace;

use super::rules::{apply_move, can_move_to_foundation};
use super::state::{CastleMove, CastleState, COLUMN_COUNT, FOUNDATION_COUNT};
use crate::cards::Card;
use crate::core::Result;

/// Lowest top rank across all foundations, `-1` if any is empty.
fn min_foundation_rank(state: &CastleState) -> i8 {
    (0..FOUNDATION_COUNT)
        .map(|f| state.foundation_top_rank(f))
        .min()
        .unwrap_or(-1)
}

fn rank_of(card: &Card) -> i8 {
    card.rank().index() as i8
}

/// Foundation moves that can be made without risk, in column order.
pub fn find_safe_auto_moves(state: &CastleState) -> Vec<CastleMove> {
    let floor = min_foundation_rank(state);
    let mut moves = Vec::new();

    for column in 0..COLUMN_COUNT {
        let Some(card) = state.tableau[column].peek() else {
            continue;
        };
        let foundation = card.suit().index();
        if can_move_to_foundation(state, column, foundation) && floor >= rank_of(card) - 1 {
            moves.push(CastleMove::ToFoundation { column, foundation });
        }
    }
    moves
}

/// Apply safe auto-moves until none remain. Returns them in application order.
pub fn apply_safe_auto_moves(state: &mut CastleState) -> Result<Vec<CastleMove>> {
    let mut applied = Vec::new();
    loop {
        let batch = find_safe_auto_moves(state);
        if batch.is_empty() {
            break;
        }
        trace!(count = batch.len(), "applying safe auto-moves");
        for mv in batch {
            apply_move(state, &mv)?;
            applied.push(mv);
        }
    }
    Ok(applied)
}

/// True when a plain "play any playable top" loop is guaranteed to win.
///
/// Every non-empty column must descend strictly from bottom to top, and every
/// card must rank above its own foundation's top.
pub fn is_trivially_winnable(state: &CastleState) -> bool {
    state.tableau.iter().all(|column| {
        let cards = column.as_slice();
        let descending = cards.windows(2).all(|w| w[0].rank() > w[1].rank());
        let above_foundation = cards
            .iter()
            .all(|c| rank_of(c) > state.foundation_top_rank(c.suit().index()));
        descending && above_foundation
    })
}

/// The full foundation sequence that finishes a trivially winnable game.
///
/// Works on a private copy; the live state is never touched. Empty when the
/// position is not trivially winnable.
pub fn auto_complete_moves(state: &CastleState) -> Vec<CastleMove> {
    if !is_trivially_winnable(state) {
        return Vec::new();
    }

    let mut columns: Vec<Vec<Card>> = state.tableau.iter().map(|p| p.to_vec()).collect();
    let mut tops: [i8; FOUNDATION_COUNT] =
        std::array::from_fn(|f| state.foundation_top_rank(f));
    let mut moves = Vec::new();

    'scan: loop {
        for (column, cards) in columns.iter_mut().enumerate() {
            let Some(card) = cards.last() else {
                continue;
            };
            let foundation = card.suit().index();
            if rank_of(card) == tops[foundation] + 1 {
                tops[foundation] += 1;
                cards.pop();
                moves.push(CastleMove::ToFoundation { column, foundation });
                continue 'scan;
            }
        }
        break;
    }

    trace!(count = moves.len(), "auto-complete sequence computed");
    moves
}
