//! Beleaguered Castle rules: deal, legality, apply/undo, enumeration.
//!
//! There is no stored game-over flag. Winning and being stuck are pure
//! predicates over the position.

use tracing::{debug, instrument, trace};

use super::state::{CastleMove, CastleState, COLUMN_COUNT, COLUMN_DEPTH, FOUNDATION_COUNT};
use crate::cards::{shuffle, standard_deck, Card, Pile, Rank};
use crate::core::{EngineError, RandomSource, Result, SeededRng};
use crate::rules::{Legality, ReversibleRules};

/// Deal a game from `seed` using the LCG.
pub fn deal(seed: u32) -> Result<CastleState> {
    deal_with_rng(seed, &mut SeededRng::new(seed))
}

/// Deal with an injected generator. `seed` is recorded on the state only.
///
/// Shuffles a full deck, turns every card face-up, moves the four aces to
/// their foundations and deals the remaining 48 in shuffle order, six per
/// column, column 0 first.
#[instrument(level = "debug", skip(rng))]
pub fn deal_with_rng<R: RandomSource + ?Sized>(seed: u32, rng: &mut R) -> Result<CastleState> {
    let mut deck = standard_deck();
    shuffle(&mut deck, rng);

    let mut foundations: [Pile; FOUNDATION_COUNT] = Default::default();
    let mut remainder = Vec::with_capacity(COLUMN_COUNT * COLUMN_DEPTH);
    for card in deck.into_iter().map(Card::turned_up) {
        if card.rank() == Rank::Ace {
            foundations[card.suit().index()].push(card);
        } else {
            remainder.push(card);
        }
    }

    if remainder.len() != COLUMN_COUNT * COLUMN_DEPTH {
        return Err(EngineError::MalformedConstruction {
            what: "tableau remainder",
            expected: COLUMN_COUNT * COLUMN_DEPTH,
            actual: remainder.len(),
        });
    }

    let mut tableau: [Pile; COLUMN_COUNT] = Default::default();
    for (column, chunk) in tableau.iter_mut().zip(remainder.chunks(COLUMN_DEPTH)) {
        column.push_all(chunk.iter().copied());
    }

    debug!(seed, "castle dealt");
    Ok(CastleState {
        foundations,
        tableau,
        seed,
        move_count: 0,
    })
}

/// Rank after `rank`; `None` for King.
#[must_use]
pub fn next_rank(rank: Rank) -> Option<Rank> {
    rank.next()
}

/// Can the top of `column` go onto `foundation`?
pub fn check_foundation_move(state: &CastleState, column: usize, foundation: usize) -> Legality {
    let Some(source) = state.tableau.get(column) else {
        return Legality::Illegal(format!("column {} does not exist", column));
    };
    let Some(target) = state.foundations.get(foundation) else {
        return Legality::Illegal(format!("foundation {} does not exist", foundation));
    };
    let Some(card) = source.peek() else {
        return Legality::Illegal(format!("column {} is empty", column));
    };
    let Some(suit) = CastleState::foundation_suit(foundation) else {
        return Legality::Illegal(format!("foundation {} does not exist", foundation));
    };
    if card.suit() != suit {
        return Legality::Illegal(format!(
            "{} does not match foundation {} suit {}",
            card, foundation, suit
        ));
    }

    match target.peek() {
        None if card.rank() == Rank::Ace => Legality::Legal,
        None => Legality::Illegal(format!("empty foundation {} needs an Ace, not {}", foundation, card)),
        Some(top) if next_rank(top.rank()) == Some(card.rank()) => Legality::Legal,
        Some(top) => Legality::Illegal(format!("{} cannot follow {} on foundation {}", card, top, foundation)),
    }
}

/// Can the top of column `from` go onto column `to`?
///
/// Empty columns take any card; otherwise the moving card must be exactly one
/// rank below the destination top, regardless of suit.
pub fn check_tableau_move(state: &CastleState, from: usize, to: usize) -> Legality {
    if from == to {
        return Legality::Illegal(format!("column {} cannot move onto itself", from));
    }
    let Some(source) = state.tableau.get(from) else {
        return Legality::Illegal(format!("column {} does not exist", from));
    };
    let Some(target) = state.tableau.get(to) else {
        return Legality::Illegal(format!("column {} does not exist", to));
    };
    let Some(card) = source.peek() else {
        return Legality::Illegal(format!("column {} is empty", from));
    };

    match target.peek() {
        None => Legality::Legal,
        Some(top) if card.rank().next() == Some(top.rank()) => Legality::Legal,
        Some(top) => Legality::Illegal(format!("{} cannot be placed on {}", card, top)),
    }
}

pub fn can_move_to_foundation(state: &CastleState, column: usize, foundation: usize) -> bool {
    check_foundation_move(state, column, foundation).is_legal()
}

pub fn can_move_to_tableau(state: &CastleState, from: usize, to: usize) -> bool {
    check_tableau_move(state, from, to).is_legal()
}

pub fn check_move(state: &CastleState, mv: &CastleMove) -> Legality {
    match *mv {
        CastleMove::ToFoundation { column, foundation } => {
            check_foundation_move(state, column, foundation)
        }
        CastleMove::ToTableau { from, to } => check_tableau_move(state, from, to),
    }
}

/// Apply a move, checking legality first. Increments `move_count`.
pub fn apply_move(state: &mut CastleState, mv: &CastleMove) -> Result<()> {
    check_move(state, mv).into_result()?;

    match *mv {
        CastleMove::ToFoundation { column, foundation } => {
            let card = state.tableau[column].pop_or_fail("tableau column")?;
            state.foundations[foundation].push(card);
        }
        CastleMove::ToTableau { from, to } => {
            let card = state.tableau[from].pop_or_fail("tableau column")?;
            state.tableau[to].push(card);
        }
    }
    state.move_count += 1;
    debug!(%mv, move_count = state.move_count, "castle move applied");
    Ok(())
}

/// Invert a move previously applied with `apply_move`. Decrements `move_count`.
///
/// No legality check: this is the paired inverse, not a rules gate.
pub fn undo_move(state: &mut CastleState, mv: &CastleMove) -> Result<()> {
    match *mv {
        CastleMove::ToFoundation { column, foundation } => {
            column_mut(state, column)?;
            let card = foundation_mut(state, foundation)?.pop_or_fail("foundation")?;
            column_mut(state, column)?.push(card);
        }
        CastleMove::ToTableau { from, to } => {
            // Both columns must exist before anything is popped.
            column_mut(state, from)?;
            let card = column_mut(state, to)?.pop_or_fail("tableau column")?;
            column_mut(state, from)?.push(card);
        }
    }
    state.move_count = state.move_count.saturating_sub(1);
    debug!(%mv, move_count = state.move_count, "castle move undone");
    Ok(())
}

fn column_mut(state: &mut CastleState, index: usize) -> Result<&mut Pile> {
    state
        .tableau
        .get_mut(index)
        .ok_or_else(|| EngineError::illegal(format!("column {} does not exist", index)))
}

fn foundation_mut(state: &mut CastleState, index: usize) -> Result<&mut Pile> {
    state
        .foundations
        .get_mut(index)
        .ok_or_else(|| EngineError::illegal(format!("foundation {} does not exist", index)))
}

/// Every legal move.
///
/// For each non-empty source column in ascending order: foundation moves by
/// ascending foundation index, then tableau moves by ascending destination.
pub fn legal_moves(state: &CastleState) -> Vec<CastleMove> {
    let mut moves = Vec::new();
    for column in 0..COLUMN_COUNT {
        if state.tableau[column].is_empty() {
            continue;
        }
        for foundation in 0..FOUNDATION_COUNT {
            if can_move_to_foundation(state, column, foundation) {
                moves.push(CastleMove::ToFoundation { column, foundation });
            }
        }
        for to in 0..COLUMN_COUNT {
            if can_move_to_tableau(state, column, to) {
                moves.push(CastleMove::ToTableau { from: column, to });
            }
        }
    }
    trace!(count = moves.len(), "castle legal moves");
    moves
}

pub fn has_no_moves(state: &CastleState) -> bool {
    legal_moves(state).is_empty()
}

/// Every foundation holds all 13 cards of its suit.
pub fn is_won(state: &CastleState) -> bool {
    state.foundations.iter().all(|f| f.len() == Rank::ALL.len())
}

/// Beleaguered Castle as a reversible rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BeleagueredCastle;

impl ReversibleRules for BeleagueredCastle {
    type State = CastleState;
    type Move = CastleMove;

    fn check(state: &CastleState, mv: &CastleMove) -> Legality {
        check_move(state, mv)
    }

    fn apply(state: &mut CastleState, mv: &CastleMove) -> Result<()> {
        apply_move(state, mv)
    }

    fn undo(state: &mut CastleState, mv: &CastleMove) -> Result<()> {
        undo_move(state, mv)
    }

    fn legal_moves(state: &CastleState) -> Vec<CastleMove> {
        legal_moves(state)
    }
}
