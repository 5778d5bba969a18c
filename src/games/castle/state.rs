//! Beleaguered Castle board and move types.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Pile, PileSnapshot, Rank, Suit, DECK_SIZE};
use crate::core::{EngineError, Result};

pub const FOUNDATION_COUNT: usize = 4;
pub const COLUMN_COUNT: usize = 8;
/// Cards per column after the deal.
pub const COLUMN_DEPTH: usize = 6;

/// A Beleaguered Castle move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleMove {
    /// Top of `column` onto `foundation`.
    ToFoundation { column: usize, foundation: usize },
    /// Top of column `from` onto column `to`.
    ToTableau { from: usize, to: usize },
}

impl CastleMove {
    /// Column the card leaves.
    #[must_use]
    pub fn source_column(&self) -> usize {
        match *self {
            CastleMove::ToFoundation { column, .. } => column,
            CastleMove::ToTableau { from, .. } => from,
        }
    }

    #[must_use]
    pub fn is_foundation_move(&self) -> bool {
        matches!(self, CastleMove::ToFoundation { .. })
    }
}

impl std::fmt::Display for CastleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastleMove::ToFoundation { column, foundation } => {
                write!(f, "col {} -> foundation {}", column, foundation)
            }
            CastleMove::ToTableau { from, to } => write!(f, "col {} -> col {}", from, to),
        }
    }
}

/// Full Beleaguered Castle position.
///
/// Foundation `i` only ever holds `Suit::ALL[i]`. Cards are conserved: the
/// foundations and columns always hold all 52 between them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CastleState {
    pub(super) foundations: [Pile; FOUNDATION_COUNT],
    pub(super) tableau: [Pile; COLUMN_COUNT],
    pub(super) seed: u32,
    pub(super) move_count: u32,
}

impl CastleState {
    /// Build a position from explicit piles (bottom to top).
    ///
    /// Requires 52 distinct cards in total and every foundation to be an
    /// ascending run of its own suit starting at the Ace. Cards are turned
    /// face-up. `move_count` starts at 0.
    pub fn from_parts(
        foundations: [Vec<Card>; FOUNDATION_COUNT],
        tableau: [Vec<Card>; COLUMN_COUNT],
        seed: u32,
    ) -> Result<Self> {
        let mut seen = FxHashSet::default();
        let all = foundations.iter().chain(tableau.iter()).flatten();
        for card in all {
            if !seen.insert((card.rank(), card.suit())) {
                return Err(EngineError::MalformedConstruction {
                    what: "castle layout (duplicate card)",
                    expected: DECK_SIZE,
                    actual: seen.len() + 1,
                });
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(EngineError::MalformedConstruction {
                what: "castle layout",
                expected: DECK_SIZE,
                actual: seen.len(),
            });
        }

        for (idx, pile) in foundations.iter().enumerate() {
            let suit = Suit::ALL[idx];
            // Length of the Ace-up run of this suit at the bottom of the pile.
            let run = pile
                .iter()
                .enumerate()
                .take_while(|(pos, c)| c.suit() == suit && usize::from(c.rank().index()) == *pos)
                .count();
            if run != pile.len() {
                return Err(EngineError::MalformedConstruction {
                    what: "castle foundation",
                    expected: run,
                    actual: pile.len(),
                });
            }
        }

        let to_pile = |cards: Vec<Card>| -> Pile { cards.into_iter().map(Card::turned_up).collect() };
        Ok(Self {
            foundations: foundations.map(to_pile),
            tableau: tableau.map(to_pile),
            seed,
            move_count: 0,
        })
    }

    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Forward moves applied minus moves undone.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile; FOUNDATION_COUNT] {
        &self.foundations
    }

    #[must_use]
    pub fn tableau(&self) -> &[Pile; COLUMN_COUNT] {
        &self.tableau
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> Option<&Pile> {
        self.foundations.get(index)
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Pile> {
        self.tableau.get(index)
    }

    /// The suit foundation `index` accepts.
    #[must_use]
    pub fn foundation_suit(index: usize) -> Option<Suit> {
        Suit::ALL.get(index).copied()
    }

    /// Top rank of a foundation as an ordinal, `-1` when empty.
    #[must_use]
    pub fn foundation_top_rank(&self, index: usize) -> i8 {
        self.foundations
            .get(index)
            .and_then(Pile::peek)
            .map_or(-1, |c| c.rank().index() as i8)
    }

    /// Rank the foundation needs next. `None` once it holds the King.
    #[must_use]
    pub fn foundation_next_rank(&self, index: usize) -> Option<Rank> {
        match self.foundations.get(index)?.peek() {
            None => Some(Rank::Ace),
            Some(top) => top.rank().next(),
        }
    }

    /// Cards across foundations and tableau.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.foundations.iter().map(Pile::len).sum::<usize>()
            + self.tableau.iter().map(Pile::len).sum::<usize>()
    }

    #[must_use]
    pub fn snapshot(&self) -> CastleSnapshot {
        CastleSnapshot {
            foundations: self.foundations.iter().map(Pile::snapshot).collect(),
            tableau: self.tableau.iter().map(Pile::snapshot).collect(),
            seed: self.seed,
            move_count: self.move_count,
            foundation_cards: self.foundations.iter().map(Pile::len).sum(),
        }
    }
}

/// Plain-data view of a castle position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleSnapshot {
    pub foundations: Vec<PileSnapshot>,
    pub tableau: Vec<PileSnapshot>,
    pub seed: u32,
    pub move_count: u32,
    /// Derived: cards already home.
    pub foundation_cards: usize,
}
