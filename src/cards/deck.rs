//! 52-card deck construction, shuffling and drawing.

use tracing::trace;

use super::card::{Card, Rank, Suit};
use crate::core::{EngineError, RandomSource, Result};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// All 52 cards, face-down, suit-major then rank-ascending.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Fisher-Yates shuffle in place.
///
/// For `i` from the last index down to 1, swaps `i` with
/// `floor(rng() * (i + 1))`. The same generator state always yields the same
/// permutation.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// A drawable deck; the last card is the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Fresh, unshuffled 52-card deck.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: standard_deck(),
        }
    }

    /// Fresh deck shuffled with the given generator.
    pub fn shuffled<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.cards, rng);
        trace!(cards = self.cards.len(), "deck shuffled");
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return the top card; an empty deck is a caller error.
    pub fn draw_or_fail(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(EngineError::EmptySource { pile: "deck" })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeededRng;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_standard_deck_order() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck[0], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(deck[12], Card::new(Rank::King, Suit::Clubs));
        assert_eq!(deck[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::King, Suit::Spades));
        assert!(deck.iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_standard_deck_is_distinct() {
        let unique: FxHashSet<_> = standard_deck().into_iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut deck = standard_deck();
        shuffle(&mut deck, &mut SeededRng::new(42));

        assert_ne!(deck, standard_deck());
        let unique: FxHashSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_deterministic() {
        let a = Deck::shuffled(&mut SeededRng::new(7));
        let b = Deck::shuffled(&mut SeededRng::new(7));
        let c = Deck::shuffled(&mut SeededRng::new(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_small_slices() {
        let mut rng = SeededRng::new(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = Deck::new();
        assert_eq!(deck.draw(), Some(Card::new(Rank::King, Suit::Spades)));
        assert_eq!(deck.len(), 51);
    }

    #[test]
    fn test_draw_or_fail_when_empty() {
        let mut deck = Deck::from_cards(vec![Card::new(Rank::Ace, Suit::Hearts)]);
        assert!(deck.draw_or_fail().is_ok());
        assert_eq!(
            deck.draw_or_fail(),
            Err(EngineError::EmptySource { pile: "deck" })
        );
        assert_eq!(deck.draw(), None);
    }
}
