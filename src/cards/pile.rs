//! LIFO card pile.
//!
//! The last element is the top. Interior cards are never reordered: the only
//! mutations are push and pop at the top (plus `clear`).

use serde::{Deserialize, Serialize};

use super::card::{Card, CardSnapshot};
use crate::core::{EngineError, Result};

/// An ordered stack of cards, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pile from cards listed bottom to top.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Push a card onto the top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Push several cards; the last one ends up on top.
    pub fn push_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return the top card, failing on an empty pile.
    ///
    /// For call sites where emptiness is a contract violation.
    pub fn pop_or_fail(&mut self, pile: &'static str) -> Result<Card> {
        self.cards.pop().ok_or(EngineError::EmptySource { pile })
    }

    /// The top card, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Owned copy of the cards, bottom to top.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.clone()
    }

    /// Remove every card, returning them bottom to top.
    pub fn clear(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn snapshot(&self) -> PileSnapshot {
        PileSnapshot {
            cards: self.cards.iter().map(Card::snapshot).collect(),
            size: self.cards.len(),
        }
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Plain-data view of a pile, bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSnapshot {
    pub cards: Vec<CardSnapshot>,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut pile = Pile::new();
        pile.push(card(Rank::Ace));
        pile.push_all([card(Rank::Two), card(Rank::Three)]);

        assert_eq!(pile.len(), 3);
        assert_eq!(pile.peek(), Some(&card(Rank::Three)));
        assert_eq!(pile.pop(), Some(card(Rank::Three)));
        assert_eq!(pile.pop(), Some(card(Rank::Two)));
        assert_eq!(pile.pop(), Some(card(Rank::Ace)));
        assert_eq!(pile.pop(), None);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_pop_or_fail_on_empty() {
        let mut pile = Pile::new();
        assert_eq!(
            pile.pop_or_fail("discard pile"),
            Err(EngineError::EmptySource { pile: "discard pile" })
        );

        pile.push(card(Rank::Five));
        assert_eq!(pile.pop_or_fail("discard pile"), Ok(card(Rank::Five)));
    }

    #[test]
    fn test_to_vec_is_bottom_to_top_copy() {
        let mut pile: Pile = [card(Rank::Ace), card(Rank::King)].into_iter().collect();
        let copy = pile.to_vec();
        pile.pop();

        assert_eq!(copy, vec![card(Rank::Ace), card(Rank::King)]);
        assert_eq!(pile.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut pile = Pile::from_cards(vec![card(Rank::Ace), card(Rank::Two)]);
        let removed = pile.clear();
        assert_eq!(removed.len(), 2);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_snapshot_independent_of_mutation() {
        let mut pile = Pile::from_cards(vec![card(Rank::Ace)]);
        let snapshot = pile.snapshot();
        pile.push(card(Rank::Two));

        assert_eq!(snapshot.size, 1);
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].rank, Rank::Ace);
    }
}
