//! Card primitives: cards, piles and the 52-card deck.
//!
//! ## Key Types
//!
//! - `Card`: rank + suit + face-up flag, a plain `Copy` value
//! - `Pile`: LIFO stack of cards (top = last)
//! - `Deck`: shuffled draw source built from `standard_deck`

pub mod card;
pub mod pile;
pub mod deck;

pub use card::{Card, CardSnapshot, Rank, Suit};
pub use pile::{Pile, PileSnapshot};
pub use deck::{shuffle, standard_deck, Deck, DECK_SIZE};
