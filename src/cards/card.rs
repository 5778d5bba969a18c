//! Playing cards: rank, suit and a face-up flag.
//!
//! `Card` is a `Copy` value. Rank and suit are fixed at construction; the
//! face-up flag is the only mutable part. Moving a card between piles moves
//! the value, so no two piles can ever alias the same card.

use serde::{Deserialize, Serialize};

/// Card rank, ordered Ace (low) to King (high).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Ordinal, Ace = 0 through King = 12.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(index)).copied()
    }

    /// The next rank up. `None` for King.
    #[must_use]
    pub fn next(self) -> Option<Rank> {
        Rank::from_index(self.index() + 1)
    }

    /// The next rank down. `None` for Ace.
    #[must_use]
    pub fn prev(self) -> Option<Rank> {
        self.index().checked_sub(1).and_then(Rank::from_index)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Card suit. `ALL` fixes the foundation order used by Beleaguered Castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short())
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    /// Create a card with an explicit face-up flag.
    #[must_use]
    pub const fn with_face(rank: Rank, suit: Suit, face_up: bool) -> Self {
        Self {
            rank,
            suit,
            face_up,
        }
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    /// This card turned face-up.
    #[must_use]
    pub fn turned_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// This card turned face-down.
    #[must_use]
    pub fn turned_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    /// Same rank and suit, ignoring orientation.
    #[must_use]
    pub fn same_card(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.rank, self.suit)
    }

    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            rank: self.rank,
            suit: self.suit,
            face_up: self.face_up,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Plain-data view of a card for transcripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl From<CardSnapshot> for Card {
    fn from(snapshot: CardSnapshot) -> Self {
        Card::with_face(snapshot.rank, snapshot.suit, snapshot.face_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert_eq!(Rank::Ace.index(), 0);
        assert_eq!(Rank::King.index(), 12);
        assert!(Rank::Ace < Rank::Two);
        assert_eq!(Rank::from_index(13), None);
    }

    #[test]
    fn test_rank_next_and_prev() {
        assert_eq!(Rank::Ace.next(), Some(Rank::Two));
        assert_eq!(Rank::Queen.next(), Some(Rank::King));
        assert_eq!(Rank::King.next(), None);
        assert_eq!(Rank::Ace.prev(), None);
        assert_eq!(Rank::Two.prev(), Some(Rank::Ace));
    }

    #[test]
    fn test_suit_order() {
        for (i, suit) in Suit::ALL.iter().enumerate() {
            assert_eq!(suit.index(), i);
        }
        assert!(Suit::Hearts.is_red());
        assert!(!Suit::Spades.is_red());
    }

    #[test]
    fn test_card_defaults_face_down() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert!(!card.is_face_up());
        assert_eq!(card.label(), "QH");
        assert_eq!(card.to_string(), "QH");

        let up = card.turned_up();
        assert!(up.is_face_up());
        assert!(up.same_card(&card));
        assert_ne!(up, card);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut card = Card::new(Rank::Ten, Suit::Clubs);
        let snapshot = card.snapshot();
        card.set_face_up(true);

        assert!(!snapshot.face_up);
        assert_eq!(Card::from(snapshot), Card::new(Rank::Ten, Suit::Clubs));
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = Card::with_face(Rank::Ace, Suit::Spades, true).snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"rank":"Ace","suit":"Spades","face_up":true}"#);
        let back: CardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
