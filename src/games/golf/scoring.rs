//! Golf scoring. Lower is better.
//!
//! Point table: A=1, 2=-2, 3..10 face value, J=10, Q=10, K=0. A column of
//! three equal ranks scores 0 whatever the rank.

use super::grid::{GolfGrid, GRID_COLS};
use crate::cards::{Card, Rank};

/// Points for a single card.
#[must_use]
pub fn card_points(rank: Rank) -> i32 {
    match rank {
        Rank::Ace => 1,
        Rank::Two => -2,
        Rank::King => 0,
        Rank::Jack | Rank::Queen => 10,
        other => i32::from(other.index()) + 1,
    }
}

fn column_score(cards: [&Card; 3], counts: fn(&Card) -> bool) -> i32 {
    let [a, b, c] = cards;
    let matched = a.rank() == b.rank() && b.rank() == c.rank();
    if matched && cards.into_iter().all(counts) {
        return 0;
    }
    cards
        .into_iter()
        .filter(|card| counts(card))
        .map(|card| card_points(card.rank()))
        .sum()
}

/// Full score, face-down cards included.
#[must_use]
pub fn score_grid(grid: &GolfGrid) -> i32 {
    (0..GRID_COLS).map(|col| column_score(grid.column(col), |_| true)).sum()
}

/// Score counting face-up cards only. A column is zeroed only when all
/// three of its cards are face-up and match.
#[must_use]
pub fn score_visible_cards(grid: &GolfGrid) -> i32 {
    (0..GRID_COLS)
        .map(|col| column_score(grid.column(col), Card::is_face_up))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn grid_of(ranks: [Rank; 9], face_up: bool) -> GolfGrid {
        let suits = Suit::ALL.iter().cycle();
        let cards = ranks
            .iter()
            .zip(suits)
            .map(|(&rank, &suit)| Card::with_face(rank, suit, face_up))
            .collect();
        GolfGrid::from_cards(cards).unwrap()
    }

    #[test]
    fn test_card_points() {
        let expected = [1, -2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 0];
        for (rank, points) in Rank::ALL.iter().zip(expected) {
            assert_eq!(card_points(*rank), points, "{}", rank);
        }
    }

    #[test]
    fn test_no_matching_column() {
        use Rank::*;
        let grid = grid_of([Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine], true);
        assert_eq!(score_grid(&grid), 41);
        assert_eq!(score_visible_cards(&grid), 41);
    }

    #[test]
    fn test_matching_column_scores_zero() {
        use Rank::*;
        // Column 0 is three Queens, columns 1 and 2 are Kings and Twos.
        let grid = grid_of([Queen, King, Two, Queen, King, Two, Queen, King, Two], true);
        assert_eq!(score_grid(&grid), 0);

        let kings = grid_of([King; 9], false);
        assert_eq!(score_grid(&kings), 0);
    }

    #[test]
    fn test_visible_ignores_face_down() {
        use Rank::*;
        let mut cards: Vec<Card> = [Queen, Ace, Four, Queen, Two, Five, Queen, Three, Six]
            .iter()
            .map(|&r| Card::with_face(r, Suit::Hearts, true))
            .collect();
        // Hide the bottom Queen: the column no longer zeroes when visible.
        cards[6].set_face_up(false);
        let grid = GolfGrid::from_cards(cards).unwrap();

        // Hidden cards still count in the full score.
        assert_eq!(score_grid(&grid), 2 + 15);
        assert_eq!(score_visible_cards(&grid), 20 + 2 + 15);
    }
}
