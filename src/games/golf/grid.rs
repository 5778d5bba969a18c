//! The 3x3 Golf grid.
//!
//! Nine cells, row-major. A cell's card may be replaced or flipped but the
//! cell itself never goes away.

use serde::{Deserialize, Serialize};

use super::scoring::{score_grid, score_visible_cards};
use crate::cards::{Card, CardSnapshot};
use crate::core::{EngineError, Result};

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 3;
pub const GRID_SIZE: usize = GRID_ROWS * GRID_COLS;

/// A validated cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    row: usize,
    col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Position of a row-major cell index.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::new(index / GRID_COLS, index % GRID_COLS)
    }

    #[must_use]
    pub fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index.
    #[must_use]
    pub fn index(self) -> usize {
        self.row * GRID_COLS + self.col
    }

    /// All nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = GridPosition> {
        (0..GRID_SIZE).map(|index| GridPosition {
            row: index / GRID_COLS,
            col: index % GRID_COLS,
        })
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A player's nine cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GolfGrid {
    cells: [Card; GRID_SIZE],
}

impl GolfGrid {
    /// Build a grid from exactly nine cards, row-major.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let actual = cards.len();
        let cells: [Card; GRID_SIZE] = cards
            .try_into()
            .map_err(|_| EngineError::MalformedConstruction {
                what: "golf grid",
                expected: GRID_SIZE,
                actual,
            })?;
        Ok(Self { cells })
    }

    #[must_use]
    pub fn cells(&self) -> &[Card; GRID_SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, pos: GridPosition) -> &Card {
        &self.cells[pos.index()]
    }

    pub(super) fn get_mut(&mut self, pos: GridPosition) -> &mut Card {
        &mut self.cells[pos.index()]
    }

    /// The three cards of column `col`, top row first.
    #[must_use]
    pub fn column(&self, col: usize) -> [&Card; GRID_ROWS] {
        std::array::from_fn(|row| &self.cells[row * GRID_COLS + col])
    }

    #[must_use]
    pub fn is_all_face_up(&self) -> bool {
        self.cells.iter().all(Card::is_face_up)
    }

    #[must_use]
    pub fn face_down_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_face_up()).count()
    }

    /// Row-major indices of face-down cells.
    pub fn face_down_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_face_up())
            .map(|(i, _)| i)
            .collect()
    }

    /// Turn every cell face-up. Returns how many were flipped.
    pub fn reveal_all(&mut self) -> usize {
        let mut flipped = 0;
        for card in self.cells.iter_mut().filter(|c| !c.is_face_up()) {
            card.set_face_up(true);
            flipped += 1;
        }
        flipped
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.iter().map(Card::snapshot).collect(),
            visible_score: score_visible_cards(self),
            total_score: score_grid(self),
        }
    }
}

/// Plain-data view of a grid with its derived scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cells: Vec<CardSnapshot>,
    pub visible_score: i32,
    pub total_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, Rank, Suit};

    fn nine() -> Vec<Card> {
        standard_deck().into_iter().take(GRID_SIZE).collect()
    }

    #[test]
    fn test_from_cards_requires_nine() {
        assert!(GolfGrid::from_cards(nine()).is_ok());

        let mut short = nine();
        short.pop();
        assert_eq!(
            GolfGrid::from_cards(short),
            Err(EngineError::MalformedConstruction {
                what: "golf grid",
                expected: 9,
                actual: 8,
            })
        );

        let mut long = nine();
        long.push(Card::new(Rank::King, Suit::Spades));
        assert!(GolfGrid::from_cards(long).is_err());
    }

    #[test]
    fn test_position_bounds() {
        let pos = GridPosition::new(2, 1).unwrap();
        assert_eq!(pos.index(), 7);
        assert_eq!(GridPosition::from_index(7), Ok(pos));
        assert_eq!(GridPosition::new(3, 0), Err(EngineError::OutOfBounds { row: 3, col: 0 }));
        assert!(GridPosition::new(0, 3).is_err());
        assert!(GridPosition::from_index(9).is_err());
        assert_eq!(GridPosition::all().count(), 9);
    }

    #[test]
    fn test_column_view() {
        let grid = GolfGrid::from_cards(nine()).unwrap();
        let col = grid.column(1);
        // Clubs A..9 row-major: column 1 is 2, 5, 8.
        let ranks: Vec<_> = col.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Two, Rank::Five, Rank::Eight]);
    }

    #[test]
    fn test_reveal_all() {
        let mut grid = GolfGrid::from_cards(nine()).unwrap();
        assert_eq!(grid.face_down_count(), 9);
        grid.get_mut(GridPosition::new(0, 0).unwrap()).set_face_up(true);

        assert_eq!(grid.reveal_all(), 8);
        assert!(grid.is_all_face_up());
        assert!(grid.face_down_indices().is_empty());
    }

    #[test]
    fn test_snapshot_scores() {
        let mut grid = GolfGrid::from_cards(nine()).unwrap();
        let hidden = grid.snapshot();
        assert_eq!(hidden.visible_score, 0);
        assert_eq!(hidden.total_score, 41);

        grid.reveal_all();
        let snapshot = grid.snapshot();
        assert_eq!(snapshot.visible_score, 41);
        assert!(snapshot.cells.iter().all(|c| c.face_up));

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
