//! 9-Card Golf rules: moves, legality, application, initial reveal and
//! round-end tracking.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::grid::{GolfGrid, GridPosition, GRID_COLS, GRID_ROWS, GRID_SIZE};
use crate::cards::Card;
use crate::core::{PlayerId, Result, RevealError};
use crate::rules::Legality;

/// Cards each player turns up before play starts.
pub const INITIAL_REVEAL_COUNT: usize = 3;

/// What to do with the drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GolfMove {
    /// Put the drawn card in the cell; the old card goes to the discard pile.
    Swap { row: usize, col: usize },
    /// Discard the drawn card and flip a face-down cell.
    DiscardAndFlip { row: usize, col: usize },
}

impl GolfMove {
    #[must_use]
    pub fn row(&self) -> usize {
        match *self {
            GolfMove::Swap { row, .. } | GolfMove::DiscardAndFlip { row, .. } => row,
        }
    }

    #[must_use]
    pub fn col(&self) -> usize {
        match *self {
            GolfMove::Swap { col, .. } | GolfMove::DiscardAndFlip { col, .. } => col,
        }
    }

    /// The target cell, if in bounds.
    pub fn position(&self) -> Result<GridPosition> {
        GridPosition::new(self.row(), self.col())
    }
}

impl std::fmt::Display for GolfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GolfMove::Swap { row, col } => write!(f, "swap ({}, {})", row, col),
            GolfMove::DiscardAndFlip { row, col } => write!(f, "discard and flip ({}, {})", row, col),
        }
    }
}

/// Where the turn's card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    Stock,
    Discard,
}

impl DrawSource {
    #[must_use]
    pub fn pile_name(self) -> &'static str {
        match self {
            DrawSource::Stock => "stock",
            DrawSource::Discard => "discard pile",
        }
    }
}

/// A full Golf turn decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GolfAction {
    pub source: DrawSource,
    pub mv: GolfMove,
}

impl GolfAction {
    pub fn new(source: DrawSource, mv: GolfMove) -> Self {
        Self { source, mv }
    }
}

impl std::fmt::Display for GolfAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draw {}, {}", self.source.pile_name(), self.mv)
    }
}

/// Is `mv` legal on `grid`?
///
/// Swaps are legal anywhere on the grid. Discard-and-flip needs a face-down
/// target.
pub fn check_move(grid: &GolfGrid, mv: &GolfMove) -> Legality {
    let Ok(pos) = mv.position() else {
        return Legality::Illegal(format!("position ({}, {}) is out of bounds", mv.row(), mv.col()));
    };
    match mv {
        GolfMove::Swap { .. } => Legality::Legal,
        GolfMove::DiscardAndFlip { .. } if grid.get(pos).is_face_up() => {
            Legality::Illegal(format!("card at {} is already face-up", pos))
        }
        GolfMove::DiscardAndFlip { .. } => Legality::Legal,
    }
}

/// Apply `mv` with the drawn card. Returns the card headed for the discard
/// pile, face-up. Nothing changes when the move is illegal.
pub fn apply_move(grid: &mut GolfGrid, mv: &GolfMove, drawn: Card) -> Result<Card> {
    check_move(grid, mv).into_result()?;
    let pos = mv.position()?;
    let cell = grid.get_mut(pos);

    let discard = match mv {
        GolfMove::Swap { .. } => std::mem::replace(cell, drawn.turned_up()).turned_up(),
        GolfMove::DiscardAndFlip { .. } => {
            cell.set_face_up(true);
            drawn.turned_up()
        }
    };
    debug!(%mv, %discard, "golf move applied");
    Ok(discard)
}

/// Every legal move on `grid`: swaps for all nine cells, then
/// discard-and-flip for each face-down cell, both in row-major order.
pub fn legal_moves(grid: &GolfGrid) -> SmallVec<[GolfMove; 18]> {
    let mut moves = SmallVec::new();
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            moves.push(GolfMove::Swap { row, col });
        }
    }
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let mv = GolfMove::DiscardAndFlip { row, col };
            if check_move(grid, &mv).is_legal() {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Turn up the player's opening cards.
///
/// `indices` must be exactly three distinct row-major indices of face-down
/// cells. Everything is validated before any card is flipped.
pub fn initial_reveal(grid: &mut GolfGrid, indices: &[usize]) -> Result<()> {
    if indices.len() != INITIAL_REVEAL_COUNT {
        return Err(RevealError::WrongCount { count: indices.len() }.into());
    }
    let mut seen = FxHashSet::default();
    for &index in indices {
        if index >= GRID_SIZE {
            return Err(RevealError::OutOfBounds { index }.into());
        }
        if !seen.insert(index) {
            return Err(RevealError::Duplicate { index }.into());
        }
        if grid.cells()[index].is_face_up() {
            return Err(RevealError::AlreadyFaceUp { index }.into());
        }
    }

    for &index in indices {
        grid.get_mut(GridPosition::from_index(index)?).set_face_up(true);
    }
    Ok(())
}

/// Tracks the end of a round.
///
/// The first player to finish a turn with a fully face-up grid triggers the
/// round end; it closes once every other player has had one more turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEndTracker {
    triggering_player: Option<PlayerId>,
    final_turns_taken: FxHashSet<PlayerId>,
    player_count: usize,
}

impl RoundEndTracker {
    pub fn new(player_count: usize) -> Self {
        Self {
            triggering_player: None,
            final_turns_taken: FxHashSet::default(),
            player_count,
        }
    }

    #[must_use]
    pub fn triggering_player(&self) -> Option<PlayerId> {
        self.triggering_player
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggering_player.is_some()
    }

    /// Players who have taken their final turn since the trigger.
    #[must_use]
    pub fn final_turns_taken(&self) -> usize {
        self.final_turns_taken.len()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Call after `player` finishes a turn. Returns true when the round is over.
    ///
    /// Before the trigger: sets it if `grid` is fully face-up, and returns
    /// false either way. After: counts `player`'s final turn (unless it is the
    /// trigger) and returns true once every other player has had one.
    pub fn check_round_end(&mut self, player: PlayerId, grid: &GolfGrid) -> bool {
        let Some(trigger) = self.triggering_player else {
            if grid.is_all_face_up() {
                debug!(%player, "round end triggered");
                self.triggering_player = Some(player);
            }
            return false;
        };
        if player != trigger {
            self.final_turns_taken.insert(player);
        }
        self.final_turns_taken.len() >= self.player_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, Rank, Suit};
    use crate::core::EngineError;

    fn hidden_grid() -> GolfGrid {
        GolfGrid::from_cards(standard_deck().into_iter().take(GRID_SIZE).collect()).unwrap()
    }

    fn open_grid() -> GolfGrid {
        let mut grid = hidden_grid();
        grid.reveal_all();
        grid
    }

    #[test]
    fn test_check_move() {
        let mut grid = hidden_grid();
        assert!(check_move(&grid, &GolfMove::Swap { row: 2, col: 2 }).is_legal());
        assert!(check_move(&grid, &GolfMove::DiscardAndFlip { row: 0, col: 1 }).is_legal());

        let out = check_move(&grid, &GolfMove::Swap { row: 3, col: 0 });
        assert!(out.reason().unwrap().contains("out of bounds"));

        grid.get_mut(GridPosition::new(0, 1).unwrap()).set_face_up(true);
        let flipped = check_move(&grid, &GolfMove::DiscardAndFlip { row: 0, col: 1 });
        assert!(flipped.reason().unwrap().contains("already face-up"));
    }

    #[test]
    fn test_apply_swap() {
        let mut grid = hidden_grid();
        let drawn = Card::new(Rank::King, Suit::Spades);
        let old = *grid.get(GridPosition::new(1, 1).unwrap());

        let discard = apply_move(&mut grid, &GolfMove::Swap { row: 1, col: 1 }, drawn).unwrap();

        assert!(discard.same_card(&old));
        assert!(discard.is_face_up());
        let cell = grid.get(GridPosition::new(1, 1).unwrap());
        assert!(cell.same_card(&drawn));
        assert!(cell.is_face_up());
    }

    #[test]
    fn test_apply_discard_and_flip() {
        let mut grid = hidden_grid();
        let drawn = Card::new(Rank::Two, Suit::Hearts);
        let before = *grid.get(GridPosition::new(0, 2).unwrap());

        let discard = apply_move(&mut grid, &GolfMove::DiscardAndFlip { row: 0, col: 2 }, drawn).unwrap();

        assert_eq!(discard, drawn.turned_up());
        assert_eq!(*grid.get(GridPosition::new(0, 2).unwrap()), before.turned_up());
        assert_eq!(grid.face_down_count(), 8);
    }

    #[test]
    fn test_illegal_apply_leaves_grid() {
        let mut grid = open_grid();
        let before = grid;
        let drawn = Card::new(Rank::Ten, Suit::Clubs);

        let err = apply_move(&mut grid, &GolfMove::DiscardAndFlip { row: 0, col: 0 }, drawn);
        assert!(matches!(err, Err(EngineError::IllegalMove { .. })));
        let err = apply_move(&mut grid, &GolfMove::Swap { row: 0, col: 5 }, drawn);
        assert!(matches!(err, Err(EngineError::IllegalMove { .. })));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_legal_moves() {
        assert_eq!(legal_moves(&hidden_grid()).len(), 18);

        let open = legal_moves(&open_grid());
        assert_eq!(open.len(), 9);
        assert!(open.iter().all(|m| matches!(m, GolfMove::Swap { .. })));
    }

    #[test]
    fn test_initial_reveal() {
        let mut grid = hidden_grid();
        initial_reveal(&mut grid, &[0, 4, 8]).unwrap();
        assert_eq!(grid.face_down_count(), 6);
        assert!(grid.cells()[4].is_face_up());
    }

    #[test]
    fn test_initial_reveal_errors() {
        let mut grid = hidden_grid();
        let cases: [(&[usize], RevealError); 4] = [
            (&[0, 1], RevealError::WrongCount { count: 2 }),
            (&[0, 1, 1], RevealError::Duplicate { index: 1 }),
            (&[0, 9, 2], RevealError::OutOfBounds { index: 9 }),
            (&[0, 1, 2, 3], RevealError::WrongCount { count: 4 }),
        ];
        for (indices, expected) in cases {
            assert_eq!(initial_reveal(&mut grid, indices), Err(expected.into()));
        }
        assert_eq!(grid.face_down_count(), 9);

        grid.get_mut(GridPosition::new(1, 0).unwrap()).set_face_up(true);
        assert_eq!(
            initial_reveal(&mut grid, &[0, 3, 5]),
            Err(RevealError::AlreadyFaceUp { index: 3 }.into())
        );
        // The valid index 0 was not flipped.
        assert_eq!(grid.face_down_count(), 8);
    }

    #[test]
    fn test_round_end_two_players() {
        let mut tracker = RoundEndTracker::new(2);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

        assert!(!tracker.check_round_end(p0, &hidden_grid()));
        assert!(!tracker.check_round_end(p1, &hidden_grid()));
        assert!(!tracker.is_triggered());

        assert!(!tracker.check_round_end(p0, &open_grid()));
        assert_eq!(tracker.triggering_player(), Some(p0));
        assert!(tracker.check_round_end(p1, &hidden_grid()));
    }

    #[test]
    fn test_round_end_three_players() {
        let mut tracker = RoundEndTracker::new(3);
        let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));

        assert!(!tracker.check_round_end(p1, &open_grid()));
        assert!(!tracker.check_round_end(p2, &hidden_grid()));
        assert_eq!(tracker.final_turns_taken(), 1);
        // Trigger stays with player 1 even if others finish their grids.
        assert!(tracker.check_round_end(p0, &open_grid()));
        assert_eq!(tracker.triggering_player(), Some(p1));
    }

    #[test]
    fn test_display() {
        let action = GolfAction::new(DrawSource::Discard, GolfMove::Swap { row: 1, col: 2 });
        assert_eq!(action.to_string(), "draw discard pile, swap (1, 2)");
        assert_eq!(
            GolfMove::DiscardAndFlip { row: 0, col: 0 }.to_string(),
            "discard and flip (0, 0)"
        );
    }
}
