//! Seats at the table.
//!
//! Solitaire sessions use a single seat; Golf rotates through two to five.
//! `PlayerMap` is the parallel per-seat storage that the turn sequencer keeps
//! next to its roster.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Zero-based seat number. Seat 0 always acts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seats `0..seats` in turn order.
    ///
    /// ```
    /// use patience_core::core::PlayerId;
    ///
    /// let order: Vec<_> = PlayerId::all(3).map(PlayerId::index).collect();
    /// assert_eq!(order, [0, 1, 2]);
    /// ```
    pub fn all(seats: usize) -> impl Iterator<Item = PlayerId> {
        (0..seats).map(|seat| PlayerId(seat as u8))
    }

    /// Whoever sits to the left, wrapping back to seat 0 after the last one.
    #[must_use]
    pub fn next(self, seats: usize) -> Self {
        let following = self.index() + 1;
        if following >= seats {
            PlayerId(0)
        } else {
            PlayerId(following as u8)
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// One value per seat, stored in seat order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Takes ownership of `values`; entry `i` belongs to seat `i`.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self { seats: values }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.seats.get_mut(player.index())
    }

    /// Seat and value, in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }
}

impl<T> FromIterator<T> for PlayerMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}
