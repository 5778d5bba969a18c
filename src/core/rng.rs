//! Random sources for shuffling and AI decisions.
//!
//! ## Key Types
//!
//! - `RandomSource`: anything producing a continuous value in `[0, 1)`.
//!   Every game-facing entry point takes one so callers control determinism.
//! - `SeededRng`: the 32-bit linear congruential generator used for deals.
//!   Same seed, same sequence, on every platform.
//! - `GameRng`: ChaCha8-backed default generator with serializable state,
//!   for sessions that do not need LCG-compatible deals.
//!
//! ```
//! use patience_core::core::{RandomSource, SeededRng};
//!
//! let mut a = SeededRng::new(7);
//! let mut b = SeededRng::new(7);
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A generator of continuous values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`, advancing the generator.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with empty range");
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Choose a uniformly random element from a slice.
///
/// Returns `None` for an empty slice.
pub fn choose<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.next_index(items.len())])
}

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Linear congruential generator: `s = (s * 1664525 + 1013904223) mod 2^32`.
///
/// Each call advances the state and returns `s / 2^32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator whose initial state is `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the raw 32-bit state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// ChaCha8 generator for play that does not need LCG-compatible deals,
/// such as AI tie-breaking. It can be checkpointed and resumed mid-stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let stream = ChaCha8Rng::seed_from_u64(seed);
        Self { stream, seed }
    }

    /// Seeds from the thread-local generator, for non-reproducible play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Position in the stream. Cheap to take at any point.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        let word_pos = self.stream.get_word_pos();
        GameRngState { seed: self.seed, word_pos }
    }

    /// Resumes exactly where `state` was taken.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.stream.set_word_pos(state.word_pos);
        rng
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.stream.gen()
    }
}

/// Saved `GameRng` position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha word counter.
    pub word_pos: u128,
}
