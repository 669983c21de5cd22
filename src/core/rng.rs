//! Injectable randomness.
//!
//! Every random decision in the engine (deck shuffles, dealing, Favor and
//! cat-pair thefts) goes through a `RandomSource`. Production games use
//! `GameRng`; tests script outcomes with `FixedRng`.
//!
//! ```
//! use kitten_engine::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let mut replay = GameRng::new(42);
//!
//! // Same seed, same sequence
//! assert_eq!(rng.next_index(52), replay.next_index(52));
//!
//! // Forks are independent but deterministic
//! let mut a = rng.fork();
//! let mut b = replay.fork();
//! assert_eq!(a.next_index(1000), b.next_index(1000));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cards::Card;

/// Source of uniform random choices.
///
/// `next_index(len)` must return a value in `0..len`; it is never called
/// with `len == 0`.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform permutation of `cards` in place.
    ///
    /// The default is a Fisher-Yates pass driven by `next_index`.
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        for i in (1..cards.len()).rev() {
            let j = self.next_index(i + 1);
            cards.swap(i, j);
        }
    }
}

/// Deterministic RNG for games.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence, so a
    /// seeded store hands every game its own reproducible stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }
}

impl RandomSource for GameRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        use rand::seq::SliceRandom;
        cards.shuffle(&mut self.inner);
    }
}

/// Scripted randomness for tests.
///
/// Returns the queued indices in order (reduced modulo `len`), then `0`
/// once the queue is empty. Shuffles leave the order untouched, so a test
/// can lay out a draw pile and know it stays that way.
#[derive(Clone, Debug, Default)]
pub struct FixedRng {
    indices: VecDeque<usize>,
}

impl FixedRng {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Queue another index.
    pub fn push(&mut self, index: usize) {
        self.indices.push_back(index);
    }
}

impl RandomSource for FixedRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map_or(0, |i| i % len)
    }

    fn shuffle_cards(&mut self, _cards: &mut [Card]) {}
}
