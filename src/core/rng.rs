//! Deterministic random number generation for turn-order assignment.
//!
//! Same seed produces the same turn order, which keeps sessions replayable
//! and tests stable.
//!
//! ```
//! use quantum_fish::core::GameRng;
//!
//! let mut a = vec![1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! GameRng::new(7).shuffle(&mut a);
//! GameRng::new(7).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a seed drawn from the thread-local generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
