//! Randomness provider boundary.
//!
//! The engine consumes randomness through the `RandomnessProvider` trait and
//! calls it in exactly two places: seeding a deck shuffle at battle creation
//! and breaking an exact speed tie. All other computation is deterministic,
//! so a battle replayed against a provider that returns the same values goes
//! through identical states.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of unpredictable integers.
///
/// The concrete algorithm is a host policy; the engine only requires that
/// equal call sequences against equal providers yield equal values.
pub trait RandomnessProvider {
    /// Return the next random integer.
    fn next_random(&mut self) -> u64;
}

/// Deterministic ChaCha8-backed provider.
///
/// The default provider for tests and offline simulation. Same seed, same
/// sequence.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    /// Create a provider from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this provider was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> SeededRngState {
        SeededRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a provider from a saved state.
    #[must_use]
    pub fn from_state(state: &SeededRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomnessProvider for SeededRng {
    fn next_random(&mut self) -> u64 {
        self.inner.gen()
    }
}

/// Serializable provider state.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how many
/// values have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
