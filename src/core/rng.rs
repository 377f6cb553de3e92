//! Deterministic random number generation for dice.
//!
//! - **Deterministic**: the same seed always rolls the same sequence.
//! - **Checkpointable**: `state()` captures the stream position in O(1) so a
//!   saved game resumes with the exact rolls it would have produced.
//!
//! ```
//! use tileboard::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_face(6), b.roll_face(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Roll one fair die with `sides` faces, returning `1..=sides`.
    pub fn roll_face(&mut self, sides: u8) -> u8 {
        self.inner.gen_range(1..=sides)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the current stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Rebuild an RNG at a captured stream position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
