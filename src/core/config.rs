//! Game configuration.
//!
//! Each game takes a small builder-style config at construction:
//! - [`SnakesConfig`]: dice count, collision back-up distance, dice seed
//! - [`LudoConfig`]: main-loop size, dice seed
//!
//! Defaults match the canonical rules; every field can be overridden.

use serde::{Deserialize, Serialize};

/// Tiles both players are pushed back after a collision on the linear board.
pub const DEFAULT_COLLISION_BACKUP: u32 = 7;

/// Cells in each color's private finish lane, the last one being FINISH.
pub const FINISH_LANE_LEN: usize = 5;

/// Roll needed to bring a Ludo token out of HOME.
pub const HOME_EXIT_ROLL: u32 = 6;

/// Configuration for a Snakes & Ladders game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakesConfig {
    /// Dice rolled per turn (at least 1).
    pub dice_count: usize,

    /// Tiles each player moves back after a collision.
    pub collision_backup: u32,

    /// Seed for the default dice source.
    pub seed: u64,
}

impl Default for SnakesConfig {
    fn default() -> Self {
        Self {
            dice_count: 1,
            collision_backup: DEFAULT_COLLISION_BACKUP,
            seed: 0,
        }
    }
}

impl SnakesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dice(mut self, count: usize) -> Self {
        self.dice_count = count;
        self
    }

    #[must_use]
    pub fn with_collision_backup(mut self, tiles: u32) -> Self {
        self.collision_backup = tiles;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Size of the shared Ludo main loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopSize {
    /// 44-cell loop (11 per color).
    #[default]
    Compact44,
    /// 52-cell loop (13 per color).
    Classic52,
}

impl LoopSize {
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            LoopSize::Compact44 => 44,
            LoopSize::Classic52 => 52,
        }
    }

    /// Loop cells per color segment.
    #[must_use]
    pub const fn segment(self) -> usize {
        self.len() / 4
    }

    /// Loop indices of the safe stars.
    #[must_use]
    pub fn safe_indices(self) -> &'static [usize] {
        match self {
            LoopSize::Compact44 => &[6, 18, 29, 40],
            LoopSize::Classic52 => &[8, 21, 34, 47],
        }
    }
}

/// Configuration for a Ludo game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoConfig {
    pub loop_size: LoopSize,

    /// Seed for the default die.
    pub seed: u64,
}

impl LudoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_loop_size(mut self, loop_size: LoopSize) -> Self {
        self.loop_size = loop_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
