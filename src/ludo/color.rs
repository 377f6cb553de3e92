use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::LoopSize;

/// A Ludo seat color. Each color enters the main loop at its own start cell
/// and leaves it for its private finish lane one cell before that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
    ];

    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
        }
    }

    /// Loop cell where tokens of this color enter play.
    #[must_use]
    pub const fn start_index(self, loop_size: LoopSize) -> usize {
        self.ordinal() * loop_size.segment()
    }

    /// Last loop cell before this color's finish lane.
    #[must_use]
    pub const fn finish_entry_index(self, loop_size: LoopSize) -> usize {
        let len = loop_size.len();
        (self.start_index(loop_size) + len - 1) % len
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
