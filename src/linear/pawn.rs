use serde::{Deserialize, Serialize};

use super::tile::TileId;

/// A player's piece on the linear board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pawn {
    pub tile: TileId,

    /// Teleport recorded by a ladder or snake, resolved before the move ends.
    pub pending_move: Option<TileId>,

    /// Set by a bonus tile; consumed by the extra-turn check.
    pub extra_turn: bool,
}

impl Pawn {
    #[must_use]
    pub fn at(tile: TileId) -> Self {
        Self {
            tile,
            pending_move: None,
            extra_turn: false,
        }
    }

    /// Clear and return the bonus flag.
    pub fn take_extra_turn(&mut self) -> bool {
        std::mem::take(&mut self.extra_turn)
    }
}
