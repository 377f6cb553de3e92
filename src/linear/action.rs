//! Tile actions on the linear board.
//!
//! The action set is closed, so it is an enum with a `match`-based
//! [`TileAction::apply`]. Applying an action only records an effect on the
//! pawn; the board decides when that effect is resolved.

use serde::{Deserialize, Serialize};

use super::pawn::Pawn;
use super::tile::{ActionDescriptor, TileId};
use crate::core::BoardError;

/// Effect triggered by landing on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileAction {
    /// Climb to a higher tile.
    Ladder(TileId),
    /// Slide down to a lower tile.
    Snake(TileId),
    /// Roll again.
    Bonus,
}

impl TileAction {
    /// Type a descriptor found on `tile`.
    ///
    /// Only the shape of the descriptor is checked here. Whether the
    /// destination exists and points the right way is checked by the board.
    pub fn from_descriptor(tile: TileId, descriptor: &ActionDescriptor) -> Result<Self, BoardError> {
        let kind = descriptor.kind.trim().to_ascii_lowercase();
        match kind.as_str() {
            "ladder" => descriptor
                .destination
                .map(TileAction::Ladder)
                .ok_or(BoardError::MissingDestination { tile, kind: "ladder" }),
            "snake" => descriptor
                .destination
                .map(TileAction::Snake)
                .ok_or(BoardError::MissingDestination { tile, kind: "snake" }),
            "bonus" => Ok(TileAction::Bonus),
            _ => Err(BoardError::UnknownAction {
                tile,
                kind: descriptor.kind.clone(),
            }),
        }
    }

    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            TileAction::Ladder(_) => "ladder",
            TileAction::Snake(_) => "snake",
            TileAction::Bonus => "bonus",
        }
    }

    #[must_use]
    pub fn destination(self) -> Option<TileId> {
        match self {
            TileAction::Ladder(to) | TileAction::Snake(to) => Some(to),
            TileAction::Bonus => None,
        }
    }

    /// Record this action's effect on `pawn`.
    pub fn apply(self, pawn: &mut Pawn) {
        match self {
            TileAction::Ladder(to) | TileAction::Snake(to) => pawn.pending_move = Some(to),
            TileAction::Bonus => pawn.extra_turn = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_kinds_are_case_insensitive() {
        let desc = ActionDescriptor {
            kind: " LADDER ".to_string(),
            destination: Some(14),
        };
        assert_eq!(TileAction::from_descriptor(4, &desc), Ok(TileAction::Ladder(14)));

        let desc = ActionDescriptor {
            kind: "Snake".to_string(),
            destination: Some(7),
        };
        assert_eq!(TileAction::from_descriptor(17, &desc), Ok(TileAction::Snake(7)));

        assert_eq!(
            TileAction::from_descriptor(3, &ActionDescriptor::bonus()),
            Ok(TileAction::Bonus)
        );
    }

    #[test]
    fn test_descriptor_errors() {
        let desc = ActionDescriptor {
            kind: "ladder".to_string(),
            destination: None,
        };
        assert_eq!(
            TileAction::from_descriptor(4, &desc),
            Err(BoardError::MissingDestination { tile: 4, kind: "ladder" })
        );

        let desc = ActionDescriptor {
            kind: "portal".to_string(),
            destination: Some(9),
        };
        assert_eq!(
            TileAction::from_descriptor(2, &desc),
            Err(BoardError::UnknownAction {
                tile: 2,
                kind: "portal".to_string()
            })
        );
    }

    #[test]
    fn test_apply() {
        let mut pawn = Pawn::at(4);
        TileAction::Ladder(14).apply(&mut pawn);
        assert_eq!(pawn.pending_move, Some(14));
        assert_eq!(pawn.tile, 4);
        assert!(!pawn.extra_turn);

        let mut pawn = Pawn::at(3);
        TileAction::Bonus.apply(&mut pawn);
        assert_eq!(pawn.pending_move, None);
        assert!(pawn.take_extra_turn());
        assert!(!pawn.take_extra_turn());
    }
}
