//! Events a game emits toward its consumer.
//!
//! Tile ids in events are board-native: tile ids `1..=N` on the linear
//! board, arena indices on the Ludo board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Something that happened in a game, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player's piece moved. On Ludo boards `player` is the token owner.
    PlayerMoved { player: PlayerId, from: u32, to: u32 },

    /// Dice were rolled for `player`.
    DiceRolled {
        player: PlayerId,
        faces: SmallVec<[u8; 4]>,
    },

    /// The turn passed to `player`.
    NextPlayer { player: PlayerId },

    /// `winner` finished. Terminal.
    GameOver { winner: PlayerId },

    /// A batch of moves resolved; consumers should redraw every piece.
    RefreshPositions,
}

impl GameEvent {
    /// Player the event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PlayerMoved { player, .. }
            | GameEvent::DiceRolled { player, .. }
            | GameEvent::NextPlayer { player } => Some(*player),
            GameEvent::GameOver { winner } => Some(*winner),
            GameEvent::RefreshPositions => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}

/// An event stamped with its position in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the whole history (starts at 0).
    pub sequence: u32,

    /// Turn number when the event fired (starts at 1).
    pub turn: u32,

    pub event: GameEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let moved = GameEvent::PlayerMoved {
            player: PlayerId::new(1),
            from: 3,
            to: 9,
        };
        assert_eq!(moved.player(), Some(PlayerId::new(1)));
        assert_eq!(GameEvent::RefreshPositions.player(), None);
        assert_eq!(
            GameEvent::GameOver { winner: PlayerId::new(0) }.player(),
            Some(PlayerId::new(0))
        );
    }

    #[test]
    fn test_terminal_event() {
        assert!(GameEvent::GameOver { winner: PlayerId::new(2) }.is_terminal());
        assert!(!GameEvent::NextPlayer { player: PlayerId::new(2) }.is_terminal());
    }

    #[test]
    fn test_event_serialization() {
        let record = EventRecord {
            sequence: 4,
            turn: 2,
            event: GameEvent::DiceRolled {
                player: PlayerId::new(0),
                faces: SmallVec::from_slice(&[6, 6]),
            },
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
