//! Linear board tiles and the description they are built from.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::TileAction;
use crate::core::PlayerId;

/// Tile ids run `1..=N`; tile `N` is the final tile.
pub type TileId = u32;

/// Untyped action as it appears in a board description.
///
/// `kind` is one of `"ladder"`, `"snake"` or `"bonus"`, case-insensitive.
/// Ladders and snakes need a `destination`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub kind: String,
    #[serde(default)]
    pub destination: Option<TileId>,
}

impl ActionDescriptor {
    pub fn ladder(destination: TileId) -> Self {
        Self {
            kind: "ladder".to_string(),
            destination: Some(destination),
        }
    }

    pub fn snake(destination: TileId) -> Self {
        Self {
            kind: "snake".to_string(),
            destination: Some(destination),
        }
    }

    pub fn bonus() -> Self {
        Self {
            kind: "bonus".to_string(),
            destination: None,
        }
    }
}

/// One entry of a board description. `next == 0` means no next tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSpec {
    pub id: TileId,
    #[serde(default)]
    pub next: TileId,
    #[serde(default)]
    pub action: Option<ActionDescriptor>,
}

impl TileSpec {
    pub fn new(id: TileId, next: TileId) -> Self {
        Self {
            id,
            next,
            action: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.action = Some(action);
        self
    }
}

/// A validated tile and the players standing on it.
///
/// Occupants are kept in arrival order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    next: Option<TileId>,
    action: Option<TileAction>,
    occupants: SmallVec<[PlayerId; 4]>,
}

impl Tile {
    pub(crate) fn new(id: TileId, next: Option<TileId>, action: Option<TileAction>) -> Self {
        Self {
            id,
            next,
            action,
            occupants: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn next(&self) -> Option<TileId> {
        self.next
    }

    #[must_use]
    pub fn action(&self) -> Option<TileAction> {
        self.action
    }

    #[must_use]
    pub fn occupants(&self) -> &[PlayerId] {
        &self.occupants
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Earliest arrival that is not `player`.
    #[must_use]
    pub fn first_other(&self, player: PlayerId) -> Option<PlayerId> {
        self.occupants.iter().copied().find(|&p| p != player)
    }

    pub(crate) fn land(&mut self, player: PlayerId) {
        if !self.occupants.contains(&player) {
            self.occupants.push(player);
        }
    }

    pub(crate) fn leave(&mut self, player: PlayerId) {
        self.occupants.retain(|p| *p != player);
    }

    pub(crate) fn clear(&mut self) {
        self.occupants.clear();
    }
}
