use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::token::TokenRef;
use crate::core::PlayerId;

/// Role of a Ludo cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LudoTileType {
    Home,
    Start,
    Normal,
    Safe,
    FinishEntry,
    Finish,
}

impl LudoTileType {
    /// HOME and SAFE cells never capture.
    #[must_use]
    pub fn is_safe(self) -> bool {
        matches!(self, LudoTileType::Home | LudoTileType::Safe)
    }
}

/// A cell of the Ludo arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoTile {
    index: usize,
    kind: LudoTileType,
    occupants: SmallVec<[TokenRef; 4]>,
}

impl LudoTile {
    pub(crate) fn new(index: usize, kind: LudoTileType) -> Self {
        Self {
            index,
            kind,
            occupants: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn kind(&self) -> LudoTileType {
        self.kind
    }

    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.kind.is_safe()
    }

    #[must_use]
    pub fn occupants(&self) -> &[TokenRef] {
        &self.occupants
    }

    /// Whether a token not owned by `player` is here.
    #[must_use]
    pub fn has_opponent(&self, player: PlayerId) -> bool {
        self.occupants.iter().any(|t| t.player != player)
    }

    pub(crate) fn enter(&mut self, token: TokenRef) {
        if !self.occupants.contains(&token) {
            self.occupants.push(token);
        }
    }

    pub(crate) fn leave(&mut self, token: TokenRef) {
        self.occupants.retain(|t| *t != token);
    }

    /// Remove and return every token not owned by `player`.
    pub(crate) fn evict_opponents(&mut self, player: PlayerId) -> SmallVec<[TokenRef; 4]> {
        let evicted = self.occupants.iter().copied().filter(|t| t.player != player).collect();
        self.occupants.retain(|t| t.player == player);
        evicted
    }

    pub(crate) fn clear(&mut self) {
        self.occupants.clear();
    }
}
