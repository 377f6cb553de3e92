//! The linear-chain board.
//!
//! Tiles live in an arena indexed by `id - 1`. Players are referenced by
//! [`PlayerId`] from tile occupant lists; their pieces ([`Pawn`]) are owned
//! by the game and passed in for each move.
//!
//! A move walks `next` pointers, lands, applies the tile action once,
//! resolves any pending teleport without re-applying the destination's
//! action, then runs a single collision pass.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::TileAction;
use super::pawn::Pawn;
use super::tile::{ActionDescriptor, Tile, TileId, TileSpec};
use crate::core::{BoardError, PlayerId, PlayerMap};

/// Validated linear board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearBoard {
    tiles: Vec<Tile>,
}

impl LinearBoard {
    /// Build a board from a description.
    ///
    /// Ids must be exactly `1..=N` in any order. Every tile must reach tile
    /// `N` by following `next`, and tile `N` must have no `next`. Ladders
    /// must climb and snakes must descend.
    pub fn from_tiles(specs: impl IntoIterator<Item = TileSpec>) -> Result<Self, BoardError> {
        let mut by_id: FxHashMap<TileId, TileSpec> = FxHashMap::default();
        for spec in specs {
            let id = spec.id;
            if by_id.insert(id, spec).is_some() {
                return Err(BoardError::DuplicateTile(id));
            }
        }
        if by_id.is_empty() {
            return Err(BoardError::Empty);
        }

        let size = by_id.len() as TileId;
        if let Some(found) = by_id.keys().copied().filter(|&id| id == 0 || id > size).min() {
            return Err(BoardError::NonContiguousIds {
                expected: size,
                found,
            });
        }

        let in_range = |id: TileId| (1..=size).contains(&id);
        let mut tiles = Vec::with_capacity(size as usize);
        for id in 1..=size {
            let spec = &by_id[&id];
            let next = match spec.next {
                0 => None,
                n if in_range(n) => Some(n),
                n => return Err(BoardError::DanglingNext { tile: id, next: n }),
            };

            let action = spec
                .action
                .as_ref()
                .map(|desc| TileAction::from_descriptor(id, desc))
                .transpose()?;
            if let Some(action) = action {
                check_destination(id, action, in_range)?;
            }

            tiles.push(Tile::new(id, next, action));
        }

        if tiles[size as usize - 1].next().is_some() {
            return Err(BoardError::FinalTileHasNext(size));
        }

        let board = Self { tiles };
        board.check_reachability()?;
        Ok(board)
    }

    /// Straight chain `1..=size`, to which actions can be added.
    pub fn builder(size: TileId) -> LinearBoardBuilder {
        LinearBoardBuilder::new(size)
    }

    /// The 90-tile default board.
    pub fn classic() -> Result<Self, BoardError> {
        Self::builder(90)
            .ladder(4, 14)
            .ladder(19, 27)
            .ladder(39, 70)
            .snake(17, 7)
            .snake(50, 37)
            .snake(85, 67)
            .build()
    }

    fn check_reachability(&self) -> Result<(), BoardError> {
        let last = self.final_tile();
        for start in 1..=last {
            let mut current = start;
            let mut hops = 0;
            while current != last {
                match self.slot(current).next() {
                    Some(next) if hops < last => {
                        current = next;
                        hops += 1;
                    }
                    _ => return Err(BoardError::UnreachableFinish(start)),
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn final_tile(&self) -> TileId {
        self.tiles.len() as TileId
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        id.checked_sub(1).and_then(|i| self.tiles.get(i as usize))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        (1..=self.final_tile()).contains(&id)
    }

    fn slot(&self, id: TileId) -> &Tile {
        &self.tiles[id as usize - 1]
    }

    fn slot_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id as usize - 1]
    }

    /// Put `player` on `tile` without triggering anything.
    pub(crate) fn place(&mut self, player: PlayerId, tile: TileId) {
        self.slot_mut(tile).land(player);
    }

    pub(crate) fn clear_occupants(&mut self) {
        for tile in &mut self.tiles {
            tile.clear();
        }
    }

    /// Tile reached by walking `steps` next pointers, stopping at chain end.
    #[must_use]
    pub fn walk(&self, from: TileId, steps: u32) -> TileId {
        let mut current = from;
        for _ in 0..steps {
            match self.slot(current).next() {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Move `player` forward `steps` tiles and resolve the landing.
    ///
    /// `backup` is how far both players are pushed back on a collision.
    /// The terminal tile never collides.
    pub fn move_player(
        &mut self,
        player: PlayerId,
        pawns: &mut PlayerMap<Pawn>,
        steps: u32,
        backup: u32,
    ) -> MoveLog {
        let from = pawns[player].tile;
        self.slot_mut(from).leave(player);

        let landed = self.walk(from, steps);
        let (settled, action) = self.settle(player, &mut pawns[player], landed);
        let collision = self.collide(player, pawns, backup);

        MoveLog {
            player,
            from,
            landed,
            action,
            to: collision.map_or(settled, |c| c.mover_to),
            collision,
        }
    }

    /// Land on `tile`, apply its action, and resolve any pending move once.
    fn settle(&mut self, player: PlayerId, pawn: &mut Pawn, tile: TileId) -> (TileId, Option<TileAction>) {
        self.slot_mut(tile).land(player);
        pawn.tile = tile;

        let action = self.slot(tile).action();
        if let Some(action) = action {
            action.apply(pawn);
        }

        if let Some(destination) = pawn.pending_move.take() {
            self.slot_mut(tile).leave(player);
            self.slot_mut(destination).land(player);
            pawn.tile = destination;
        }

        (pawn.tile, action)
    }

    fn collide(&mut self, mover: PlayerId, pawns: &mut PlayerMap<Pawn>, backup: u32) -> Option<Collision> {
        let at = pawns[mover].tile;
        if at == self.final_tile() {
            return None;
        }
        let other = self.slot(at).first_other(mover)?;

        let mover_to = self.back_up(mover, &mut pawns[mover], backup);
        let other_to = self.back_up(other, &mut pawns[other], backup);

        Some(Collision {
            other,
            at,
            mover_to,
            other_to,
        })
    }

    fn back_up(&mut self, player: PlayerId, pawn: &mut Pawn, tiles: u32) -> TileId {
        self.slot_mut(pawn.tile).leave(player);
        let target = pawn.tile.saturating_sub(tiles).max(1);
        self.settle(player, pawn, target).0
    }
}

fn check_destination(
    tile: TileId,
    action: TileAction,
    in_range: impl Fn(TileId) -> bool,
) -> Result<(), BoardError> {
    let Some(destination) = action.destination() else {
        return Ok(());
    };
    let kind = action.kind_name();
    if !in_range(destination) {
        return Err(BoardError::DanglingDestination {
            tile,
            kind,
            destination,
        });
    }

    let points_right_way = match action {
        TileAction::Ladder(_) => destination > tile,
        TileAction::Snake(_) => destination < tile,
        TileAction::Bonus => true,
    };
    if points_right_way {
        Ok(())
    } else {
        Err(BoardError::WrongDirection {
            tile,
            kind,
            destination,
        })
    }
}

/// Builds a straight chain `1..=size` and decorates it with actions.
///
/// A later action on the same tile replaces an earlier one.
#[derive(Clone, Debug)]
pub struct LinearBoardBuilder {
    size: TileId,
    actions: Vec<(TileId, ActionDescriptor)>,
}

impl LinearBoardBuilder {
    pub fn new(size: TileId) -> Self {
        Self {
            size,
            actions: Vec::new(),
        }
    }

    pub fn ladder(mut self, from: TileId, to: TileId) -> Self {
        self.actions.push((from, ActionDescriptor::ladder(to)));
        self
    }

    pub fn snake(mut self, from: TileId, to: TileId) -> Self {
        self.actions.push((from, ActionDescriptor::snake(to)));
        self
    }

    pub fn bonus(mut self, tile: TileId) -> Self {
        self.actions.push((tile, ActionDescriptor::bonus()));
        self
    }

    /// The description this builder would validate.
    pub fn specs(&self) -> Vec<TileSpec> {
        let mut specs: Vec<TileSpec> = (1..=self.size)
            .map(|id| TileSpec::new(id, if id < self.size { id + 1 } else { 0 }))
            .collect();
        for (tile, action) in &self.actions {
            if let Some(spec) = tile.checked_sub(1).and_then(|i| specs.get_mut(i as usize)) {
                spec.action = Some(action.clone());
            }
        }
        specs
    }

    pub fn build(self) -> Result<LinearBoard, BoardError> {
        for (tile, _) in &self.actions {
            if *tile == 0 || *tile > self.size {
                return Err(BoardError::UnknownTile(*tile));
            }
        }
        LinearBoard::from_tiles(self.specs())
    }
}

/// Two players ending a move on the same tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// The player that was already there.
    pub other: PlayerId,
    /// Tile the collision happened on.
    pub at: TileId,
    pub mover_to: TileId,
    pub other_to: TileId,
}

/// Outcome of one linear move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    pub player: PlayerId,
    pub from: TileId,
    /// Tile reached by walking, before any action.
    pub landed: TileId,
    /// Action of the landed tile, if any.
    pub action: Option<TileAction>,
    /// Where the mover ends up.
    pub to: TileId,
    pub collision: Option<Collision>,
}

impl MoveLog {
    /// Tile after the action resolved, before any collision.
    #[must_use]
    pub fn settled(&self) -> TileId {
        self.collision.map_or(self.to, |c| c.at)
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is now on tile {}", self.player, self.landed)?;
        match self.action {
            Some(TileAction::Ladder(to)) => write!(f, "\n{} climbed a ladder to tile {}", self.player, to)?,
            Some(TileAction::Snake(to)) => write!(f, "\n{} slid down a snake to tile {}", self.player, to)?,
            Some(TileAction::Bonus) => write!(f, "\n{} earned an extra turn", self.player)?,
            None => {}
        }
        if let Some(c) = self.collision {
            write!(f, "\nCollision! {} and {} collided!", self.player, c.other)?;
            write!(f, "\n{} is now on tile {}", self.player, c.mover_to)?;
            write!(f, "\n{} is now on tile {}", c.other, c.other_to)?;
        }
        Ok(())
    }
}
