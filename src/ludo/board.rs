//! The loop+lane Ludo board.
//!
//! All cells live in one arena:
//!
//! | indices                     | cells                               |
//! |-----------------------------|-------------------------------------|
//! | `0..L`                      | main loop                           |
//! | `L + c*5 .. L + c*5 + 5`    | finish lane of color `c`, last FINISH |
//! | `L + 20 + c*4 ..`           | the 4 HOME cells of color `c`       |
//!
//! Movement is index arithmetic over a color's full path: the loop rotated
//! to start at the color's start cell, followed by its finish lane.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::PlayerColor;
use super::tile::{LudoTile, LudoTileType};
use super::token::{Token, TokenRef, TokenSet, TOKENS_PER_PLAYER};
use crate::core::{LoopSize, PlayerId, PlayerMap, FINISH_LANE_LEN, HOME_EXIT_ROLL};

const COLORS: usize = PlayerColor::ALL.len();

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoBoard {
    loop_size: LoopSize,
    tiles: Vec<LudoTile>,
}

impl LudoBoard {
    #[must_use]
    pub fn new(loop_size: LoopSize) -> Self {
        let len = loop_size.len();
        let mut tiles = Vec::with_capacity(len + COLORS * (FINISH_LANE_LEN + TOKENS_PER_PLAYER));

        for index in 0..len {
            let kind = if PlayerColor::ALL.iter().any(|c| c.start_index(loop_size) == index) {
                LudoTileType::Start
            } else if PlayerColor::ALL.iter().any(|c| c.finish_entry_index(loop_size) == index) {
                LudoTileType::FinishEntry
            } else if loop_size.safe_indices().contains(&index) {
                LudoTileType::Safe
            } else {
                LudoTileType::Normal
            };
            tiles.push(LudoTile::new(index, kind));
        }

        for _ in 0..COLORS {
            for cell in 0..FINISH_LANE_LEN {
                let kind = if cell + 1 == FINISH_LANE_LEN {
                    LudoTileType::Finish
                } else {
                    LudoTileType::Normal
                };
                tiles.push(LudoTile::new(tiles.len(), kind));
            }
        }

        for _ in 0..COLORS * TOKENS_PER_PLAYER {
            tiles.push(LudoTile::new(tiles.len(), LudoTileType::Home));
        }

        Self { loop_size, tiles }
    }

    #[must_use]
    pub fn loop_size(&self) -> LoopSize {
        self.loop_size
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&LudoTile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &LudoTile> {
        self.tiles.iter()
    }

    /// Cells of `color`'s finish lane; the last one is FINISH.
    #[must_use]
    pub fn finish_lane(&self, color: PlayerColor) -> Range<usize> {
        let base = self.loop_size.len() + color.ordinal() * FINISH_LANE_LEN;
        base..base + FINISH_LANE_LEN
    }

    #[must_use]
    pub fn home_tiles(&self, color: PlayerColor) -> [usize; TOKENS_PER_PLAYER] {
        let base = self.loop_size.len() + COLORS * FINISH_LANE_LEN + color.ordinal() * TOKENS_PER_PLAYER;
        std::array::from_fn(|i| base + i)
    }

    /// Length of every color's full path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.loop_size.len() + FINISH_LANE_LEN
    }

    /// `color`'s full path as arena indices.
    #[must_use]
    pub fn full_path(&self, color: PlayerColor) -> Vec<usize> {
        (0..self.path_len()).map(|pos| self.path_tile(color, pos)).collect()
    }

    /// Arena index of position `pos` on `color`'s full path, clamped to the
    /// FINISH cell.
    #[must_use]
    pub fn path_tile(&self, color: PlayerColor, pos: usize) -> usize {
        let len = self.loop_size.len();
        if pos < len {
            (color.start_index(self.loop_size) + pos) % len
        } else {
            let lane = self.finish_lane(color);
            (lane.start + pos - len).min(lane.end - 1)
        }
    }

    /// Position of arena cell `index` on `color`'s full path, if it is on it.
    #[must_use]
    pub fn path_position(&self, color: PlayerColor, index: usize) -> Option<usize> {
        let len = self.loop_size.len();
        if index < len {
            Some((index + len - color.start_index(self.loop_size)) % len)
        } else {
            let lane = self.finish_lane(color);
            lane.contains(&index).then(|| len + index - lane.start)
        }
    }

    #[must_use]
    pub fn is_home(&self, index: usize) -> bool {
        self.kind_of(index) == Some(LudoTileType::Home)
    }

    #[must_use]
    pub fn is_finished(&self, index: usize) -> bool {
        self.kind_of(index) == Some(LudoTileType::Finish)
    }

    fn kind_of(&self, index: usize) -> Option<LudoTileType> {
        self.tiles.get(index).map(LudoTile::kind)
    }

    /// Tokens for `player`, each standing on its own HOME cell.
    pub(crate) fn spawn_tokens(&mut self, player: PlayerId, color: PlayerColor) -> TokenSet {
        let homes = self.home_tiles(color);
        let tokens: TokenSet = std::array::from_fn(|i| Token {
            id: i as u8,
            owner: player,
            color,
            home: homes[i],
            position: homes[i],
        });
        for token in &tokens {
            self.tiles[token.position].enter(token.token_ref());
        }
        tokens
    }

    /// Put a token on `index` without triggering anything.
    pub(crate) fn place(&mut self, token: TokenRef, index: usize) {
        self.tiles[index].enter(token);
    }

    pub(crate) fn clear_occupants(&mut self) {
        for tile in &mut self.tiles {
            tile.clear();
        }
    }

    /// Where `token` would end up after `steps`. Pure.
    ///
    /// From HOME only a 6 moves, onto the start cell. Otherwise the token
    /// advances along its full path and stops on FINISH if it overshoots.
    /// A SAFE destination held by an opponent vetoes the move. A vetoed or
    /// impossible move returns the token's current cell.
    #[must_use]
    pub fn get_next_tile(&self, token: &Token, steps: u32) -> &LudoTile {
        &self.tiles[self.next_index(token, steps)]
    }

    pub(crate) fn next_index(&self, token: &Token, steps: u32) -> usize {
        let current = token.position;
        let destination = if self.is_home(current) {
            if steps != HOME_EXIT_ROLL {
                return current;
            }
            self.path_tile(token.color, 0)
        } else {
            let Some(pos) = self.path_position(token.color, current) else {
                return current;
            };
            let target = (pos + steps as usize).min(self.path_len() - 1);
            self.path_tile(token.color, target)
        };

        let tile = &self.tiles[destination];
        if tile.kind() == LudoTileType::Safe && tile.has_opponent(token.owner) {
            current
        } else {
            destination
        }
    }

    /// Move `token` onto `to`, capturing opponents unless `to` is safe.
    pub fn move_token(
        &mut self,
        tokens: &mut PlayerMap<TokenSet>,
        token: TokenRef,
        to: usize,
    ) -> LudoMoveLog {
        let slot = usize::from(token.token);
        let from = tokens[token.player][slot].position;
        self.tiles[from].leave(token);

        let mut captured = SmallVec::new();
        if !self.tiles[to].is_safe() {
            for victim in self.tiles[to].evict_opponents(token.player) {
                let piece = &mut tokens[victim.player][usize::from(victim.token)];
                piece.position = piece.home;
                self.tiles[piece.home].enter(victim);
                captured.push(Capture {
                    token: victim,
                    from: to,
                    to: piece.home,
                });
            }
        }

        self.tiles[to].enter(token);
        tokens[token.player][slot].position = to;

        LudoMoveLog {
            token,
            from,
            to,
            captured,
        }
    }
}

/// A token sent back home.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub token: TokenRef,
    pub from: usize,
    pub to: usize,
}

/// Outcome of one Ludo move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoMoveLog {
    pub token: TokenRef,
    pub from: usize,
    pub to: usize,
    pub captured: SmallVec<[Capture; 4]>,
}

impl LudoMoveLog {
    /// Log for a move that went nowhere.
    #[must_use]
    pub fn stay(token: TokenRef, at: usize) -> Self {
        Self {
            token,
            from: at,
            to: at,
            captured: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

impl fmt::Display for LudoMoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.moved() {
            return write!(f, "{} cannot move", self.token);
        }
        write!(f, "{} is now on tile {}", self.token, self.to)?;
        for capture in &self.captured {
            write!(f, "\nCaptured! {} was sent home", capture.token)?;
        }
        Ok(())
    }
}
