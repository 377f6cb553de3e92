//! Snakes & Ladders on a linear tile chain.
//!
//! ## Key Types
//!
//! - [`TileSpec`] / [`ActionDescriptor`]: board description input
//! - [`LinearBoard`]: validated tile arena and move resolution
//! - [`TileAction`]: ladder, snake or bonus
//! - [`SnakesGame`]: turn scheduling on top of a board

mod action;
mod board;
mod game;
mod pawn;
mod tile;

pub use action::TileAction;
pub use board::{Collision, LinearBoard, LinearBoardBuilder, MoveLog};
pub use game::{SnakesGame, SnakesSnapshot, TurnReport};
pub use pawn::Pawn;
pub use tile::{ActionDescriptor, Tile, TileId, TileSpec};
