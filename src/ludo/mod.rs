//! Ludo on a shared loop with private finish lanes.
//!
//! Tokens leave HOME on a 6, travel their color's full path, and finish on
//! the last cell of their lane. Landing on an opponent outside a safe cell
//! sends it home; an opponent on a SAFE cell blocks the landing instead.
//!
//! ```
//! use tileboard::core::{LudoConfig, PlayerProfile};
//! use tileboard::ludo::{LudoGame, LudoPlayerSpec, PlayerColor, TokenRef};
//! use tileboard::rules::BoardGame;
//!
//! let players = vec![
//!     LudoPlayerSpec::new(PlayerProfile::new("Ada", 9).unwrap(), PlayerColor::Red),
//!     LudoPlayerSpec::new(PlayerProfile::new("Bo", 11).unwrap(), PlayerColor::Blue),
//! ];
//! let mut game = LudoGame::new(players, LudoConfig::new()).unwrap();
//!
//! let me = game.current_player();
//! game.select_token(TokenRef::new(me, 0)).unwrap();
//! let log = game.move_current_player(6).unwrap();
//! assert_eq!(log.to, 0);
//! ```

mod board;
mod color;
mod game;
mod tile;
mod token;

pub use board::{Capture, LudoBoard, LudoMoveLog};
pub use color::PlayerColor;
pub use game::{LudoGame, LudoPlayerSpec, LudoSnapshot, LudoTurnReport};
pub use tile::{LudoTile, LudoTileType};
pub use token::{Token, TokenRef, TokenSet, TOKENS_PER_PLAYER};
