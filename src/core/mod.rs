//! Core engine types shared by both boards: players, dice, RNG,
//! configuration and errors.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{
    LoopSize, LudoConfig, SnakesConfig, DEFAULT_COLLISION_BACKUP, FINISH_LANE_LEN, HOME_EXIT_ROLL,
};
pub use dice::{Dice, DiceRoll, DiceSource, ScriptedDice, DIE_FACES};
pub use error::{BoardError, GameError};
pub use player::{order_by_age, PlayerIcon, PlayerId, PlayerMap, PlayerProfile};
pub use rng::{GameRng, GameRngState};
