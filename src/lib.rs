//! # tileboard
//!
//! A turn-based rules engine for tile-board dice games: Snakes & Ladders on a
//! linear tile chain, and Ludo on a shared loop with per-color finish lanes.
//!
//! ## Design Principles
//!
//! 1. **One Engine, Two Topologies**: both games implement [`BoardGame`] on
//!    top of a shared [`TurnScheduler`]. Board movement is topology-specific.
//!
//! 2. **Arenas, Not Back-References**: tiles live in a `Vec` indexed by id;
//!    occupant lists hold `PlayerId`s or `TokenRef`s.
//!
//! 3. **Deterministic Dice**: dice come from a [`DiceSource`]. The default is
//!    a seeded ChaCha8 stream that can be checkpointed and resumed.
//!
//! 4. **Synchronous Events**: every state change is appended to a persistent
//!    history and dispatched to registered observers, in order.
//!
//! ## Modules
//!
//! - `core`: players, dice, RNG, configuration, errors
//! - `events`: game events, observers, event history
//! - `rules`: `BoardGame` trait and turn scheduler
//! - `linear`: Snakes & Ladders
//! - `ludo`: Ludo

pub mod core;
pub mod events;
pub mod rules;
pub mod linear;
pub mod ludo;

// Re-export commonly used types
pub use crate::core::{
    BoardError, GameError,
    PlayerId, PlayerMap, PlayerProfile, PlayerIcon,
    GameRng, GameRngState,
    Dice, DiceRoll, DiceSource, ScriptedDice,
    SnakesConfig, LudoConfig, LoopSize,
};

pub use crate::events::{EventBus, EventLog, EventRecord, GameEvent, Observer, ObserverId};

pub use crate::rules::{BoardGame, TurnPhase, TurnScheduler};

pub use crate::linear::{
    ActionDescriptor, LinearBoard, LinearBoardBuilder, MoveLog,
    SnakesGame, SnakesSnapshot, TileAction, TileSpec, TurnReport,
};

pub use crate::ludo::{
    LudoBoard, LudoGame, LudoMoveLog, LudoPlayerSpec, LudoSnapshot,
    LudoTile, LudoTileType, PlayerColor, Token, TokenRef,
};
