//! Error types.
//!
//! - [`BoardError`]: a board description that cannot form a playable board.
//!   Raised at construction, never mid-game.
//! - [`GameError`]: a call whose preconditions do not hold. The game is left
//!   exactly as it was before the call.
//!
//! Collisions and captures are ordinary outcomes and never surface here.

use super::player::PlayerId;

/// Structural problems in a linear board description.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no tiles")]
    Empty,

    #[error("duplicate tile id {0}")]
    DuplicateTile(u32),

    #[error("tile ids must run 1..={expected}, found {found}")]
    NonContiguousIds { expected: u32, found: u32 },

    #[error("tile {tile} points to missing next tile {next}")]
    DanglingNext { tile: u32, next: u32 },

    #[error("{kind} on tile {tile} targets missing tile {destination}")]
    DanglingDestination {
        tile: u32,
        kind: &'static str,
        destination: u32,
    },

    #[error("unknown action kind '{kind}' on tile {tile}")]
    UnknownAction { tile: u32, kind: String },

    #[error("{kind} on tile {tile} needs a destination")]
    MissingDestination { tile: u32, kind: &'static str },

    #[error("{kind} on tile {tile} cannot lead to tile {destination}")]
    WrongDirection {
        tile: u32,
        kind: &'static str,
        destination: u32,
    },

    #[error("tile {0} never reaches the final tile")]
    UnreachableFinish(u32),

    #[error("final tile {0} must not point anywhere")]
    FinalTileHasNext(u32),

    #[error("no tile {0} on this board")]
    UnknownTile(u32),
}

/// Precondition violations reported by game operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("need {min}-{max} players, got {got}")]
    InvalidPlayerCount { min: usize, max: usize, got: usize },

    #[error("player name must not be blank")]
    BlankName,

    #[error("color {0} is taken by more than one player")]
    DuplicateColor(&'static str),

    #[error("at least one die is required, got {0}")]
    InvalidDiceCount(usize),

    #[error("scripted dice need faces in 1..=6, got {0:?}")]
    InvalidScript(Vec<u8>),

    #[error("game is over")]
    GameOver,

    #[error("a move needs at least one step")]
    ZeroSteps,

    #[error("token belongs to {owner}, but it is {current}'s turn")]
    NotYourToken { owner: PlayerId, current: PlayerId },

    #[error("{player} has no token {token}")]
    UnknownToken { player: PlayerId, token: u8 },

    #[error("select a token before moving")]
    NoTokenSelected,

    #[error("a {required} is needed to leave home, rolled {rolled}")]
    HomeExitRequiresSix { required: u32, rolled: u32 },

    #[error("snapshot does not describe a playable game: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}
