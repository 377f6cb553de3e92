//! Turn scheduling shared by both games.
//!
//! Games implement [`BoardGame`] on top of a [`TurnScheduler`], which owns
//! the current seat, the pending roll, the winner and the event stream.
//! Board-specific movement lives in `linear` and `ludo`.

pub mod engine;
pub mod scheduler;

pub use engine::BoardGame;
pub use scheduler::{TurnPhase, TurnScheduler};
