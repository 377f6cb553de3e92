//! Turn-scheduler contract for game implementations.
//!
//! Both boards implement `BoardGame`:
//! - rolling dice for the current player
//! - resolving a move of a given number of steps
//! - deciding whether the roll grants another go
//! - advancing to the next player
//! - win detection and event delivery

use im::Vector;

use super::scheduler::TurnPhase;
use crate::core::{DiceRoll, GameError, PlayerId, PlayerProfile};
use crate::events::{EventRecord, Observer, ObserverId};

/// Shared turn-scheduler surface of every game.
///
/// ## Implementation Notes
///
/// - Every mutating call fails with `GameError::GameOver` once `winner` is set
/// - `move_current_player` runs win detection before returning
/// - Events are emitted after the state change they describe is complete
pub trait BoardGame {
    /// What a resolved move reports back.
    type MoveLog;

    /// Profiles in turn order.
    fn players(&self) -> &[PlayerProfile];

    fn current_player(&self) -> PlayerId;

    /// Roll every die for the current player.
    fn roll_individual(&mut self) -> Result<DiceRoll, GameError>;

    /// Move the current player's piece `steps` tiles.
    fn move_current_player(&mut self, steps: u32) -> Result<Self::MoveLog, GameError>;

    /// Whether `roll` lets the current player roll again. May consume a
    /// one-shot bonus.
    fn player_gets_extra_turn(&mut self, roll: &DiceRoll) -> bool;

    /// Advance to the next seat.
    fn next_player(&mut self) -> Result<PlayerId, GameError>;

    fn winner(&self) -> Option<PlayerId>;

    fn phase(&self) -> TurnPhase;

    fn subscribe(&mut self, observer: Box<dyn Observer>) -> ObserverId;

    fn unsubscribe(&mut self, id: ObserverId) -> bool;

    /// Everything emitted so far.
    fn events(&self) -> &Vector<EventRecord>;

    // === Convenience Methods ===

    /// Roll and return the sum of all faces.
    fn roll_dice(&mut self) -> Result<u32, GameError> {
        Ok(self.roll_individual()?.total())
    }

    fn game_done(&self) -> bool {
        self.winner().is_some()
    }

    /// Profile of the player whose turn it is.
    fn current_profile(&self) -> &PlayerProfile {
        &self.players()[self.current_player().index()]
    }
}
