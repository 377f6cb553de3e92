//! Turn bookkeeping shared by both games.
//!
//! [`TurnScheduler`] owns everything about a game that is not the board:
//! whose turn it is, the pending roll, the winner and the event stream.
//! Once a winner is declared every mutating call is refused.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DiceRoll, GameError, PlayerId};
use crate::events::{EventBus, EventRecord, GameEvent, Observer, ObserverId};

/// Where the current turn stands.
///
/// `AwaitingRoll` → (`TokenSelection` on Ludo) → `Resolving` → back to
/// `AwaitingRoll` for the same or the next player, or `GameOver`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll {
        player: PlayerId,
    },

    /// Rolled; the player must pick one of `movable` (token ids).
    TokenSelection {
        player: PlayerId,
        roll: u32,
        movable: SmallVec<[u8; 4]>,
    },

    /// Ready to move. `steps` is the pending roll, if the move follows one.
    Resolving {
        player: PlayerId,
        steps: Option<u32>,
    },

    GameOver {
        winner: PlayerId,
    },
}

/// Current seat, turn counter, pending roll, winner and event stream.
#[derive(Debug)]
pub struct TurnScheduler {
    player_count: usize,
    current: usize,
    turn_number: u32,
    winner: Option<PlayerId>,
    last_roll: Option<DiceRoll>,
    events: EventBus,
}

impl TurnScheduler {
    /// Start at seat 0, turn 1.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self::resume(player_count, PlayerId::new(0), 1, None)
    }

    /// Rebuild scheduler state saved from another game.
    #[must_use]
    pub fn resume(
        player_count: usize,
        current: PlayerId,
        turn_number: u32,
        winner: Option<PlayerId>,
    ) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        Self {
            player_count,
            current: current.index() % player_count,
            turn_number,
            winner,
            last_roll: None,
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new(self.current as u8)
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Fails once the game has a winner.
    pub fn ensure_active(&self) -> Result<(), GameError> {
        if self.is_over() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    /// Remember a roll for the current player and announce it.
    pub fn record_roll(&mut self, roll: DiceRoll) {
        let event = GameEvent::DiceRolled {
            player: self.current_player(),
            faces: roll.faces().iter().copied().collect(),
        };
        self.last_roll = Some(roll);
        self.emit(event);
    }

    #[must_use]
    pub fn last_roll(&self) -> Option<&DiceRoll> {
        self.last_roll.as_ref()
    }

    /// Forget the pending roll once a move has consumed it.
    pub fn clear_roll(&mut self) {
        self.last_roll = None;
    }

    /// Pass the turn to the next seat.
    pub fn advance(&mut self) -> Result<PlayerId, GameError> {
        self.ensure_active()?;
        self.current = (self.current + 1) % self.player_count;
        self.turn_number += 1;
        self.last_roll = None;
        let next = self.current_player();
        self.emit(GameEvent::NextPlayer { player: next });
        Ok(next)
    }

    /// First declaration wins; later calls are ignored.
    pub fn declare_winner(&mut self, winner: PlayerId) {
        if self.winner.is_none() {
            self.winner = Some(winner);
            self.last_roll = None;
            self.emit(GameEvent::GameOver { winner });
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.emit(self.turn_number, event);
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.events.unsubscribe(id)
    }

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        self.events.history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let mut s = TurnScheduler::new(3);
        assert_eq!(s.current_player(), PlayerId::new(0));
        assert_eq!(s.advance(), Ok(PlayerId::new(1)));
        assert_eq!(s.advance(), Ok(PlayerId::new(2)));
        assert_eq!(s.advance(), Ok(PlayerId::new(0)));
        assert_eq!(s.turn_number(), 4);
    }

    #[test]
    fn test_advance_clears_roll() {
        let mut s = TurnScheduler::new(2);
        s.record_roll(DiceRoll::from_faces(&[4]));
        assert_eq!(s.last_roll().map(DiceRoll::total), Some(4));

        s.advance().unwrap();
        assert!(s.last_roll().is_none());
    }

    #[test]
    fn test_winner_is_terminal() {
        let mut s = TurnScheduler::new(2);
        s.declare_winner(PlayerId::new(1));
        s.declare_winner(PlayerId::new(0));

        assert_eq!(s.winner(), Some(PlayerId::new(1)));
        assert_eq!(s.advance(), Err(GameError::GameOver));
        assert_eq!(s.ensure_active(), Err(GameError::GameOver));

        let game_overs = s
            .history()
            .iter()
            .filter(|r| r.event.is_terminal())
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_history_stamps_turns() {
        let mut s = TurnScheduler::new(2);
        s.record_roll(DiceRoll::from_faces(&[2]));
        s.advance().unwrap();

        let history = s.history();
        assert_eq!(history[0].turn, 1);
        assert_eq!(
            history[1].event,
            GameEvent::NextPlayer { player: PlayerId::new(1) }
        );
        assert_eq!(history[1].turn, 2);
    }

    #[test]
    fn test_resume_normalizes_seat() {
        let s = TurnScheduler::resume(2, PlayerId::new(3), 7, None);
        assert_eq!(s.current_player(), PlayerId::new(1));
        assert_eq!(s.turn_number(), 7);
    }
}
