//! Observer contract and synchronous dispatch.
//!
//! Games call [`EventBus::emit`] after a state change has fully completed.
//! Observers run in registration order, on the caller's stack. They must not
//! call back into the game.

use std::cell::RefCell;
use std::rc::Rc;

use im::Vector;

use super::event::{EventRecord, GameEvent};
use crate::core::PlayerId;

/// Consumer-side view hooks. Every callback defaults to doing nothing.
pub trait Observer {
    fn on_player_moved(&mut self, _player: PlayerId, _from: u32, _to: u32) {}

    fn on_dice_rolled(&mut self, _player: PlayerId, _faces: &[u8]) {}

    fn on_next_player(&mut self, _next: PlayerId) {}

    fn on_game_over(&mut self, _winner: PlayerId) {}

    /// Redraw every piece from current game state.
    fn place_all_players(&mut self) {}
}

/// Shared handle: lets the consumer keep reading an observer it registered.
impl<T: Observer + ?Sized> Observer for Rc<RefCell<T>> {
    fn on_player_moved(&mut self, player: PlayerId, from: u32, to: u32) {
        self.borrow_mut().on_player_moved(player, from, to);
    }

    fn on_dice_rolled(&mut self, player: PlayerId, faces: &[u8]) {
        self.borrow_mut().on_dice_rolled(player, faces);
    }

    fn on_next_player(&mut self, next: PlayerId) {
        self.borrow_mut().on_next_player(next);
    }

    fn on_game_over(&mut self, winner: PlayerId) {
        self.borrow_mut().on_game_over(winner);
    }

    fn place_all_players(&mut self) {
        self.borrow_mut().place_all_players();
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Registered observers plus the full event history.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(ObserverId, Box<dyn Observer>)>,
    history: Vector<EventRecord>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns true if the observer was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Record `event` and deliver it to every observer.
    pub fn emit(&mut self, turn: u32, event: GameEvent) {
        for (_, observer) in &mut self.observers {
            match &event {
                GameEvent::PlayerMoved { player, from, to } => {
                    observer.on_player_moved(*player, *from, *to)
                }
                GameEvent::DiceRolled { player, faces } => observer.on_dice_rolled(*player, faces),
                GameEvent::NextPlayer { player } => observer.on_next_player(*player),
                GameEvent::GameOver { winner } => observer.on_game_over(*winner),
                GameEvent::RefreshPositions => observer.place_all_players(),
            }
        }

        let sequence = self.history.len() as u32;
        self.history.push_back(EventRecord {
            sequence,
            turn,
            event,
        });
    }

    /// Every event emitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("history", &self.history.len())
            .finish()
    }
}

/// Observer that records what it was told, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, ready to pass to `subscribe` as `Box::new(log.clone())`.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// `(player, from, to)` of every recorded move.
    pub fn moves(&self) -> Vec<(PlayerId, u32, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PlayerMoved { player, from, to } => Some((*player, *from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Observer for EventLog {
    fn on_player_moved(&mut self, player: PlayerId, from: u32, to: u32) {
        self.events.push(GameEvent::PlayerMoved { player, from, to });
    }

    fn on_dice_rolled(&mut self, player: PlayerId, faces: &[u8]) {
        self.events.push(GameEvent::DiceRolled {
            player,
            faces: faces.iter().copied().collect(),
        });
    }

    fn on_next_player(&mut self, next: PlayerId) {
        self.events.push(GameEvent::NextPlayer { player: next });
    }

    fn on_game_over(&mut self, winner: PlayerId) {
        self.events.push(GameEvent::GameOver { winner });
    }

    fn place_all_players(&mut self) {
        self.events.push(GameEvent::RefreshPositions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::SmallVec;

    struct Counter {
        moves: usize,
        refreshes: usize,
    }

    impl Observer for Counter {
        fn on_player_moved(&mut self, _player: PlayerId, _from: u32, _to: u32) {
            self.moves += 1;
        }

        fn place_all_players(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn test_emit_dispatches_and_records() {
        let counter = Rc::new(RefCell::new(Counter { moves: 0, refreshes: 0 }));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(counter.clone()));

        bus.emit(1, GameEvent::PlayerMoved { player: PlayerId::new(0), from: 1, to: 4 });
        bus.emit(1, GameEvent::RefreshPositions);
        bus.emit(1, GameEvent::NextPlayer { player: PlayerId::new(1) });

        assert_eq!(counter.borrow().moves, 1);
        assert_eq!(counter.borrow().refreshes, 1);
        assert_eq!(bus.history().len(), 3);
        assert_eq!(bus.history()[2].sequence, 2);
    }

    #[test]
    fn test_registration_order() {
        let first = EventLog::shared();
        let second = EventLog::shared();
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagger(&'static str, Rc<RefCell<Vec<&'static str>>>);
        impl Observer for Tagger {
            fn on_game_over(&mut self, _winner: PlayerId) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let mut bus = EventBus::new();
        bus.subscribe(Box::new(first.clone()));
        bus.subscribe(Box::new(Tagger("a", order.clone())));
        bus.subscribe(Box::new(Tagger("b", order.clone())));
        bus.subscribe(Box::new(second.clone()));

        bus.emit(3, GameEvent::GameOver { winner: PlayerId::new(1) });

        assert_eq!(*order.borrow(), vec!["a", "b"]);
        assert_eq!(first.borrow().events, second.borrow().events);
    }

    #[test]
    fn test_unsubscribe() {
        let log = EventLog::shared();
        let mut bus = EventBus::new();
        let id = bus.subscribe(Box::new(log.clone()));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(1, GameEvent::RefreshPositions);

        assert!(log.borrow().events.is_empty());
        assert_eq!(bus.observer_count(), 0);
        assert_eq!(bus.history().len(), 1);
    }

    #[test]
    fn test_event_log_moves() {
        let mut log = EventLog::new();
        log.on_dice_rolled(PlayerId::new(1), &[3]);
        log.on_player_moved(PlayerId::new(1), 2, 5);
        assert_eq!(log.moves(), vec![(PlayerId::new(1), 2, 5)]);
        assert_eq!(log.events.len(), 2);
    }

    #[test]
    fn test_event_log_matches_history() {
        let log = EventLog::shared();
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(log.clone()));

        bus.emit(
            4,
            GameEvent::DiceRolled {
                player: PlayerId::new(2),
                faces: SmallVec::from_slice(&[5, 1]),
            },
        );
        bus.emit(4, GameEvent::NextPlayer { player: PlayerId::new(3) });

        let recorded: Vec<_> = bus.history().iter().map(|r| r.event.clone()).collect();
        assert_eq!(log.borrow().events, recorded);
    }
}
