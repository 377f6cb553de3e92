//! Event notification toward the consumer.
//!
//! Games emit a [`GameEvent`] after every state change. Each event is both
//! appended to the game's persistent history and dispatched synchronously
//! to registered [`Observer`]s, in registration order.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use tileboard::core::PlayerId;
//! use tileboard::events::{EventBus, EventLog, GameEvent};
//!
//! let log = Rc::new(RefCell::new(EventLog::new()));
//! let mut bus = EventBus::new();
//! bus.subscribe(Box::new(log.clone()));
//!
//! bus.emit(1, GameEvent::NextPlayer { player: PlayerId::new(1) });
//! assert_eq!(log.borrow().events.len(), 1);
//! assert_eq!(bus.history().len(), 1);
//! ```

mod event;
mod observer;

pub use event::{EventRecord, GameEvent};
pub use observer::{EventBus, EventLog, Observer, ObserverId};
