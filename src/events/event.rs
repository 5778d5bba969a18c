//! Lifecycle events and listener registration.
//!
//! Sessions own an `EventBus`; observers (renderers, replay tools) subscribe
//! to it explicitly. There is no global emitter.
//!
//! ## Ordering
//!
//! For every turn: `TurnCompleted`, then `StateSettled`, then either the next
//! `TurnStarted` or, once the phase reaches `Ended`, `GameEnded`.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, PlayerId};

/// An engine lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted {
        turn: u32,
        player: PlayerId,
        phase: Phase,
    },
    TurnCompleted {
        turn: u32,
        player: PlayerId,
        phase: Phase,
    },
    StateSettled {
        turn: u32,
        player: PlayerId,
        phase: Phase,
    },
    GameEnded {
        turn: u32,
        player: PlayerId,
        phase: Phase,
    },
}

impl GameEvent {
    #[must_use]
    pub fn turn(&self) -> u32 {
        match *self {
            GameEvent::TurnStarted { turn, .. }
            | GameEvent::TurnCompleted { turn, .. }
            | GameEvent::StateSettled { turn, .. }
            | GameEvent::GameEnded { turn, .. } => turn,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            GameEvent::TurnStarted { player, .. }
            | GameEvent::TurnCompleted { player, .. }
            | GameEvent::StateSettled { player, .. }
            | GameEvent::GameEnded { player, .. } => player,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match *self {
            GameEvent::TurnStarted { phase, .. }
            | GameEvent::TurnCompleted { phase, .. }
            | GameEvent::StateSettled { phase, .. }
            | GameEvent::GameEnded { phase, .. } => phase,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::TurnStarted { .. } => "turn-started",
            GameEvent::TurnCompleted { .. } => "turn-completed",
            GameEvent::StateSettled { .. } => "state-settled",
            GameEvent::GameEnded { .. } => "game-ended",
        }
    }
}

/// Handle returned by `EventBus::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Synchronous listener registry. Listeners run in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn started(turn: u32) -> GameEvent {
        GameEvent::TurnStarted {
            turn,
            player: PlayerId::new(0),
            phase: Phase::Playing,
        }
    }

    #[test]
    fn test_listeners_receive_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let sink = Rc::clone(&log);
        bus.subscribe(move |e| sink.borrow_mut().push(("a", e.turn())));
        let sink = Rc::clone(&log);
        bus.subscribe(move |e| sink.borrow_mut().push(("b", e.turn())));

        bus.emit(started(1));
        bus.emit(started(2));

        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let sink = Rc::clone(&count);
        let id = bus.subscribe(move |_| *sink.borrow_mut() += 1);
        bus.emit(started(1));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(started(2));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_event_accessors() {
        let event = GameEvent::GameEnded {
            turn: 9,
            player: PlayerId::new(1),
            phase: Phase::Ended,
        };
        assert_eq!(event.turn(), 9);
        assert_eq!(event.player(), PlayerId::new(1));
        assert_eq!(event.phase(), Phase::Ended);
        assert_eq!(event.name(), "game-ended");
    }
}
