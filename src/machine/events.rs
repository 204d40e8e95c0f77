//! Phase-transition notifications.

use crate::core::Phase;
use serde::{Deserialize, Serialize};

/// Discrete signals emitted while the clock advances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MotionEvent {
    /// A Waiting/Moving transition took place.
    StepTransition { phase: Phase, position_index: u8 },

    /// The tick budget ran out; the machine is now `Completed`.
    Completed,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Type alias for event handlers.
pub type Listener = Box<dyn FnMut(&MotionEvent) + Send>;

/// Ordered list of event observers.
///
/// Delivery is synchronous and follows registration order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning a handle for removing it later.
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&MotionEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: MotionEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
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
    use std::sync::{Arc, Mutex};

    #[test]
    fn delivers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            bus.subscribe(move |_event| log.lock().unwrap().push(tag));
        }

        bus.emit(MotionEvent::Completed);

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();

        let keep = Arc::clone(&count);
        bus.subscribe(move |_| *keep.lock().unwrap() += 1);
        let drop_me = Arc::clone(&count);
        let id = bus.subscribe(move |_| *drop_me.lock().unwrap() += 100);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.len(), 1);

        bus.emit(MotionEvent::Completed);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn handlers_receive_event_payload() {
        let seen = Arc::new(Mutex::new(None));
        let mut bus = EventBus::new();

        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| *sink.lock().unwrap() = Some(*event));

        let event = MotionEvent::StepTransition {
            phase: Phase::Moving,
            position_index: 1,
        };
        bus.emit(event);

        assert_eq!(*seen.lock().unwrap(), Some(event));
    }

    #[test]
    fn empty_bus_emits_nothing() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());
        bus.emit(MotionEvent::Completed);
    }
}
