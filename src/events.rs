use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Notifications published by a carousel engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Select { index: usize, previous: usize },
    Settle { index: usize },
    PointerDown,
    PointerUp,
    AutoplayPlay,
    AutoplayStop,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Select,
    Settle,
    PointerDown,
    PointerUp,
    AutoplayPlay,
    AutoplayStop,
    Destroy,
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::Select { .. } => EventKind::Select,
            EngineEvent::Settle { .. } => EventKind::Settle,
            EngineEvent::PointerDown => EventKind::PointerDown,
            EngineEvent::PointerUp => EventKind::PointerUp,
            EngineEvent::AutoplayPlay => EventKind::AutoplayPlay,
            EngineEvent::AutoplayStop => EventKind::AutoplayStop,
            EngineEvent::Destroy => EventKind::Destroy,
        }
    }
}

pub type Listener = Rc<dyn Fn(&EngineEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

impl Registry {
    fn remove(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, listener_kind, _)| !(*listener_id == id && *listener_kind == kind));
        self.listeners.len() != before
    }
}

/// Single-threaded listener registry shared between an engine and the
/// subscriptions it hands out.
#[derive(Clone, Default)]
pub struct EventEmitter {
    registry: Rc<RefCell<Registry>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, kind: EventKind, listener: Listener) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = ListenerId(registry.next_id);
        registry.listeners.push((id, kind, listener));
        Subscription { id, kind, registry: Rc::downgrade(&self.registry) }
    }

    /// Returns false when no such listener was registered.
    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        self.registry.borrow_mut().remove(kind, id)
    }

    pub fn emit(&self, event: &EngineEvent) {
        // Snapshot first so listeners may (un)subscribe while being called
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind())
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Owned registration of one listener. Dropping it deregisters the listener.
#[must_use = "dropping a subscription unsubscribes its listener"]
pub struct Subscription {
    id: ListenerId,
    kind: EventKind,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The emitter may already be gone together with its engine
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.kind, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).field("kind", &self.kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(hits: &Rc<Cell<usize>>) -> Listener {
        let hits = Rc::clone(hits);
        Rc::new(move |_: &EngineEvent| hits.set(hits.get() + 1))
    }

    #[test]
    fn only_matching_kinds_are_notified() {
        let emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = emitter.on(EventKind::Select, counter(&hits));

        emitter.emit(&EngineEvent::Select { index: 1, previous: 0 });
        emitter.emit(&EngineEvent::Settle { index: 1 });
        emitter.emit(&EngineEvent::AutoplayStop);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropping_a_subscription_unsubscribes() {
        let emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let sub = emitter.on(EventKind::Select, counter(&hits));
        assert_eq!(emitter.listener_count(), 1);

        sub.release();
        emitter.emit(&EngineEvent::Select { index: 1, previous: 0 });

        assert_eq!(hits.get(), 0);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn off_removes_by_id_and_kind() {
        let emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let sub = emitter.on(EventKind::Select, counter(&hits));

        assert!(!emitter.off(EventKind::Settle, sub.id()));
        assert!(emitter.off(EventKind::Select, sub.id()));
        assert!(!emitter.off(EventKind::Select, sub.id()));

        // Releasing an already removed listener is harmless
        drop(sub);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_its_emitter_drops_cleanly() {
        let emitter = EventEmitter::new();
        let sub = emitter.on(EventKind::Destroy, Rc::new(|_: &EngineEvent| {}));
        drop(emitter);
        drop(sub);
    }

    #[test]
    fn listener_may_unsubscribe_while_emitting() {
        let emitter = EventEmitter::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let listener: Listener = {
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            Rc::new(move |_: &EngineEvent| {
                hits.set(hits.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(emitter.on(EventKind::Settle, listener));

        emitter.emit(&EngineEvent::Settle { index: 0 });
        emitter.emit(&EngineEvent::Settle { index: 0 });

        assert_eq!(hits.get(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }
}
