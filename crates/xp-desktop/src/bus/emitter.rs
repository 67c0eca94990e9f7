use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::{EventKind, WindowEvent};

/// Handle identifying one registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&WindowEvent)>;

struct Listener {
    id: SubscriptionId,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<EventKind, Vec<Listener>>,
}

/// Synchronous publish/subscribe bus
///
/// Cloning yields another handle to the same bus.
///
/// ## Delivery
///
/// `emit` calls every listener registered for the event kind, in
/// registration order, once. The listener list is snapshotted when `emit`
/// starts:
///
/// - a listener added while an emit is running does not see that emit
/// - a listener removed while an emit is running still sees that emit
///
/// Listeners may emit, subscribe and unsubscribe re-entrantly. Nothing is
/// replayed to late subscribers.
#[derive(Clone, Default)]
pub struct Emitter {
    registry: Rc<RefCell<Registry>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind
    pub fn on(&self, kind: EventKind, handler: impl Fn(&WindowEvent) + 'static) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.entry(kind).or_default().push(Listener {
            id,
            handler: Rc::new(handler),
        });
        tracing::trace!(?kind, ?id, "listener added");
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(listeners) = registry.listeners.get_mut(&kind) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::trace!(?kind, ?id, "listener removed");
        }
        removed
    }

    /// Register a listener that is removed when the returned guard drops
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&WindowEvent) + 'static,
    ) -> Subscription {
        let id = self.on(kind, handler);
        Subscription {
            registry: Rc::downgrade(&self.registry),
            kind,
            id: Some(id),
        }
    }

    /// Deliver an event to the current listeners of its kind
    pub fn emit(&self, event: WindowEvent) {
        let kind = event.kind();
        // Release the borrow before calling out so handlers can re-enter.
        let handlers: Vec<Handler> = {
            let registry = self.registry.borrow();
            match registry.listeners.get(&kind) {
                Some(listeners) => listeners.iter().map(|l| Rc::clone(&l.handler)).collect(),
                None => Vec::new(),
            }
        };
        tracing::trace!(?kind, listeners = handlers.len(), "emit");
        for handler in handlers {
            handler(&event);
        }
    }

    /// Number of listeners currently registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Total number of listeners across all kinds
    pub fn total_listeners(&self) -> usize {
        self.registry.borrow().listeners.values().map(Vec::len).sum()
    }
}

/// RAII guard for a bus listener
///
/// Dropping the guard (or calling [`Subscription::unsubscribe`]) removes the
/// listener. The guard does not keep the bus alive.
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    kind: EventKind,
    id: Option<SubscriptionId>,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            Emitter { registry }.off(self.kind, id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WindowId;
    use std::cell::Cell;

    fn removed(id: &str) -> WindowEvent {
        WindowEvent::Removed {
            id: WindowId::parse(id).unwrap(),
        }
    }

    #[test]
    fn test_delivers_in_subscription_order() {
        let bus = Emitter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let log = Rc::clone(&log);
            bus.on(EventKind::Removed, move |_| log.borrow_mut().push(n));
        }
        bus.emit(removed("a"));

        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_only_matching_kind_is_delivered() {
        let bus = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        bus.on(EventKind::Added, move |_| h.set(h.get() + 1));

        bus.emit(removed("a"));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_off_stops_delivery() {
        let bus = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = bus.on(EventKind::Removed, move |_| h.set(h.get() + 1));

        bus.emit(removed("a"));
        assert!(bus.off(EventKind::Removed, id));
        assert!(!bus.off(EventKind::Removed, id));
        bus.emit(removed("a"));

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_added_during_emit_misses_that_emit() {
        let bus = Emitter::new();
        let late_hits = Rc::new(Cell::new(0));

        let bus_clone = bus.clone();
        let late = Rc::clone(&late_hits);
        let added = Rc::new(Cell::new(false));
        bus.on(EventKind::Removed, move |_| {
            if !added.replace(true) {
                let late = Rc::clone(&late);
                bus_clone.on(EventKind::Removed, move |_| late.set(late.get() + 1));
            }
        });

        bus.emit(removed("a"));
        assert_eq!(late_hits.get(), 0);

        bus.emit(removed("a"));
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn test_listener_removed_during_emit_still_sees_it() {
        let bus = Emitter::new();
        let second_hits = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        let bus_clone = bus.clone();
        let target = Rc::clone(&second_id);
        bus.on(EventKind::Removed, move |_| {
            if let Some(id) = target.get() {
                bus_clone.off(EventKind::Removed, id);
            }
        });
        let h = Rc::clone(&second_hits);
        second_id.set(Some(bus.on(EventKind::Removed, move |_| h.set(h.get() + 1))));

        bus.emit(removed("a"));
        assert_eq!(second_hits.get(), 1);
        bus.emit(removed("a"));
        assert_eq!(second_hits.get(), 1);
    }

    #[test]
    fn test_reentrant_emit() {
        let bus = Emitter::new();
        let focused = Rc::new(RefCell::new(Vec::new()));

        let bus_clone = bus.clone();
        bus.on(EventKind::Removed, move |_| {
            bus_clone.emit(WindowEvent::VisibilityChanged { id: None });
        });
        let f = Rc::clone(&focused);
        bus.on(EventKind::VisibilityChanged, move |event| {
            f.borrow_mut().push(event.clone());
        });

        bus.emit(removed("a"));
        assert_eq!(
            *focused.borrow(),
            vec![WindowEvent::VisibilityChanged { id: None }]
        );
    }

    #[test]
    fn test_subscription_guard_unsubscribes_on_drop() {
        let bus = Emitter::new();
        {
            let _sub = bus.subscribe(EventKind::Added, |_| {});
            assert_eq!(bus.listener_count(EventKind::Added), 1);
        }
        assert_eq!(bus.listener_count(EventKind::Added), 0);

        let sub = bus.subscribe(EventKind::Removed, |_| {});
        sub.unsubscribe();
        assert_eq!(bus.total_listeners(), 0);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = Emitter::new();
        let sub = bus.subscribe(EventKind::Added, |_| {});
        drop(bus);
        drop(sub);
    }
}
