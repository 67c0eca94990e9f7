use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::bus::{Emitter, EventKind, MicrotaskQueue, SafeSubscription, Subscription, WindowEvent};
use crate::error::{ShellError, ShellResult};
use crate::types::{Focus, WindowId, WindowRecord};

/// Window lifecycle façade
///
/// Every operation is a bus publish and every observation a bus
/// subscription. The controller additionally tracks which ids are claimed
/// by live windows so a second window cannot register an id that is
/// already in use.
///
/// Create one controller per bus and clone it; clones share the claim set.
#[derive(Clone)]
pub struct WindowController {
    bus: Emitter,
    claimed: Rc<RefCell<HashSet<WindowId>>>,
}

impl WindowController {
    pub fn new(bus: Emitter) -> Self {
        Self {
            bus,
            claimed: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    pub fn bus(&self) -> &Emitter {
        &self.bus
    }

    /// Publish a newly mounted window
    pub fn add(&self, record: WindowRecord) -> ShellResult<()> {
        if !self.claimed.borrow_mut().insert(record.id.clone()) {
            tracing::warn!(id = %record.id, "window id already registered, rejecting");
            return Err(ShellError::DuplicateWindow(record.id));
        }
        tracing::debug!(id = %record.id, title = %record.title, "window added");
        self.bus.emit(WindowEvent::Added(record));
        Ok(())
    }

    /// Publish a closed window
    pub fn remove(&self, id: &WindowId) {
        self.claimed.borrow_mut().remove(id);
        tracing::debug!(%id, "window removed");
        self.bus.emit(WindowEvent::Removed { id: id.clone() });
    }

    /// Change the focused window (`None` unfocuses everything)
    pub fn focus(&self, focus: Focus) {
        tracing::trace!(focus = ?focus.as_ref().map(WindowId::as_str), "focus");
        self.bus.emit(WindowEvent::VisibilityChanged { id: focus });
    }

    pub fn minimize(&self, id: &WindowId) {
        self.bus.emit(WindowEvent::Minimized { id: id.clone() });
    }

    pub fn restore(&self, id: &WindowId) {
        self.bus.emit(WindowEvent::Restored { id: id.clone() });
    }

    /// Listen synchronously; the listener is removed when the guard drops
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&WindowEvent) + 'static,
    ) -> Subscription {
        self.bus.subscribe(kind, handler)
    }

    /// Listen with delivery deferred to the microtask queue
    pub fn subscribe_deferred(
        &self,
        queue: &MicrotaskQueue,
        kind: EventKind,
        handler: impl FnMut(&WindowEvent) + 'static,
    ) -> SafeSubscription {
        SafeSubscription::new(&self.bus, queue, kind, handler)
    }

    /// Whether a live window currently owns the id
    pub fn is_registered(&self, id: &WindowId) -> bool {
        self.claimed.borrow().contains(id)
    }

    pub fn registered_count(&self) -> usize {
        self.claimed.borrow().len()
    }
}
