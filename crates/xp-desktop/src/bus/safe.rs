use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{Emitter, EventKind, MicrotaskQueue, Subscription, WindowEvent};

type SharedHandler = Rc<RefCell<Box<dyn FnMut(&WindowEvent)>>>;

/// Bus listener whose effect runs one microtask after the emit
///
/// `emit` is synchronous, so it can fire while another component is in the
/// middle of rendering. A plain listener would then mutate this
/// component's state mid-render. The safe subscription instead copies the
/// event into the [`MicrotaskQueue`] and runs the handler from there.
///
/// The handler can be swapped with [`SafeSubscription::set_handler`]
/// without touching the bus listener; queued events are delivered to
/// whichever handler is current when they run. Dropping the adapter
/// unsubscribes and turns already queued deliveries into no-ops.
pub struct SafeSubscription {
    handler: SharedHandler,
    subscription: Subscription,
}

impl SafeSubscription {
    pub fn new(
        bus: &Emitter,
        queue: &MicrotaskQueue,
        kind: EventKind,
        handler: impl FnMut(&WindowEvent) + 'static,
    ) -> Self {
        let handler: SharedHandler = Rc::new(RefCell::new(Box::new(handler)));
        let weak: Weak<_> = Rc::downgrade(&handler);
        let queue = queue.clone();

        let subscription = bus.subscribe(kind, move |event| {
            let weak = weak.clone();
            let event = event.clone();
            queue.enqueue(move || {
                let Some(handler) = weak.upgrade() else {
                    return;
                };
                let mut guard = handler.borrow_mut();
                let handler: &mut dyn FnMut(&WindowEvent) = &mut **guard;
                handler(&event);
            });
        });

        Self {
            handler,
            subscription,
        }
    }

    /// Replace the handler without resubscribing
    pub fn set_handler(&self, handler: impl FnMut(&WindowEvent) + 'static) {
        *self.handler.borrow_mut() = Box::new(handler);
    }

    pub fn kind(&self) -> EventKind {
        self.subscription.kind()
    }
}

impl std::fmt::Debug for SafeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeSubscription")
            .field("kind", &self.kind())
            .finish()
    }
}
