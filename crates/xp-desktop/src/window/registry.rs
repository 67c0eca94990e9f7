use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{EventKind, MicrotaskQueue, Subscription, WindowEvent};
use crate::types::{Focus, WindowId, WindowRecord};

use super::WindowController;

/// Ordered window list plus the focused window
///
/// Pure state with no bus access; [`WindowRegistry`] drives it from events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistryState {
    windows: Vec<WindowRecord>,
    active: Focus,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. A record whose id is already present is ignored.
    pub fn insert(&mut self, record: WindowRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.windows.push(record);
        true
    }

    /// Drop a record
    ///
    /// Returns the new focus target when the removed window was the active
    /// one: the last remaining record in insertion order, or `None` when the
    /// list is now empty. The active id is updated in place. Returns `None`
    /// (no refocus needed) when the removed window was not active.
    pub fn remove(&mut self, id: &WindowId) -> Option<Focus> {
        let before = self.windows.len();
        self.windows.retain(|w| &w.id != id);
        if self.windows.len() == before {
            return None;
        }
        if self.active.as_ref() != Some(id) {
            return None;
        }
        let next = self.windows.last().map(|w| w.id.clone());
        self.active = next.clone();
        Some(next)
    }

    /// Set the active window. Unknown ids are ignored and return false.
    pub fn set_active(&mut self, focus: Focus) -> bool {
        if let Some(id) = &focus {
            if !self.contains(id) {
                return false;
            }
        }
        self.active = focus;
        true
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.windows.iter().any(|w| &w.id == id)
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn active(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Registry projection kept in sync by replaying bus events
///
/// Nothing is queried from the windows themselves. A registry attached
/// after windows were added does not know about them; attach it before the
/// windows mount.
///
/// When the active window is removed the registry publishes a focus event
/// for the last remaining window, so every other listener learns the new
/// active id. Removing the last window only clears the projection's own
/// active id. That publish waits for the next microtask: a
/// closing window clears focus right after announcing its removal, and the
/// refocus has to land after that.
pub struct WindowRegistry {
    state: Rc<RefCell<RegistryState>>,
    _subscriptions: Vec<Subscription>,
}

impl WindowRegistry {
    pub fn attach(controller: &WindowController, queue: &MicrotaskQueue) -> Self {
        let state = Rc::new(RefCell::new(RegistryState::new()));

        let on_added = {
            let state = Rc::clone(&state);
            controller.subscribe(EventKind::Added, move |event| {
                if let WindowEvent::Added(record) = event {
                    if !state.borrow_mut().insert(record.clone()) {
                        tracing::debug!(id = %record.id, "duplicate add ignored");
                    }
                }
            })
        };

        let on_removed = {
            let state = Rc::clone(&state);
            let publisher = controller.clone();
            let queue = queue.clone();
            controller.subscribe(EventKind::Removed, move |event| {
                let WindowEvent::Removed { id } = event else {
                    return;
                };
                let Some(next) = state.borrow_mut().remove(id) else {
                    return;
                };
                // The projection already cleared its active id; there is no
                // survivor to announce.
                let Some(next) = next else {
                    tracing::debug!(removed = %id, "last window removed");
                    return;
                };
                tracing::debug!(removed = %id, %next, "active window removed, refocusing");
                let state = Rc::clone(&state);
                let publisher = publisher.clone();
                queue.enqueue(move || {
                    // Skip if the survivor was removed before the queue drained.
                    if state.borrow().contains(&next) {
                        publisher.focus(Some(next));
                    }
                });
            })
        };

        let on_visibility = {
            let state = Rc::clone(&state);
            controller.subscribe(EventKind::VisibilityChanged, move |event| {
                if let WindowEvent::VisibilityChanged { id } = event {
                    if !state.borrow_mut().set_active(id.clone()) {
                        let id = id.as_ref().map(WindowId::as_str);
                        tracing::debug!(?id, "focus for unknown window ignored");
                    }
                }
            })
        };

        Self {
            state,
            _subscriptions: vec![on_added, on_removed, on_visibility],
        }
    }

    /// Live state shared with listeners that filter on it
    pub(crate) fn shared_state(&self) -> Rc<RefCell<RegistryState>> {
        Rc::clone(&self.state)
    }

    pub fn snapshot(&self) -> RegistryState {
        self.state.borrow().clone()
    }

    pub fn active(&self) -> Focus {
        self.state.borrow().active().cloned()
    }

    pub fn windows(&self) -> Vec<WindowRecord> {
        self.state.borrow().windows().to_vec()
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.state.borrow().contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::bus::Emitter;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Clone, Debug)]
    enum Op {
        Add(u8),
        Remove(u8),
        Focus(Option<u8>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..6).prop_map(Op::Add),
            (0u8..6).prop_map(Op::Remove),
            proptest::option::of(0u8..6).prop_map(Op::Focus),
        ]
    }

    fn id(n: u8) -> WindowId {
        WindowId::parse(&format!("w{}", n)).unwrap()
    }

    proptest! {
        /// The projection mirrors the set of live windows and never holds duplicates
        #[test]
        fn registry_matches_live_windows(ops in proptest::collection::vec(op(), 0..64)) {
            let controller = WindowController::new(Emitter::new());
            let queue = MicrotaskQueue::new();
            let registry = WindowRegistry::attach(&controller, &queue);
            let mut live: Vec<u8> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(n) => {
                        let added = controller.add(WindowRecord::new(id(n), "w")).is_ok();
                        prop_assert_eq!(added, !live.contains(&n));
                        if added {
                            live.push(n);
                        }
                    }
                    Op::Remove(n) => {
                        controller.remove(&id(n));
                        live.retain(|&x| x != n);
                    }
                    Op::Focus(n) => controller.focus(n.map(id)),
                }
                queue.run_until_idle();

                let windows = registry.windows();
                prop_assert_eq!(windows.len(), live.len());
                let unique: HashSet<_> = windows.iter().map(|w| w.id.clone()).collect();
                prop_assert_eq!(unique.len(), windows.len());
                let order: Vec<WindowId> = live.iter().map(|&n| id(n)).collect();
                let actual: Vec<WindowId> = windows.into_iter().map(|w| w.id).collect();
                prop_assert_eq!(actual, order);

                if let Some(active) = registry.active() {
                    prop_assert!(registry.contains(&active));
                }
            }
        }

        /// Removing the active window focuses the most recently added survivor
        #[test]
        fn removing_active_refocuses_last(count in 1u8..6, victim in 0u8..6) {
            let controller = WindowController::new(Emitter::new());
            let queue = MicrotaskQueue::new();
            let registry = WindowRegistry::attach(&controller, &queue);
            for n in 0..count {
                controller.add(WindowRecord::new(id(n), "w")).unwrap();
            }
            let victim = victim % count;
            controller.focus(Some(id(victim)));
            controller.remove(&id(victim));
            queue.run_until_idle();

            let expected = (0..count).filter(|&n| n != victim).last().map(id);
            prop_assert_eq!(registry.active(), expected);
        }
    }
}
