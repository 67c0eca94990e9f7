use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::Serialize;

use super::{ButtonGeometry, ButtonRegistry};
use crate::bus::{EventKind, MicrotaskQueue, Subscription, WindowEvent};
use crate::error::{ShellError, ShellResult};
use crate::types::{Focus, WindowId};
use crate::window::{WindowController, WindowRegistry};

/// One taskbar tab as the host should render it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabView {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<String>,
    pub active: bool,
    pub minimized: bool,
}

/// Taskbar tab strip
///
/// Keeps its own registry projection (so removing the active window
/// refocuses the last remaining one) plus the set of minimized windows for
/// tab styling. Removing a window also unmounts its tab button.
pub struct WindowTabs {
    controller: WindowController,
    registry: WindowRegistry,
    minimized: Rc<RefCell<HashSet<WindowId>>>,
    buttons: ButtonRegistry,
    _subscriptions: Vec<Subscription>,
}

impl WindowTabs {
    pub fn attach(
        controller: &WindowController,
        queue: &MicrotaskQueue,
        buttons: ButtonRegistry,
    ) -> Self {
        let registry = WindowRegistry::attach(controller, queue);
        let minimized = Rc::new(RefCell::new(HashSet::new()));

        // A closing window publishes a minimize right after its removal;
        // only windows still in the projection are tracked.
        let on_minimized = {
            let minimized = Rc::clone(&minimized);
            let windows = registry.shared_state();
            controller.subscribe(EventKind::Minimized, move |event| {
                if let WindowEvent::Minimized { id } = event {
                    if windows.borrow().contains(id) {
                        minimized.borrow_mut().insert(id.clone());
                    }
                }
            })
        };
        let on_added = {
            let minimized = Rc::clone(&minimized);
            controller.subscribe(EventKind::Added, move |event| {
                if let WindowEvent::Added(record) = event {
                    minimized.borrow_mut().remove(&record.id);
                }
            })
        };
        let on_restored = {
            let minimized = Rc::clone(&minimized);
            controller.subscribe(EventKind::Restored, move |event| {
                if let WindowEvent::Restored { id } = event {
                    minimized.borrow_mut().remove(id);
                }
            })
        };
        let on_removed = {
            let minimized = Rc::clone(&minimized);
            let buttons = buttons.clone();
            controller.subscribe(EventKind::Removed, move |event| {
                if let WindowEvent::Removed { id } = event {
                    minimized.borrow_mut().remove(id);
                    buttons.unregister_button(id);
                }
            })
        };

        Self {
            controller: controller.clone(),
            registry,
            minimized,
            buttons,
            _subscriptions: vec![on_minimized, on_added, on_restored, on_removed],
        }
    }

    /// Tabs in window insertion order, skipping windows without a button
    pub fn tabs(&self) -> Vec<TabView> {
        let state = self.registry.snapshot();
        let minimized = self.minimized.borrow();
        state
            .windows()
            .iter()
            .filter(|w| w.has_button)
            .map(|w| TabView {
                id: w.id.clone(),
                title: w.title.clone(),
                icon: w.icon.clone(),
                active: state.active() == Some(&w.id),
                minimized: minimized.contains(&w.id),
            })
            .collect()
    }

    pub fn active(&self) -> Focus {
        self.registry.active()
    }

    /// Number of windows currently flagged as minimized
    pub fn minimized_count(&self) -> usize {
        self.minimized.borrow().len()
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Tab click: minimize the active window, otherwise restore and focus
    pub fn click_tab(&self, id: &WindowId) -> ShellResult<()> {
        if !self.registry.contains(id) {
            return Err(ShellError::WindowNotFound(id.clone()));
        }
        if self.registry.active().as_ref() == Some(id) {
            tracing::debug!(%id, "tab click on active window, minimizing");
            self.controller.minimize(id);
            self.controller.focus(None);
        } else {
            tracing::debug!(%id, "tab click, restoring");
            self.controller.restore(id);
            self.controller.focus(Some(id.clone()));
        }
        Ok(())
    }

    /// A tab's button was laid out; make it available to the animator
    pub fn mount_tab_button(&self, id: WindowId, button: Rc<dyn ButtonGeometry>) {
        self.buttons.register_button(id, button);
    }

    pub fn unmount_tab_button(&self, id: &WindowId) {
        self.buttons.unregister_button(id);
    }
}
