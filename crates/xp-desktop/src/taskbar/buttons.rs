use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::math::Rect;
use crate::types::WindowId;

/// Something that can report where a taskbar button currently is
///
/// Queried at animation time, never cached, since the button moves as
/// tabs come and go.
pub trait ButtonGeometry {
    /// Current on-screen rectangle, `None` if the button is not laid out
    fn bounding_rect(&self) -> Option<Rect>;
}

/// Button geometry pushed in by the host after layout
#[derive(Clone, Debug, Default)]
pub struct ButtonSlot {
    rect: Rc<Cell<Option<Rect>>>,
}

impl ButtonSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(rect: Rect) -> Self {
        let slot = Self::new();
        slot.set_rect(Some(rect));
        slot
    }

    pub fn set_rect(&self, rect: Option<Rect>) {
        self.rect.set(rect);
    }
}

impl ButtonGeometry for ButtonSlot {
    fn bounding_rect(&self) -> Option<Rect> {
        self.rect.get()
    }
}

/// Side table from window id to its taskbar button
///
/// Advisory only: it is consulted for animation geometry and says nothing
/// about whether a window exists. The last registration for an id wins.
#[derive(Clone, Default)]
pub struct ButtonRegistry {
    buttons: Rc<RefCell<HashMap<WindowId, Rc<dyn ButtonGeometry>>>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_button(&self, id: WindowId, button: Rc<dyn ButtonGeometry>) {
        tracing::trace!(%id, "taskbar button registered");
        self.buttons.borrow_mut().insert(id, button);
    }

    pub fn unregister_button(&self, id: &WindowId) -> bool {
        self.buttons.borrow_mut().remove(id).is_some()
    }

    pub fn button(&self, id: &WindowId) -> Option<Rc<dyn ButtonGeometry>> {
        self.buttons.borrow().get(id).cloned()
    }

    /// Current rectangle of a window's button, if it is registered and laid out
    pub fn button_rect(&self, id: &WindowId) -> Option<Rect> {
        // The geometry callback runs outside the table borrow.
        self.button(id)?.bounding_rect()
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.buttons.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.buttons.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.borrow().is_empty()
    }
}
