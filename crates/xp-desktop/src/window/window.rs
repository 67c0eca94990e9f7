use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::bus::{EventKind, MicrotaskQueue, SafeSubscription, Subscription, WindowEvent};
use crate::error::{ShellError, ShellResult};
use crate::math::{Rect, Size, Vec2};
use crate::transition::MinimizeAnimator;
use crate::types::{WindowId, WindowRecord};

use super::{WindowConfig, WindowController, WindowFrame};

/// Where a window is in its lifecycle
///
/// A window is `Registering` only inside [`AppWindow::mount`]; if
/// registration fails no window is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPhase {
    /// Focused and visible
    Active,
    /// Visible, another window (or none) is focused
    Inactive,
    /// Body hidden, taskbar tab still present
    Minimized,
    /// Closed; terminal
    Removed,
}

/// Everything a window needs from its surroundings
#[derive(Clone)]
pub struct WindowContext {
    pub controller: WindowController,
    pub queue: MicrotaskQueue,
    /// Plays the minimize/restore transition; `None` disables animation
    pub animator: Option<MinimizeAnimator>,
    /// Viewport used when the window is maximized without an animator
    pub viewport: Size,
}

#[derive(Debug)]
struct WindowFlags {
    active: bool,
    minimized: bool,
}

/// Listeners released together when the window goes away
#[derive(Default)]
struct Teardown {
    subscriptions: Vec<SafeSubscription>,
    removal: Option<Subscription>,
}

/// A self-registering window
///
/// Mounting publishes the window's record and focuses it. From then on the
/// window learns whether it is active or minimized only from bus events
/// about its own id, applied one microtask after they are emitted. It never
/// looks at other windows, the taskbar or the registry.
///
/// A `Removed` event for its id published by someone else (the launcher
/// closing the app) closes the window on the spot without publishing
/// anything. Dropping a window that was not closed closes it.
pub struct AppWindow {
    record: WindowRecord,
    ctx: WindowContext,
    flags: Rc<RefCell<WindowFlags>>,
    frame: Rc<RefCell<WindowFrame>>,
    teardown: Rc<RefCell<Teardown>>,
    closed: Rc<Cell<bool>>,
}

impl AppWindow {
    /// Register a window and give it focus
    pub fn mount(
        ctx: &WindowContext,
        config: WindowConfig,
        size: Size,
        position: Vec2,
    ) -> ShellResult<Self> {
        let id = WindowId::resolve(config.id.as_deref()).map_err(|err| {
            tracing::warn!(title = %config.title, error = %err, "window cannot be registered");
            err
        })?;
        let record = WindowRecord {
            id,
            title: config.title,
            icon: config.icon,
            has_button: !config.no_button,
        };

        let flags = Rc::new(RefCell::new(WindowFlags {
            active: true,
            minimized: false,
        }));
        let frame = Rc::new(RefCell::new(WindowFrame::new(position, size)));
        let subscriptions = Self::subscribe(ctx, &record, &flags, &frame);

        ctx.controller.add(record.clone())?;

        let closed = Rc::new(Cell::new(false));
        let teardown = Rc::new(RefCell::new(Teardown {
            subscriptions,
            removal: None,
        }));
        let removal = Self::watch_removal(ctx, &record.id, &closed, &teardown);
        teardown.borrow_mut().removal = Some(removal);

        ctx.controller.focus(Some(record.id.clone()));
        tracing::debug!(id = %record.id, "window mounted");

        Ok(Self {
            record,
            ctx: ctx.clone(),
            flags,
            frame,
            teardown,
            closed,
        })
    }

    /// Close without publishing when another component removes this window
    ///
    /// Runs synchronously so the window is already closed when a new window
    /// claims the same id.
    fn watch_removal(
        ctx: &WindowContext,
        id: &WindowId,
        closed: &Rc<Cell<bool>>,
        teardown: &Rc<RefCell<Teardown>>,
    ) -> Subscription {
        let own = id.clone();
        let closed = Rc::clone(closed);
        let teardown = Rc::clone(teardown);
        let animator = ctx.animator.clone();
        ctx.controller.subscribe(EventKind::Removed, move |event| {
            if event.window_id() != Some(&own) || closed.replace(true) {
                return;
            }
            let released = std::mem::take(&mut *teardown.borrow_mut());
            drop(released);
            if let Some(animator) = &animator {
                animator.cleanup(&own);
            }
            tracing::debug!(id = %own, "window removed by another component");
        })
    }

    fn subscribe(
        ctx: &WindowContext,
        record: &WindowRecord,
        flags: &Rc<RefCell<WindowFlags>>,
        frame: &Rc<RefCell<WindowFrame>>,
    ) -> Vec<SafeSubscription> {
        let controller = &ctx.controller;
        let queue = &ctx.queue;

        let visibility = {
            let own = record.id.clone();
            let flags = Rc::clone(flags);
            controller.subscribe_deferred(queue, EventKind::VisibilityChanged, move |event| {
                if let WindowEvent::VisibilityChanged { id } = event {
                    flags.borrow_mut().active = id.as_ref() == Some(&own);
                }
            })
        };

        let minimize = {
            let record = record.clone();
            let flags = Rc::clone(flags);
            let frame = Rc::clone(frame);
            let animator = ctx.animator.clone();
            controller.subscribe_deferred(queue, EventKind::Minimized, move |event| {
                if event.window_id() != Some(&record.id) {
                    return;
                }
                let was_minimized = std::mem::replace(&mut flags.borrow_mut().minimized, true);
                if was_minimized {
                    return;
                }
                if let Some(animator) = &animator {
                    let rect = frame.borrow().rect(animator.viewport());
                    let icon = record.icon.as_deref();
                    animator.animate_minimize(&record.id, rect, &record.title, icon, || {
                        tracing::trace!(id = %record.id, "minimize animation started");
                    });
                }
            })
        };

        let restore = {
            let own = record.id.clone();
            let flags = Rc::clone(flags);
            let animator = ctx.animator.clone();
            controller.subscribe_deferred(queue, EventKind::Restored, move |event| {
                if event.window_id() != Some(&own) {
                    return;
                }
                let was_minimized = std::mem::replace(&mut flags.borrow_mut().minimized, false);
                if !was_minimized {
                    return;
                }
                if let Some(animator) = &animator {
                    animator.animate_restore(&own, || {
                        tracing::trace!(id = %own, "restore animation started");
                    });
                }
            })
        };

        vec![visibility, minimize, restore]
    }

    pub fn id(&self) -> &WindowId {
        &self.record.id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn record(&self) -> &WindowRecord {
        &self.record
    }

    pub fn is_active(&self) -> bool {
        !self.closed.get() && self.flags.borrow().active
    }

    pub fn is_minimized(&self) -> bool {
        self.flags.borrow().minimized
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    pub fn phase(&self) -> WindowPhase {
        if self.closed.get() {
            return WindowPhase::Removed;
        }
        let flags = self.flags.borrow();
        if flags.minimized {
            WindowPhase::Minimized
        } else if flags.active {
            WindowPhase::Active
        } else {
            WindowPhase::Inactive
        }
    }

    /// Title-bar minimize button
    pub fn minimize(&self) {
        if self.closed.get() {
            return;
        }
        self.ctx.controller.minimize(&self.record.id);
        self.ctx.controller.focus(None);
    }

    /// Mouse down anywhere in the window
    pub fn click(&self) {
        if self.closed.get() {
            return;
        }
        self.ctx.controller.focus(Some(self.record.id.clone()));
    }

    /// Title-bar close button
    ///
    /// Publishes removal, then a minimize so no tab is left showing the
    /// window as active, then clears focus. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.closed.replace(true) {
            return;
        }
        let id = self.record.id.clone();
        self.ctx.controller.remove(&id);
        self.ctx.controller.minimize(&id);
        self.ctx.controller.focus(None);

        // Queued deliveries for this window become no-ops.
        let released = std::mem::take(&mut *self.teardown.borrow_mut());
        drop(released);
        if let Some(animator) = &self.ctx.animator {
            animator.cleanup(&id);
        }
        tracing::debug!(%id, "window closed");
    }

    /// Title-bar maximize/restore button. Returns the new maximized state.
    pub fn toggle_maximize(&self) -> ShellResult<bool> {
        if self.closed.get() {
            return Err(ShellError::InvalidOperation {
                op: "toggle_maximize",
                reason: "window is closed",
            });
        }
        Ok(self.frame.borrow_mut().toggle_maximize())
    }

    pub fn is_maximized(&self) -> bool {
        self.frame.borrow().is_maximized()
    }

    /// Apply a drag translate from the title bar. Ignored while maximized.
    pub fn drag_to(&self, offset: Vec2) -> bool {
        !self.closed.get() && self.frame.borrow_mut().drag_to(offset)
    }

    /// On-screen rectangle of the window
    pub fn frame_rect(&self) -> Rect {
        let viewport = match &self.ctx.animator {
            Some(animator) => animator.viewport(),
            None => self.ctx.viewport,
        };
        self.frame.borrow().rect(viewport)
    }
}

impl Drop for AppWindow {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for AppWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppWindow")
            .field("id", &self.record.id)
            .field("phase", &self.phase())
            .finish()
    }
}
