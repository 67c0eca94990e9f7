//! Shell composition root
//!
//! Wires one bus, one microtask queue, the taskbar, the animator, the
//! cascade and the launcher together. Windows themselves are owned by the
//! host; the shell only hands out the context they mount into.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{Emitter, MicrotaskQueue};
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::launcher::{AppEntry, AppManager, LaunchOutcome};
use crate::taskbar::{ButtonRegistry, WindowTabs};
use crate::transition::{AnimationFrame, Clock, DeviceProfile, MinimizeAnimator};
use crate::types::WindowId;
use crate::window::{AppWindow, Cascade, WindowConfig, WindowContext, WindowController};

/// Result of [`DesktopShell::launch`]
#[derive(Debug)]
pub enum Launched {
    /// A new window was mounted for the app
    Opened(AppWindow),
    /// The app's existing window was focused
    Focused(WindowId),
    /// The app refuses to run on a compact device
    DesktopOnly(AppEntry),
}

pub struct DesktopShell {
    config: ShellConfig,
    controller: WindowController,
    queue: MicrotaskQueue,
    buttons: ButtonRegistry,
    animator: MinimizeAnimator,
    tabs: WindowTabs,
    apps: AppManager,
    cascade: RefCell<Cascade>,
}

impl DesktopShell {
    pub fn new(
        config: ShellConfig,
        catalog: Vec<AppEntry>,
        device: DeviceProfile,
        clock: Rc<dyn Clock>,
    ) -> ShellResult<Self> {
        config.validate()?;

        let controller = WindowController::new(Emitter::new());
        let queue = MicrotaskQueue::new();
        let buttons = ButtonRegistry::new();
        let animator = MinimizeAnimator::new(
            config.animation.clone(),
            config.compact_breakpoint_px,
            device,
            buttons.clone(),
            clock,
        );
        let tabs = WindowTabs::attach(&controller, &queue, buttons.clone());
        let apps = AppManager::new(&controller, catalog);
        let cascade = RefCell::new(Cascade::new(config.cascade.clone()));

        tracing::debug!(apps = apps.catalog().len(), "desktop shell created");

        Ok(Self {
            config,
            controller,
            queue,
            buttons,
            animator,
            tabs,
            apps,
            cascade,
        })
    }

    /// Context a host-owned window mounts into
    pub fn window_context(&self) -> WindowContext {
        WindowContext {
            controller: self.controller.clone(),
            queue: self.queue.clone(),
            animator: Some(self.animator.clone()),
            viewport: self.animator.viewport(),
        }
    }

    /// Mount a window, cascading it when no position is given
    pub fn open_window(&self, config: WindowConfig) -> ShellResult<AppWindow> {
        let size = config.size.unwrap_or(self.config.window_size);
        let position = match config.position {
            Some(position) => position,
            None => self.cascade.borrow_mut().next_position(self.animator.viewport()),
        };
        AppWindow::mount(&self.window_context(), config, size, position)
    }

    /// Open an app from the catalogue
    pub fn launch(&self, app_id: &str) -> ShellResult<Launched> {
        match self.apps.open_app(app_id, self.is_compact())? {
            LaunchOutcome::Launch(app) => match self.open_window(app.window_config()) {
                Ok(window) => Ok(Launched::Opened(window)),
                Err(err) => {
                    self.apps.abandon(app_id);
                    Err(err)
                }
            },
            LaunchOutcome::Focused(id) => Ok(Launched::Focused(id)),
            LaunchOutcome::DesktopOnly(app) => Ok(Launched::DesktopOnly(app)),
        }
    }

    /// Run deferred window updates; returns how many tasks ran
    pub fn flush(&self) -> usize {
        self.queue.run_until_idle()
    }

    /// Advance animations and collect the ghost frames to draw
    pub fn tick(&self) -> Vec<AnimationFrame> {
        self.animator.tick()
    }

    /// The viewport or input device changed
    pub fn set_device(&self, device: DeviceProfile) {
        self.animator.set_device(device);
    }

    pub fn is_compact(&self) -> bool {
        self.animator.device().is_compact(self.config.compact_breakpoint_px)
    }

    /// Start the cascade over from its base position
    pub fn reset_cascade(&self) {
        self.cascade.borrow_mut().reset();
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn controller(&self) -> &WindowController {
        &self.controller
    }

    pub fn queue(&self) -> &MicrotaskQueue {
        &self.queue
    }

    pub fn buttons(&self) -> &ButtonRegistry {
        &self.buttons
    }

    pub fn animator(&self) -> &MinimizeAnimator {
        &self.animator
    }

    pub fn tabs(&self) -> &WindowTabs {
        &self.tabs
    }

    pub fn apps(&self) -> &AppManager {
        &self.apps
    }
}
