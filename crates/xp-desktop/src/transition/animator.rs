//! Minimize/restore animation between a window and its taskbar button
//!
//! The animation is cosmetic and never gates the minimize/restore state
//! change: both entry points invoke their completion callback before
//! returning, and every failure (compact device, no button) simply skips
//! the animation.
//!
//! On the first minimize of a window a [`GhostFrame`] is captured (the
//! window's title, icon and on-screen rectangle) together with a paused
//! [`Timeline`]. The entry is cached per window id: later minimizes replay
//! the same timeline, a restore plays it in reverse, and once the reverse
//! reaches the start the entry is dropped so the next minimize captures
//! fresh geometry.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use super::clock::Clock;
use super::timeline::{Timeline, TimelineStatus};
use crate::config::AnimationConfig;
use crate::math::{Rect, Size, Vec2};
use crate::taskbar::ButtonRegistry;
use crate::types::WindowId;

/// What the shell knows about the device it runs on
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DeviceProfile {
    pub viewport: Size,
    /// Touch-first device (phone, tablet)
    pub touch: bool,
}

impl DeviceProfile {
    pub fn desktop(viewport: Size) -> Self {
        Self {
            viewport,
            touch: false,
        }
    }

    /// Small or touch devices skip animations entirely
    pub fn is_compact(&self, breakpoint_px: f32) -> bool {
        self.touch || self.viewport.width <= breakpoint_px
    }
}

/// Detached copy of a window's chrome used as the animated stand-in
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GhostFrame {
    pub title: String,
    pub icon: Option<String>,
    /// Window rectangle when the ghost was captured
    pub origin: Rect,
}

/// Cached animation state for one window
#[derive(Clone, Debug)]
pub struct AnimationEntry {
    pub window_id: WindowId,
    pub ghost: GhostFrame,
    pub timeline: Timeline,
}

/// Interpolated ghost state for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnimationFrame {
    pub window_id: WindowId,
    pub title: String,
    pub icon: Option<String>,
    pub rect: Rect,
    pub scale: f32,
    pub opacity: f32,
    pub progress: f32,
}

struct AnimatorState {
    config: AnimationConfig,
    compact_breakpoint_px: f32,
    device: DeviceProfile,
    entries: BTreeMap<WindowId, AnimationEntry>,
}

/// Shared handle to the minimize animator; clones drive the same entries
#[derive(Clone)]
pub struct MinimizeAnimator {
    state: Rc<RefCell<AnimatorState>>,
    buttons: ButtonRegistry,
    clock: Rc<dyn Clock>,
}

impl MinimizeAnimator {
    pub fn new(
        config: AnimationConfig,
        compact_breakpoint_px: f32,
        device: DeviceProfile,
        buttons: ButtonRegistry,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnimatorState {
                config,
                compact_breakpoint_px,
                device,
                entries: BTreeMap::new(),
            })),
            buttons,
            clock,
        }
    }

    pub fn set_device(&self, device: DeviceProfile) {
        self.state.borrow_mut().device = device;
    }

    pub fn device(&self) -> DeviceProfile {
        self.state.borrow().device
    }

    pub fn viewport(&self) -> Size {
        self.state.borrow().device.viewport
    }

    fn is_compact(&self) -> bool {
        let state = self.state.borrow();
        state.device.is_compact(state.compact_breakpoint_px)
    }

    /// Play the window-to-button transition
    pub fn animate_minimize(
        &self,
        id: &WindowId,
        window_rect: Rect,
        title: &str,
        icon: Option<&str>,
        on_complete: impl FnOnce(),
    ) {
        if self.is_compact() {
            tracing::trace!(%id, "compact device, minimize animation skipped");
            on_complete();
            return;
        }

        let now = self.clock.now_ms();
        let mut state = self.state.borrow_mut();
        if !state.entries.contains_key(id) {
            if self.buttons.button_rect(id).is_none() {
                drop(state);
                tracing::warn!(%id, "no taskbar button for window, minimize animation skipped");
                on_complete();
                return;
            }
            let duration_ms = state.config.duration_ms;
            state.entries.insert(
                id.clone(),
                AnimationEntry {
                    window_id: id.clone(),
                    ghost: GhostFrame {
                        title: title.to_string(),
                        icon: icon.map(str::to_string),
                        origin: window_rect,
                    },
                    timeline: Timeline::paused(duration_ms),
                },
            );
        }
        if let Some(entry) = state.entries.get_mut(id) {
            entry.timeline.play(now);
        }
        drop(state);

        on_complete();
    }

    /// Play the button-to-window transition (the cached minimize, reversed)
    pub fn animate_restore(&self, id: &WindowId, on_complete: impl FnOnce()) {
        if self.is_compact() {
            on_complete();
            return;
        }

        let now = self.clock.now_ms();
        let reversed = match self.state.borrow_mut().entries.get_mut(id) {
            Some(entry) => {
                entry.timeline.reverse(now);
                true
            }
            None => false,
        };
        if !reversed {
            tracing::trace!(%id, "no cached minimize animation to reverse");
        }
        on_complete();
    }

    /// Advance every running animation and report the frames to draw
    ///
    /// Entries whose reverse reached the start are dropped here.
    pub fn tick(&self) -> Vec<AnimationFrame> {
        let now = self.clock.now_ms();
        let mut state = self.state.borrow_mut();
        let config = state.config.clone();
        let mut frames = Vec::new();
        let mut finished = Vec::new();

        for (id, entry) in state.entries.iter_mut() {
            if entry.timeline.tick(now) == TimelineStatus::ReverseCompleted {
                finished.push(id.clone());
                continue;
            }
            let target = self.buttons.button_rect(id);
            frames.push(interpolate(entry, target, &config));
        }

        for id in finished {
            tracing::trace!(%id, "restore animation finished, ghost removed");
            state.entries.remove(&id);
        }
        frames
    }

    /// Drop a window's cached animation whatever its phase
    pub fn cleanup(&self, id: &WindowId) -> bool {
        self.state.borrow_mut().entries.remove(id).is_some()
    }

    pub fn has_entry(&self, id: &WindowId) -> bool {
        self.state.borrow().entries.contains_key(id)
    }

    /// Number of live ghosts
    pub fn entry_count(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn progress(&self, id: &WindowId) -> Option<f32> {
        self.state
            .borrow()
            .entries
            .get(id)
            .map(|entry| entry.timeline.progress())
    }

    pub fn is_animating(&self) -> bool {
        self.state
            .borrow()
            .entries
            .values()
            .any(|entry| entry.timeline.is_playing())
    }
}

/// Ghost state at the entry's current progress
///
/// The ghost's centre travels to the button's centre while it shrinks and
/// fades. Without a button it stays in place.
fn interpolate(
    entry: &AnimationEntry,
    button: Option<Rect>,
    config: &AnimationConfig,
) -> AnimationFrame {
    let progress = entry.timeline.progress();
    let t = config.easing.apply(progress);
    let origin = entry.ghost.origin;

    let travel = match button {
        Some(button) => button.center() - origin.center(),
        None => Vec2::ZERO,
    };
    let scale = 1.0 + (config.end_scale - 1.0) * t;
    let opacity = 1.0 + (config.end_opacity - 1.0) * t;
    let rect = origin
        .translated(Vec2::ZERO.lerp(travel, t))
        .scaled_about_center(scale);

    AnimationFrame {
        window_id: entry.window_id.clone(),
        title: entry.ghost.title.clone(),
        icon: entry.ghost.icon.clone(),
        rect,
        scale,
        opacity,
        progress,
    }
}
