//! JavaScript bindings
//!
//! Ids cross the boundary as strings, with `"no-id"` meaning "nothing
//! focused". Snapshots (tabs, animation frames, window rectangles) are
//! returned as JSON. Deferred window updates drain on a promise
//! continuation, so JS sees them after its current task like any other
//! microtask.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::launcher::AppEntry;
use crate::math::{Rect, Size, Vec2};
use crate::shell::{DesktopShell, Launched};
use crate::taskbar::ButtonSlot;
use crate::transition::{Clock, DeviceProfile};
use crate::types::{focus_from_str, focus_to_str, WindowId};
use crate::window::{AppWindow, WindowConfig};

impl From<ShellError> for JsValue {
    fn from(err: ShellError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// `performance.now()` as the animation clock, `Date.now()` where unavailable
struct BrowserClock {
    performance: Option<web_sys::Performance>,
}

impl BrowserClock {
    fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

#[derive(Serialize)]
struct LaunchReport<'a> {
    outcome: &'a str,
    id: &'a str,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_id(raw: &str) -> Result<WindowId, JsValue> {
    Ok(WindowId::parse(raw)?)
}

#[wasm_bindgen]
pub struct WasmShell {
    shell: DesktopShell,
    windows: BTreeMap<WindowId, AppWindow>,
    // Keeps the drain callback alive for the queue waker
    _drain: Rc<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl WasmShell {
    /// Create a shell from a (possibly empty) JSON config and app catalogue
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        catalog_json: &str,
        width: f32,
        height: f32,
        touch: bool,
    ) -> Result<WasmShell, JsValue> {
        let config = if config_json.trim().is_empty() {
            ShellConfig::default()
        } else {
            ShellConfig::from_json(config_json)?
        };
        let catalog: Vec<AppEntry> = if catalog_json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(catalog_json)
                .map_err(|e| ShellError::ConfigError(e.to_string()))?
        };
        let device = DeviceProfile {
            viewport: Size::new(width, height),
            touch,
        };
        let shell = DesktopShell::new(config, catalog, device, Rc::new(BrowserClock::new()))?;

        let queue = shell.queue().downgrade();
        let drain: Rc<Closure<dyn FnMut(JsValue)>> =
            Rc::new(Closure::new(move |_: JsValue| {
                if let Some(queue) = queue.upgrade() {
                    queue.run_until_idle();
                }
            }));
        let waker_drain = Rc::clone(&drain);
        shell.queue().set_waker(move || {
            // The drain never throws, so the continuation promise cannot reject.
            let _continuation = js_sys::Promise::resolve(&JsValue::UNDEFINED).then(&waker_drain);
        });

        Ok(WasmShell {
            shell,
            windows: BTreeMap::new(),
            _drain: drain,
        })
    }

    /// Mount a window; returns its id
    pub fn open_window(
        &mut self,
        title: String,
        id: Option<String>,
        icon: Option<String>,
        no_button: bool,
    ) -> Result<String, JsValue> {
        let config = WindowConfig {
            id,
            title,
            icon,
            no_button,
            position: None,
            size: None,
        };
        let window = self.shell.open_window(config)?;
        let id = window.id().clone();
        self.windows.insert(id.clone(), window);
        Ok(id.to_string())
    }

    /// Open a catalogue app; returns `{"outcome": ..., "id": ...}`
    pub fn launch(&mut self, app_id: &str) -> Result<String, JsValue> {
        match self.shell.launch(app_id)? {
            Launched::Opened(window) => {
                let id = window.id().clone();
                self.windows.insert(id.clone(), window);
                to_json(&LaunchReport {
                    outcome: "opened",
                    id: id.as_str(),
                })
            }
            Launched::Focused(id) => to_json(&LaunchReport {
                outcome: "focused",
                id: id.as_str(),
            }),
            Launched::DesktopOnly(app) => to_json(&LaunchReport {
                outcome: "desktop_only",
                id: &app.id,
            }),
        }
    }

    pub fn close_window(&mut self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let mut window = self
            .windows
            .remove(&id)
            .ok_or(ShellError::WindowNotFound(id))?;
        window.close();
        Ok(())
    }

    pub fn minimize_window(&self, id: &str) -> Result<(), JsValue> {
        self.window(id)?.minimize();
        Ok(())
    }

    pub fn click_window(&self, id: &str) -> Result<(), JsValue> {
        self.window(id)?.click();
        Ok(())
    }

    pub fn toggle_maximize(&self, id: &str) -> Result<bool, JsValue> {
        Ok(self.window(id)?.toggle_maximize()?)
    }

    pub fn drag_window(&self, id: &str, x: f32, y: f32) -> Result<bool, JsValue> {
        Ok(self.window(id)?.drag_to(Vec2::new(x, y)))
    }

    pub fn is_active(&self, id: &str) -> Result<bool, JsValue> {
        Ok(self.window(id)?.is_active())
    }

    pub fn is_minimized(&self, id: &str) -> Result<bool, JsValue> {
        Ok(self.window(id)?.is_minimized())
    }

    /// Window rectangle as JSON
    pub fn window_rect(&self, id: &str) -> Result<String, JsValue> {
        to_json(&self.window(id)?.frame_rect())
    }

    /// Focus a window by id, or pass `"no-id"` to unfocus everything
    pub fn focus(&self, id: &str) -> Result<(), JsValue> {
        let focus = focus_from_str(id)?;
        self.shell.controller().focus(focus);
        Ok(())
    }

    /// Focused window id, `"no-id"` when none
    pub fn active(&self) -> String {
        focus_to_str(&self.shell.tabs().active()).to_string()
    }

    pub fn click_tab(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        Ok(self.shell.tabs().click_tab(&id)?)
    }

    /// Record where a tab's button was laid out
    pub fn mount_tab_button(
        &self,
        id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let slot = ButtonSlot::at(Rect::new(x, y, width, height));
        self.shell.tabs().mount_tab_button(id, Rc::new(slot));
        Ok(())
    }

    pub fn unmount_tab_button(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.shell.tabs().unmount_tab_button(&id);
        Ok(())
    }

    /// Taskbar tabs as JSON
    pub fn tabs(&self) -> Result<String, JsValue> {
        to_json(&self.shell.tabs().tabs())
    }

    /// Advance animations; returns the ghost frames to draw as JSON
    pub fn tick(&self) -> Result<String, JsValue> {
        to_json(&self.shell.tick())
    }

    pub fn is_animating(&self) -> bool {
        self.shell.animator().is_animating()
    }

    pub fn set_viewport(&self, width: f32, height: f32, touch: bool) {
        self.shell.set_device(DeviceProfile {
            viewport: Size::new(width, height),
            touch,
        });
    }

    /// Drain deferred updates now instead of waiting for the promise
    pub fn flush(&self) -> usize {
        self.shell.flush()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl WasmShell {
    fn window(&self, id: &str) -> Result<&AppWindow, JsValue> {
        let id = parse_id(id)?;
        match self.windows.get(&id) {
            Some(window) => Ok(window),
            None => Err(ShellError::WindowNotFound(id).into()),
        }
    }
}
