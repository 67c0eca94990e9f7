//! App launcher
//!
//! Keeps the catalogue of launchable apps and the list of apps with an open
//! window. An app's window uses the app id as its window id, so opening an
//! app that is already open focuses the existing window instead.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bus::{EventKind, Subscription, WindowEvent};
use crate::error::{ShellError, ShellResult};
use crate::math::Size;
use crate::types::WindowId;
use crate::window::{WindowConfig, WindowController};

/// A launchable app
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Window size, `None` for the shell default
    #[serde(default)]
    pub size: Option<Size>,
    /// Refuse to open on compact devices
    #[serde(default)]
    pub desktop_only: bool,
}

impl AppEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            size: None,
            desktop_only: false,
        }
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            icon: self.icon.clone(),
            no_button: false,
            position: None,
            size: self.size,
        }
    }
}

/// What [`AppManager::open_app`] decided
#[derive(Clone, Debug, PartialEq)]
pub enum LaunchOutcome {
    /// The app was not open; the caller mounts a window for it
    Launch(AppEntry),
    /// The app already had a window, which was focused
    Focused(WindowId),
    /// The app cannot run on this device; the host shows an alert
    DesktopOnly(AppEntry),
}

/// Tracks open apps against the catalogue
///
/// Listens for window removal so an app whose window closed by itself is
/// no longer reported as open.
pub struct AppManager {
    controller: WindowController,
    catalog: Vec<AppEntry>,
    open: Rc<RefCell<Vec<AppEntry>>>,
    _on_removed: Subscription,
}

impl AppManager {
    pub fn new(controller: &WindowController, catalog: Vec<AppEntry>) -> Self {
        let open: Rc<RefCell<Vec<AppEntry>>> = Rc::new(RefCell::new(Vec::new()));
        let on_removed = {
            let open = Rc::clone(&open);
            controller.subscribe(EventKind::Removed, move |event| {
                if let WindowEvent::Removed { id } = event {
                    open.borrow_mut().retain(|app| app.id != id.as_str());
                }
            })
        };
        Self {
            controller: controller.clone(),
            catalog,
            open,
            _on_removed: on_removed,
        }
    }

    pub fn catalog(&self) -> &[AppEntry] {
        &self.catalog
    }

    pub fn find(&self, app_id: &str) -> Option<&AppEntry> {
        self.catalog.iter().find(|app| app.id == app_id)
    }

    /// Open an app, or focus its window if it is already open
    pub fn open_app(&self, app_id: &str, compact: bool) -> ShellResult<LaunchOutcome> {
        let Some(app) = self.find(app_id) else {
            tracing::warn!(app_id, "app not found");
            return Err(ShellError::UnknownApp(app_id.to_string()));
        };

        if self.is_app_open(app_id) {
            let id = WindowId::parse(app_id)?;
            tracing::debug!(%id, "app already open, focusing");
            self.controller.focus(Some(id.clone()));
            return Ok(LaunchOutcome::Focused(id));
        }

        if app.desktop_only && compact {
            tracing::debug!(app_id, "desktop-only app refused on compact device");
            return Ok(LaunchOutcome::DesktopOnly(app.clone()));
        }

        self.open.borrow_mut().push(app.clone());
        Ok(LaunchOutcome::Launch(app.clone()))
    }

    /// Close an app's window
    pub fn close_app(&self, app_id: &str) -> ShellResult<()> {
        let id = WindowId::parse(app_id)?;
        self.open.borrow_mut().retain(|app| app.id != app_id);
        self.controller.remove(&id);
        Ok(())
    }

    /// Forget a launch whose window never mounted
    pub fn abandon(&self, app_id: &str) {
        self.open.borrow_mut().retain(|app| app.id != app_id);
    }

    pub fn is_app_open(&self, app_id: &str) -> bool {
        self.open.borrow().iter().any(|app| app.id == app_id)
    }

    pub fn open_apps(&self) -> Vec<AppEntry> {
        self.open.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Emitter;

    fn catalog() -> Vec<AppEntry> {
        let mut paint = AppEntry::new("paint", "Paint");
        paint.desktop_only = true;
        vec![AppEntry::new("about", "About Me"), paint]
    }

    fn manager() -> (WindowController, AppManager) {
        let controller = WindowController::new(Emitter::new());
        let apps = AppManager::new(&controller, catalog());
        (controller, apps)
    }

    #[test]
    fn test_open_unknown_app() {
        let (_, apps) = manager();
        assert_eq!(
            apps.open_app("minesweeper", false),
            Err(ShellError::UnknownApp("minesweeper".to_string()))
        );
    }

    #[test]
    fn test_open_then_focus() {
        let (controller, apps) = manager();
        let focused = Rc::new(RefCell::new(Vec::new()));
        let f = Rc::clone(&focused);
        let _sub = controller.subscribe(EventKind::VisibilityChanged, move |event| {
            if let WindowEvent::VisibilityChanged { id } = event {
                f.borrow_mut().push(id.clone());
            }
        });

        assert!(matches!(apps.open_app("about", false), Ok(LaunchOutcome::Launch(_))));
        assert!(apps.is_app_open("about"));
        assert!(focused.borrow().is_empty());

        let again = apps.open_app("about", false).unwrap();
        assert_eq!(again, LaunchOutcome::Focused(WindowId::parse("about").unwrap()));
        assert_eq!(focused.borrow().len(), 1);
        assert_eq!(apps.open_apps().len(), 1);
    }

    #[test]
    fn test_desktop_only_on_compact() {
        let (_, apps) = manager();
        assert!(matches!(
            apps.open_app("paint", true),
            Ok(LaunchOutcome::DesktopOnly(_))
        ));
        assert!(!apps.is_app_open("paint"));
        assert!(matches!(apps.open_app("paint", false), Ok(LaunchOutcome::Launch(_))));
    }

    #[test]
    fn test_removed_window_closes_app() {
        let (controller, apps) = manager();
        apps.open_app("about", false).unwrap();
        controller.remove(&WindowId::parse("about").unwrap());
        assert!(!apps.is_app_open("about"));
    }

    #[test]
    fn test_close_app_publishes_removal() {
        let (controller, apps) = manager();
        let removed = Rc::new(RefCell::new(0));
        let r = Rc::clone(&removed);
        let _sub = controller.subscribe(EventKind::Removed, move |_| *r.borrow_mut() += 1);

        apps.open_app("about", false).unwrap();
        apps.close_app("about").unwrap();

        assert_eq!(*removed.borrow(), 1);
        assert!(apps.open_apps().is_empty());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[{"id": "cmd", "title": "Command Prompt", "desktop_only": true}]"#;
        let entries: Vec<AppEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].id, "cmd");
        assert!(entries[0].desktop_only);
        assert_eq!(entries[0].size, None);
    }
}
