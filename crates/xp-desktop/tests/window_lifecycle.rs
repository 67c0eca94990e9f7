//! Window lifecycle scenarios
//!
//! Drives a whole shell the way a host would: mount windows, click tabs,
//! drain the microtask queue, tick animations.

use std::cell::Cell;
use std::rc::Rc;

use xp_desktop::{
    AppEntry, DesktopShell, DeviceProfile, EventKind, Launched, ManualClock, MicrotaskQueue,
    Rect, SafeSubscription, ShellConfig, ShellError, Size, WindowConfig, WindowId, WindowPhase,
};

const BUTTON: Rect = Rect::new(10.0, 1050.0, 160.0, 30.0);

fn id(raw: &str) -> WindowId {
    WindowId::parse(raw).unwrap()
}

fn shell_with(viewport: Size, clock: &ManualClock) -> DesktopShell {
    DesktopShell::new(
        ShellConfig::default(),
        vec![AppEntry::new("about", "About Me"), AppEntry::new("projects", "Projects")],
        DeviceProfile::desktop(viewport),
        Rc::new(clock.clone()),
    )
    .unwrap()
}

fn desktop_shell() -> (DesktopShell, ManualClock) {
    let clock = ManualClock::new();
    (shell_with(Size::new(1920.0, 1080.0), &clock), clock)
}

fn open(shell: &DesktopShell, raw: &str) -> xp_desktop::AppWindow {
    shell
        .open_window(WindowConfig::titled(raw.to_uppercase()).with_id(raw))
        .unwrap()
}

fn mount_button(shell: &DesktopShell, raw: &str) {
    shell
        .tabs()
        .mount_tab_button(id(raw), Rc::new(xp_desktop::ButtonSlot::at(BUTTON)));
}

#[test]
fn test_removing_windows_refocuses_last_added() {
    let (shell, _) = desktop_shell();
    let mut a = open(&shell, "a");
    let mut b = open(&shell, "b");
    shell.flush();
    assert_eq!(shell.tabs().active(), Some(id("b")));

    b.close();
    shell.flush();
    assert_eq!(shell.tabs().active(), Some(id("a")));
    assert!(a.is_active());

    a.close();
    shell.flush();
    assert_eq!(shell.tabs().active(), None);
    assert!(shell.tabs().tabs().is_empty());
}

#[test]
fn test_minimize_then_restore() {
    let (shell, _) = desktop_shell();
    let a = open(&shell, "a");
    shell.flush();

    a.minimize();
    shell.flush();
    assert!(a.is_minimized());
    assert_eq!(shell.tabs().active(), None);
    assert_eq!(shell.tabs().tabs().len(), 1);

    shell.controller().restore(a.id());
    shell.controller().focus(Some(id("a")));
    shell.flush();
    assert!(!a.is_minimized());
    assert_eq!(a.phase(), WindowPhase::Active);
    assert_eq!(shell.tabs().active(), Some(id("a")));
}

#[test]
fn test_tab_click_round_trip() {
    let (shell, _) = desktop_shell();
    let a = open(&shell, "a");
    let _b = open(&shell, "b");
    shell.flush();

    shell.tabs().click_tab(&id("b")).unwrap();
    shell.flush();
    assert_eq!(shell.tabs().active(), None);

    shell.tabs().click_tab(&id("a")).unwrap();
    shell.flush();
    assert!(a.is_active());
    assert!(!a.is_minimized());
    let tabs = shell.tabs().tabs();
    assert!(tabs.iter().any(|t| t.id == id("b") && t.minimized));
}

#[test]
fn test_double_minimize_reuses_ghost() {
    let (shell, clock) = desktop_shell();
    let a = open(&shell, "a");
    mount_button(&shell, "a");
    shell.flush();

    a.minimize();
    shell.flush();
    clock.advance(100.0);
    a.minimize();
    shell.flush();

    assert!(a.is_minimized());
    assert_eq!(shell.animator().entry_count(), 1);

    let rect = a.frame_rect();
    shell
        .animator()
        .animate_minimize(a.id(), rect, a.title(), None, || {});
    assert_eq!(shell.animator().entry_count(), 1);
}

#[test]
fn test_restore_animation_finishes_and_drops_ghost() {
    let (shell, clock) = desktop_shell();
    let a = open(&shell, "a");
    mount_button(&shell, "a");
    shell.flush();

    a.minimize();
    shell.flush();
    clock.advance(300.0);
    let frames = shell.tick();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].progress, 1.0);
    assert!(frames[0].opacity.abs() < 1e-4);

    shell.tabs().click_tab(&id("a")).unwrap();
    shell.flush();
    assert!(shell.animator().has_entry(&id("a")));

    clock.advance(300.0);
    assert!(shell.tick().is_empty());
    assert_eq!(shell.animator().entry_count(), 0);
}

#[test]
fn test_compact_device_skips_animation() {
    let clock = ManualClock::new();
    let shell = shell_with(Size::new(375.0, 812.0), &clock);
    let a = open(&shell, "a");
    mount_button(&shell, "a");
    shell.flush();

    let done = Cell::new(false);
    shell
        .animator()
        .animate_minimize(a.id(), a.frame_rect(), a.title(), None, || done.set(true));
    assert!(done.get());

    a.minimize();
    shell.flush();
    assert!(a.is_minimized());
    assert_eq!(shell.animator().entry_count(), 0);
    assert!(shell.tick().is_empty());
}

#[test]
fn test_closing_clears_ghost() {
    let (shell, _) = desktop_shell();
    let mut a = open(&shell, "a");
    mount_button(&shell, "a");
    shell.flush();
    a.minimize();
    shell.flush();
    assert_eq!(shell.animator().entry_count(), 1);

    a.close();
    shell.flush();
    assert_eq!(shell.animator().entry_count(), 0);
    assert!(shell.buttons().is_empty());
    assert_eq!(a.phase(), WindowPhase::Removed);
}

#[test]
fn test_duplicate_id_rejected() {
    let (shell, _) = desktop_shell();
    let _a = open(&shell, "a");
    let second = shell.open_window(WindowConfig::titled("Again").with_id("a"));

    assert_eq!(second.unwrap_err(), ShellError::DuplicateWindow(id("a")));
    shell.flush();
    assert_eq!(shell.tabs().tabs().len(), 1);
}

#[test]
fn test_reserved_id_rejected() {
    let (shell, _) = desktop_shell();
    let result = shell.open_window(WindowConfig::titled("Sentinel").with_id(WindowId::NO_ID));
    assert_eq!(result.unwrap_err(), ShellError::ReservedWindowId);
    assert!(shell.tabs().tabs().is_empty());
}

#[test]
fn test_launch_focuses_open_app() {
    let (shell, _) = desktop_shell();
    let about = match shell.launch("about").unwrap() {
        Launched::Opened(window) => window,
        other => panic!("unexpected {other:?}"),
    };
    let _projects = match shell.launch("projects").unwrap() {
        Launched::Opened(window) => window,
        other => panic!("unexpected {other:?}"),
    };
    shell.flush();
    assert!(!about.is_active());

    assert!(matches!(shell.launch("about").unwrap(), Launched::Focused(_)));
    shell.flush();
    assert!(about.is_active());
    assert_eq!(shell.tabs().tabs().len(), 2);
}

#[test]
fn test_closed_app_can_launch_again() {
    let (shell, _) = desktop_shell();
    let about = match shell.launch("about").unwrap() {
        Launched::Opened(window) => window,
        other => panic!("unexpected {other:?}"),
    };
    drop(about);
    shell.flush();
    assert!(!shell.apps().is_app_open("about"));
    assert!(matches!(shell.launch("about").unwrap(), Launched::Opened(_)));
}

#[test]
fn test_deferred_handler_runs_after_emit() {
    let (shell, _) = desktop_shell();
    let queue: &MicrotaskQueue = shell.queue();
    let seen = Rc::new(Cell::new(0));
    let s = Rc::clone(&seen);
    let _sub = SafeSubscription::new(
        shell.controller().bus(),
        queue,
        EventKind::Minimized,
        move |_| s.set(s.get() + 1),
    );

    shell.controller().minimize(&id("a"));
    assert_eq!(seen.get(), 0);
    assert_eq!(queue.len(), 1);
    shell.flush();
    assert_eq!(seen.get(), 1);
}

fn launch_window(shell: &DesktopShell, app_id: &str) -> xp_desktop::AppWindow {
    match shell.launch(app_id).unwrap() {
        Launched::Opened(window) => window,
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_relaunched_app_tab_is_not_minimized() {
    let (shell, _) = desktop_shell();
    let mut about = launch_window(&shell, "about");
    shell.flush();
    about.close();
    shell.flush();
    assert_eq!(shell.tabs().minimized_count(), 0);

    let about = launch_window(&shell, "about");
    shell.flush();

    assert!(about.is_active());
    assert!(!about.is_minimized());
    let tabs = shell.tabs().tabs();
    assert_eq!(tabs.len(), 1);
    assert!(tabs[0].active);
    assert!(!tabs[0].minimized);
}

#[test]
fn test_close_app_then_relaunch_survives_stale_drop() {
    let (shell, _) = desktop_shell();
    let stale = launch_window(&shell, "about");
    shell.flush();

    shell.apps().close_app("about").unwrap();
    assert!(stale.is_closed());
    assert_eq!(stale.phase(), WindowPhase::Removed);

    let fresh = launch_window(&shell, "about");
    shell.flush();
    drop(stale);
    shell.flush();

    assert!(fresh.is_active());
    assert!(shell.apps().is_app_open("about"));
    assert!(shell.controller().is_registered(&id("about")));
    let tabs = shell.tabs().tabs();
    assert_eq!(tabs.len(), 1);
    assert!(tabs[0].active);
    assert_eq!(
        shell.open_window(WindowConfig::titled("Again").with_id("about")).unwrap_err(),
        ShellError::DuplicateWindow(id("about"))
    );
}
