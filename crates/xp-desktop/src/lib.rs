//! Window lifecycle and focus coordination for a browser desktop shell
//!
//! Windows, the taskbar and the launcher never hold references to each
//! other. They agree on which windows exist, which one is focused, which
//! are minimized and how a minimize animates toward its taskbar button by
//! publishing and listening on one shared event bus. Window state updates
//! are deferred one microtask so no component changes state while another
//! is in the middle of handling an event.
//!
//! ## Architecture
//!
//! - [`bus`]: event bus, microtask queue and deferred subscriptions
//! - [`window`]: lifecycle façade, registry projection and the window component
//! - [`taskbar`]: tab projection and the button geometry table
//! - [`transition`]: minimize/restore animation driven by an injected clock
//! - [`launcher`]: app catalogue, focusing apps that are already open
//! - [`shell`]: composition root wiring one of everything together
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use xp_desktop::{DesktopShell, DeviceProfile, ManualClock, ShellConfig, Size, WindowConfig};
//!
//! let shell = DesktopShell::new(
//!     ShellConfig::default(),
//!     Vec::new(),
//!     DeviceProfile::desktop(Size::new(1920.0, 1080.0)),
//!     Rc::new(ManualClock::new()),
//! )
//! .unwrap();
//!
//! let window = shell.open_window(WindowConfig::titled("About Me")).unwrap();
//! shell.flush();
//! assert!(window.is_active());
//! assert_eq!(shell.tabs().tabs().len(), 1);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Single-threaded**: shared state is `Rc<RefCell<_>>`, never borrowed across an emit
//! 2. **Time Abstraction**: animations read an injectable [`Clock`]
//! 3. **Explicit deferral**: the host drains the [`MicrotaskQueue`] or installs a waker

pub mod bus;
pub mod config;
pub mod error;
pub mod launcher;
pub mod math;
pub mod shell;
pub mod taskbar;
pub mod transition;
pub mod types;
pub mod window;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

pub use bus::{Emitter, EventKind, MicrotaskQueue, SafeSubscription, Subscription, WindowEvent};
pub use config::{AnimationConfig, CascadeConfig, ShellConfig};
pub use error::{ShellError, ShellResult};
pub use launcher::{AppEntry, AppManager, LaunchOutcome};
pub use math::{Rect, Size, Vec2};
pub use shell::{DesktopShell, Launched};
pub use taskbar::{ButtonGeometry, ButtonRegistry, ButtonSlot, TabView, WindowTabs};
pub use transition::{AnimationFrame, Clock, DeviceProfile, Easing, ManualClock, MinimizeAnimator};
pub use types::{Focus, WindowId, WindowRecord};
pub use window::{
    AppWindow, Cascade, WindowConfig, WindowContext, WindowController, WindowPhase, WindowRegistry,
};

/// Duration of the minimize/restore animation in milliseconds
pub use config::MINIMIZE_DURATION_MS;

/// Viewport width at or below which animations are skipped
pub use config::COMPACT_BREAKPOINT_PX;
