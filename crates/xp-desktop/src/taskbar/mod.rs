//! Taskbar window tabs and the button geometry table
//!
//! The taskbar owns no truth about windows: its tab list is a projection
//! rebuilt from bus events, and its button table only feeds the animator.

mod buttons;
mod tabs;

pub use buttons::{ButtonGeometry, ButtonRegistry, ButtonSlot};
pub use tabs::{TabView, WindowTabs};
