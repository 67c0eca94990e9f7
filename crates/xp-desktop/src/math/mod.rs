//! Core geometry types for the desktop shell
//!
//! Screen-space positions, sizes and rectangles shared by window frames,
//! taskbar buttons and the minimize animator.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
