//! Animation and transition systems
//!
//! Time-driven and non-blocking: callers start an animation and the host
//! calls [`MinimizeAnimator::tick`] once per frame to get the ghost frames
//! to draw.

mod animator;
mod clock;
pub mod easing;
mod timeline;

pub use animator::{AnimationEntry, AnimationFrame, DeviceProfile, GhostFrame, MinimizeAnimator};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::MonotonicClock;
pub use clock::{Clock, ManualClock};
pub use easing::Easing;
pub use timeline::{PlayDirection, Timeline, TimelineStatus};
