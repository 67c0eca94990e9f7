//! Window event bus
//!
//! A constructible publish/subscribe object shared by cheap clones. Every
//! component that takes part in window coordination holds a clone of the
//! same [`Emitter`]; none of them hold references to each other.
//!
//! [`SafeSubscription`] layers deferred delivery on top of the bus, using
//! the explicit [`MicrotaskQueue`].

mod emitter;
mod events;
mod microtask;
mod safe;

pub use emitter::{Emitter, Subscription, SubscriptionId};
pub use events::{EventKind, WindowEvent};
pub use microtask::{MicrotaskQueue, WeakMicrotaskQueue};
pub use safe::SafeSubscription;
