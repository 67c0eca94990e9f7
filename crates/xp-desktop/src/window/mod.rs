//! Window management module
//!
//! Provides the window lifecycle façade, the registry projection and the
//! self-registering window component.

mod cascade;
mod config;
mod controller;
mod frame;
mod registry;
#[allow(clippy::module_inception)]
mod window;

pub use cascade::Cascade;
pub use config::WindowConfig;
pub use controller::WindowController;
pub use frame::WindowFrame;
pub use registry::{RegistryState, WindowRegistry};
pub use window::{AppWindow, WindowContext, WindowPhase};

pub use crate::types::WindowId;
