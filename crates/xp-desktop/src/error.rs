//! Error types for the desktop shell
//!
//! Nothing in the window core surfaces errors to the end user. Rejected
//! registrations are logged and returned so the caller can decide, and
//! missing geometry only ever skips an animation.

use crate::types::WindowId;

/// Errors that can occur in window lifecycle operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A window was registered without a resolvable id
    MissingWindowId,

    /// The supplied id is reserved (the "no-id" focus sentinel)
    ReservedWindowId,

    /// A live window already owns this id
    DuplicateWindow(WindowId),

    /// Window with the given ID was not found
    WindowNotFound(WindowId),

    /// No launchable app with the given id
    UnknownApp(String),

    /// An operation was attempted that is not valid in the current state
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// Configuration could not be parsed
    ConfigError(String),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingWindowId => write!(f, "window registered without an id"),
            Self::ReservedWindowId => {
                write!(f, "window id '{}' is reserved", WindowId::NO_ID)
            }
            Self::DuplicateWindow(id) => write!(f, "window already registered: {}", id),
            Self::WindowNotFound(id) => write!(f, "window not found: {}", id),
            Self::UnknownApp(id) => write!(f, "unknown app: {}", id),
            Self::InvalidOperation { op, reason } => {
                write!(f, "invalid operation '{}': {}", op, reason)
            }
            Self::ConfigError(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}

/// Result type alias for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
