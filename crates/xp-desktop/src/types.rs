//! Core type definitions for the desktop shell
//!
//! Window identity and the record every window publishes when it mounts.

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};

/// Unique window identifier
///
/// A non-empty string supplied by the caller or generated at mount time.
/// The focus sentinel [`WindowId::NO_ID`] is never a valid id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WindowId(String);

impl WindowId {
    /// Sentinel used on string boundaries to mean "nothing is focused"
    pub const NO_ID: &'static str = "no-id";

    /// Validate a caller-supplied id
    pub fn parse(raw: &str) -> ShellResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ShellError::MissingWindowId);
        }
        if trimmed == Self::NO_ID {
            return Err(ShellError::ReservedWindowId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Use the supplied id if there is one, otherwise generate one
    pub fn resolve(raw: Option<&str>) -> ShellResult<Self> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::generate()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WindowId {
    type Error = ShellError;

    fn try_from(value: String) -> ShellResult<Self> {
        Self::parse(&value)
    }
}

impl From<WindowId> for String {
    fn from(id: WindowId) -> String {
        id.0
    }
}

/// Focus target: `None` means no window is focused
pub type Focus = Option<WindowId>;

/// Convert a focus target from its string form (`"no-id"` or empty is `None`)
pub fn focus_from_str(raw: &str) -> ShellResult<Focus> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == WindowId::NO_ID {
        return Ok(None);
    }
    WindowId::parse(trimmed).map(Some)
}

/// Convert a focus target to its string form
pub fn focus_to_str(focus: &Focus) -> &str {
    match focus {
        Some(id) => id.as_str(),
        None => WindowId::NO_ID,
    }
}

/// What a window publishes about itself when it mounts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    /// Opaque icon source (asset path), rendered by the host
    pub icon: Option<String>,
    /// Whether the window gets a taskbar tab
    pub has_button: bool,
}

impl WindowRecord {
    /// Record for a window with a taskbar tab
    pub fn new(id: WindowId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: None,
            has_button: true,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn without_button(mut self) -> Self {
        self.has_button = false;
        self
    }
}
