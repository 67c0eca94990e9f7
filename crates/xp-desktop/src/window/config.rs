use crate::math::{Size, Vec2};

/// Configuration for mounting a window
#[derive(Clone, Debug, Default)]
pub struct WindowConfig {
    /// Caller-supplied id; a fresh id is generated when `None`
    pub id: Option<String>,
    pub title: String,
    pub icon: Option<String>,
    /// Hide the window from the taskbar
    pub no_button: bool,
    /// Initial position, `None` to let the shell cascade it
    pub position: Option<Vec2>,
    /// Initial size, `None` for the shell default
    pub size: Option<Size>,
}

impl WindowConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
