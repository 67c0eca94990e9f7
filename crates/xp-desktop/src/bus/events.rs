use crate::types::{Focus, WindowId, WindowRecord};

/// Event names a listener can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Removed,
    VisibilityChanged,
    Minimized,
    Restored,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Added,
        EventKind::Removed,
        EventKind::VisibilityChanged,
        EventKind::Minimized,
        EventKind::Restored,
    ];
}

/// Payload carried by the bus, one variant per event kind
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// A window mounted and published its record
    Added(WindowRecord),
    /// A window closed
    Removed { id: WindowId },
    /// The focused window changed (`None` = nothing focused)
    VisibilityChanged { id: Focus },
    /// A window's body was hidden
    Minimized { id: WindowId },
    /// A window's body was shown again
    Restored { id: WindowId },
}

impl WindowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WindowEvent::Added(_) => EventKind::Added,
            WindowEvent::Removed { .. } => EventKind::Removed,
            WindowEvent::VisibilityChanged { .. } => EventKind::VisibilityChanged,
            WindowEvent::Minimized { .. } => EventKind::Minimized,
            WindowEvent::Restored { .. } => EventKind::Restored,
        }
    }

    /// The window this event is about, if any
    pub fn window_id(&self) -> Option<&WindowId> {
        match self {
            WindowEvent::Added(record) => Some(&record.id),
            WindowEvent::Removed { id }
            | WindowEvent::Minimized { id }
            | WindowEvent::Restored { id } => Some(id),
            WindowEvent::VisibilityChanged { id } => id.as_ref(),
        }
    }
}
