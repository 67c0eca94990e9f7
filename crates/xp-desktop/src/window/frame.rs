use crate::math::{Rect, Size, Vec2};

/// Local geometry of one window
///
/// The window sits at `position` and is moved by dragging, which applies a
/// translate `offset` on top. Maximizing is purely local: it clears the
/// offset and fills the viewport, and un-maximizing puts back exactly the
/// offset that was in effect before.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowFrame {
    position: Vec2,
    offset: Vec2,
    size: Size,
    maximized: bool,
    pre_maximize_offset: Option<Vec2>,
}

impl WindowFrame {
    pub fn new(position: Vec2, size: Size) -> Self {
        Self {
            position,
            offset: Vec2::ZERO,
            size,
            maximized: false,
            pre_maximize_offset: None,
        }
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Apply a drag translate. Ignored while maximized.
    pub fn drag_to(&mut self, offset: Vec2) -> bool {
        if self.maximized {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Flip between maximized and normal size. Returns the new state.
    pub fn toggle_maximize(&mut self) -> bool {
        if self.maximized {
            self.offset = self.pre_maximize_offset.take().unwrap_or(Vec2::ZERO);
            self.maximized = false;
        } else {
            self.pre_maximize_offset = Some(self.offset);
            self.offset = Vec2::ZERO;
            self.maximized = true;
        }
        self.maximized
    }

    /// On-screen rectangle for a given viewport
    pub fn rect(&self, viewport: Size) -> Rect {
        if self.maximized {
            Rect::from_pos_size(Vec2::ZERO, viewport)
        } else {
            Rect::from_pos_size(self.position + self.offset, self.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximize_restores_exact_offset() {
        let mut frame = WindowFrame::new(Vec2::new(120.0, 50.0), Size::new(600.0, 400.0));
        frame.drag_to(Vec2::new(275.0, -9.0));

        assert!(frame.toggle_maximize());
        assert_eq!(frame.offset(), Vec2::ZERO);
        assert_eq!(
            frame.rect(Size::new(1280.0, 720.0)),
            Rect::new(0.0, 0.0, 1280.0, 720.0)
        );

        assert!(!frame.toggle_maximize());
        assert_eq!(frame.offset(), Vec2::new(275.0, -9.0));
        assert_eq!(
            frame.rect(Size::new(1280.0, 720.0)),
            Rect::new(395.0, 41.0, 600.0, 400.0)
        );
    }

    #[test]
    fn test_drag_ignored_while_maximized() {
        let mut frame = WindowFrame::new(Vec2::ZERO, Size::new(100.0, 100.0));
        frame.toggle_maximize();
        assert!(!frame.drag_to(Vec2::new(10.0, 10.0)));
        frame.toggle_maximize();
        assert_eq!(frame.offset(), Vec2::ZERO);
    }
}
