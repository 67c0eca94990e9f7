use crate::config::CascadeConfig;
use crate::math::{Size, Vec2};

/// Staggered placement for newly opened windows
///
/// Each new window is offset diagonally from the previous one. After
/// `max_windows` placements the cascade starts over at the base position.
/// Positions are pulled back inside the viewport when the default window
/// size would overflow it.
#[derive(Clone, Debug)]
pub struct Cascade {
    config: CascadeConfig,
    counter: u32,
}

impl Cascade {
    pub fn new(config: CascadeConfig) -> Self {
        Self { config, counter: 0 }
    }

    /// Position for the next window
    pub fn next_position(&mut self, viewport: Size) -> Vec2 {
        let step = self.counter as f32 * self.config.offset;
        let position = self.config.base + Vec2::new(step, step);

        self.counter += 1;
        if self.counter >= self.config.max_windows {
            self.counter = 0;
        }

        self.clamp_to_viewport(position, viewport)
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    fn clamp_to_viewport(&self, mut position: Vec2, viewport: Size) -> Vec2 {
        let size = self.config.default_size;
        if position.x + size.width > viewport.width {
            position.x = (viewport.width - size.width - self.config.right_margin).max(0.0);
        }
        if position.y + size.height > viewport.height {
            position.y = (viewport.height - size.height - self.config.bottom_margin).max(0.0);
        }
        position
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(CascadeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: Size = Size::new(1920.0, 1080.0);

    #[test]
    fn test_positions_step_diagonally() {
        let mut cascade = Cascade::default();
        assert_eq!(cascade.next_position(DESKTOP), Vec2::new(120.0, 50.0));
        assert_eq!(cascade.next_position(DESKTOP), Vec2::new(135.0, 65.0));
        assert_eq!(cascade.next_position(DESKTOP), Vec2::new(150.0, 80.0));
    }

    #[test]
    fn test_wraps_after_max_windows() {
        let mut cascade = Cascade::default();
        for _ in 0..10 {
            cascade.next_position(DESKTOP);
        }
        assert_eq!(cascade.counter(), 0);
        assert_eq!(cascade.next_position(DESKTOP), Vec2::new(120.0, 50.0));
    }

    #[test]
    fn test_clamps_to_small_viewport() {
        let mut cascade = Cascade::default();
        let position = cascade.next_position(Size::new(640.0, 480.0));
        assert_eq!(position, Vec2::new(20.0, 50.0));

        let position = cascade.next_position(Size::new(300.0, 300.0));
        assert_eq!(position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut cascade = Cascade::default();
        cascade.next_position(DESKTOP);
        cascade.reset();
        assert_eq!(cascade.next_position(DESKTOP), Vec2::new(120.0, 50.0));
    }
}
