//! Reversible, paused-by-default animation timeline

/// Direction the timeline is travelling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayDirection {
    Forward,
    Reverse,
}

/// Result of advancing a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    /// Not playing
    Paused,
    /// Still moving
    Running,
    /// Reached the end while playing forward
    Completed,
    /// Reached the start while playing in reverse
    ReverseCompleted,
}

/// Progress in `[0, 1]` driven by elapsed time
///
/// Reversing mid-flight continues from the current progress rather than
/// jumping, so a restore that interrupts a minimize retraces its path.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    duration_ms: f32,
    progress: f32,
    direction: PlayDirection,
    playing: bool,
    last_tick: f64,
}

impl Timeline {
    /// New timeline at progress 0, not playing
    pub fn paused(duration_ms: f32) -> Self {
        Self {
            duration_ms: duration_ms.max(f32::EPSILON),
            progress: 0.0,
            direction: PlayDirection::Forward,
            playing: false,
            last_tick: 0.0,
        }
    }

    pub fn play(&mut self, now: f64) {
        self.start(PlayDirection::Forward, now);
    }

    pub fn reverse(&mut self, now: f64) {
        self.start(PlayDirection::Reverse, now);
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance to `now`
    pub fn tick(&mut self, now: f64) -> TimelineStatus {
        if !self.playing {
            return TimelineStatus::Paused;
        }
        let elapsed = (now - self.last_tick).max(0.0) as f32;
        self.last_tick = now;
        let delta = elapsed / self.duration_ms;

        match self.direction {
            PlayDirection::Forward => {
                self.progress = (self.progress + delta).min(1.0);
                if self.progress >= 1.0 {
                    self.playing = false;
                    return TimelineStatus::Completed;
                }
            }
            PlayDirection::Reverse => {
                self.progress = (self.progress - delta).max(0.0);
                if self.progress <= 0.0 {
                    self.playing = false;
                    return TimelineStatus::ReverseCompleted;
                }
            }
        }
        TimelineStatus::Running
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn start(&mut self, direction: PlayDirection, now: f64) {
        self.direction = direction;
        self.playing = true;
        self.last_tick = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_by_default() {
        let mut timeline = Timeline::paused(300.0);
        assert_eq!(timeline.tick(1000.0), TimelineStatus::Paused);
        assert_eq!(timeline.progress(), 0.0);
    }

    #[test]
    fn test_plays_to_completion() {
        let mut timeline = Timeline::paused(300.0);
        timeline.play(0.0);

        assert_eq!(timeline.tick(150.0), TimelineStatus::Running);
        assert!((timeline.progress() - 0.5).abs() < 0.001);
        assert_eq!(timeline.tick(300.0), TimelineStatus::Completed);
        assert_eq!(timeline.progress(), 1.0);
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_reverse_mid_flight_retraces() {
        let mut timeline = Timeline::paused(300.0);
        timeline.play(0.0);
        timeline.tick(200.0);

        timeline.reverse(200.0);
        assert_eq!(timeline.tick(300.0), TimelineStatus::Running);
        assert!((timeline.progress() - (1.0 / 3.0)).abs() < 0.001);
        assert_eq!(timeline.tick(400.0), TimelineStatus::ReverseCompleted);
        assert_eq!(timeline.progress(), 0.0);
    }

    #[test]
    fn test_reverse_at_start_completes_on_next_tick() {
        let mut timeline = Timeline::paused(300.0);
        timeline.reverse(0.0);
        assert_eq!(timeline.tick(0.0), TimelineStatus::ReverseCompleted);
    }

    #[test]
    fn test_clock_going_backwards_does_not_rewind() {
        let mut timeline = Timeline::paused(100.0);
        timeline.play(50.0);
        assert_eq!(timeline.tick(10.0), TimelineStatus::Running);
        assert_eq!(timeline.progress(), 0.0);
    }
}
