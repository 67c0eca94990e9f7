//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Easing curve applied to timeline progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic in-out (the classic "power2.inOut")
    #[default]
    EaseInOutQuad,
    EaseInOutCubic,
    EaseOutCubic,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => linear(t),
            Easing::EaseInOutQuad => ease_in_out_quad(t),
            Easing::EaseInOutCubic => ease_in_out(t),
            Easing::EaseOutCubic => ease_out_cubic(t),
        }
    }
}

/// Ease-in-out quadratic function
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Ease-in-out cubic function
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic function
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation (no easing)
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_quad() {
        assert!((ease_in_out_quad(0.0) - 0.0).abs() < 0.001);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 0.001);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 0.001);
        // Slow start
        assert!(ease_in_out_quad(0.25) < 0.25);
    }

    #[test]
    fn test_ease_in_out() {
        assert!((ease_in_out(0.0) - 0.0).abs() < 0.001);
        assert!((ease_in_out(1.0) - 1.0).abs() < 0.001);
        assert!((ease_in_out(0.5) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_easing_deserializes_from_config_name() {
        let easing: Easing = serde_json::from_str("\"ease_out_cubic\"").unwrap();
        assert_eq!(easing, Easing::EaseOutCubic);
        assert_eq!(Easing::default(), Easing::EaseInOutQuad);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseInOutQuad,
        Easing::EaseInOutCubic,
        Easing::EaseOutCubic,
    ];

    proptest! {
        /// All easing functions should map [0,1] inputs to [0,1] outputs
        #[test]
        fn easing_bounded_output(t in 0.0f32..=1.0) {
            for easing in ALL {
                let result = easing.apply(t);
                prop_assert!(result >= 0.0, "{:?}({}) = {} < 0", easing, t, result);
                prop_assert!(result <= 1.0 + 0.0001, "{:?}({}) = {} > 1", easing, t, result);
            }
        }

        /// All easing functions should be monotonically increasing
        #[test]
        fn easing_monotonic(t1 in 0.0f32..=1.0, t2 in 0.0f32..=1.0) {
            let (t_lo, t_hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            for easing in ALL {
                prop_assert!(
                    easing.apply(t_lo) <= easing.apply(t_hi) + 0.001,
                    "{:?} not monotonic: f({}) > f({})",
                    easing, t_lo, t_hi
                );
            }
        }
    }
}
