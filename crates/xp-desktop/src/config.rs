//! Shell configuration
//!
//! Every field has a default, so a host can pass a partial JSON document
//! (or nothing at all) and override only what it cares about.

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};
use crate::math::{Size, Vec2};
use crate::transition::Easing;

/// Duration of the minimize/restore animation in milliseconds
pub const MINIMIZE_DURATION_MS: f32 = 300.0;

/// Scale the window ghost shrinks to when it reaches the taskbar
pub const MINIMIZE_END_SCALE: f32 = 0.1;

/// Viewport width at or below which animations are skipped
pub const COMPACT_BREAKPOINT_PX: f32 = 768.0;

/// Minimize/restore animation tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: f32,
    pub end_scale: f32,
    pub end_opacity: f32,
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: MINIMIZE_DURATION_MS,
            end_scale: MINIMIZE_END_SCALE,
            end_opacity: 0.0,
            easing: Easing::EaseInOutQuad,
        }
    }
}

/// Staggered placement of newly opened windows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Position of the first window in a cascade
    pub base: Vec2,
    /// Step between consecutive windows on both axes
    pub offset: f32,
    /// Number of windows after which the cascade starts over
    pub max_windows: u32,
    /// Size assumed when clamping a position to the viewport
    pub default_size: Size,
    /// Gap kept to the right edge when clamping
    pub right_margin: f32,
    /// Gap kept to the bottom edge when clamping (room for the taskbar)
    pub bottom_margin: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            base: Vec2::new(120.0, 50.0),
            offset: 15.0,
            max_windows: 10,
            default_size: Size::new(600.0, 400.0),
            right_margin: 20.0,
            bottom_margin: 100.0,
        }
    }
}

/// Top-level shell configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub animation: AnimationConfig,
    pub cascade: CascadeConfig,
    pub compact_breakpoint_px: f32,
    /// Default size of a window opened without an explicit size
    pub window_size: Size,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            cascade: CascadeConfig::default(),
            compact_breakpoint_px: COMPACT_BREAKPOINT_PX,
            window_size: Size::new(600.0, 600.0),
        }
    }
}

impl ShellConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> ShellResult<Self> {
        let config: ShellConfig =
            serde_json::from_str(json).map_err(|e| ShellError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animator and cascade cannot work with
    pub fn validate(&self) -> ShellResult<()> {
        if !(self.animation.duration_ms > 0.0) {
            return Err(ShellError::ConfigError(
                "animation.duration_ms must be positive".to_string(),
            ));
        }
        if self.cascade.max_windows == 0 {
            return Err(ShellError::ConfigError(
                "cascade.max_windows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.animation.duration_ms, 300.0);
        assert_eq!(config.cascade.max_windows, 10);
        assert_eq!(config.compact_breakpoint_px, 768.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ShellConfig::from_json(
            r#"{"animation": {"duration_ms": 150, "easing": "linear"}}"#,
        )
        .unwrap();
        assert_eq!(config.animation.duration_ms, 150.0);
        assert_eq!(config.animation.easing, Easing::Linear);
        assert_eq!(config.animation.end_scale, MINIMIZE_END_SCALE);
        assert_eq!(config.cascade, CascadeConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = ShellConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ShellError::ConfigError(_)));
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let err = ShellConfig::from_json(r#"{"animation": {"duration_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ShellError::ConfigError(_)));
    }
}
