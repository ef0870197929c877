//! Recognition thresholds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GestureConfigError, GestureConfigResult};

/// Thresholds for classifying and acting on gestures.
///
/// Distances and y deltas are in normalized trackpad units (0..1); scales are
/// ratios of the current finger distance to the distance at gesture start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Scale above which a pinch-open toggles full screen.
    pub pinch_open: f64,
    /// Scale below which a pinch-close restores the window.
    pub pinch_close: f64,
    /// Downward travel that minimizes.
    pub swipe_down: f64,
    /// Upward travel that restores or closes.
    pub swipe_up: f64,
    /// Scale deviation from 1.0 that makes a gesture pinch-dominant.
    pub scale_deviation: f64,
    /// Vertical travel that makes a gesture swipe-dominant.
    pub y_delta: f64,
    /// Smallest finger distance that may start a gesture.
    pub min_start_distance: f64,
    /// Largest finger distance that may start a gesture.
    pub max_start_distance: f64,
    /// How long an upward swipe must last before it closes a window.
    pub close_window_hold_ms: u64,
    /// Pointer distance, in points, from a minimize that still restores it.
    pub restore_proximity: f64,
    /// Vertical travel shown as a swipe in live feedback.
    pub hint_y_delta: f64,
    /// Scale deviation shown as a pinch in live feedback.
    pub hint_scale_deviation: f64,
    /// Finger distance change reported as a scale update.
    pub jitter_distance: f64,
    /// Vertical change reported as a scale update.
    pub jitter_y: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pinch_open: 1.5,
            pinch_close: 0.5,
            swipe_down: 0.18,
            swipe_up: 0.15,
            scale_deviation: 0.25,
            y_delta: 0.10,
            min_start_distance: 0.05,
            max_start_distance: 0.85,
            close_window_hold_ms: 1000,
            restore_proximity: 150.0,
            hint_y_delta: 0.02,
            hint_scale_deviation: 0.05,
            jitter_distance: 0.002,
            jitter_y: 0.01,
        }
    }
}

impl GestureThresholds {
    /// Hold time before an upward swipe closes a window.
    #[must_use]
    pub fn close_window_hold(&self) -> Duration {
        Duration::from_millis(self.close_window_hold_ms)
    }

    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first field that is out of range.
    pub fn validate(&self) -> GestureConfigResult<()> {
        require(
            "pinch_open",
            self.pinch_open,
            self.pinch_open > 1.0,
            "greater than 1.0",
        )?;
        require(
            "pinch_close",
            self.pinch_close,
            self.pinch_close > 0.0 && self.pinch_close < 1.0,
            "between 0.0 and 1.0 exclusive",
        )?;
        for (field, value) in [
            ("swipe_down", self.swipe_down),
            ("swipe_up", self.swipe_up),
            ("scale_deviation", self.scale_deviation),
            ("y_delta", self.y_delta),
            ("hint_y_delta", self.hint_y_delta),
            ("hint_scale_deviation", self.hint_scale_deviation),
        ] {
            require(field, value, value > 0.0 && value <= 1.0, "in (0.0, 1.0]")?;
        }
        for (field, value) in [
            ("min_start_distance", self.min_start_distance),
            ("jitter_distance", self.jitter_distance),
            ("jitter_y", self.jitter_y),
        ] {
            require(field, value, (0.0..=1.0).contains(&value), "in [0.0, 1.0]")?;
        }
        require(
            "max_start_distance",
            self.max_start_distance,
            self.max_start_distance > 0.0 && self.max_start_distance <= 2.0_f64.sqrt(),
            "in (0.0, 1.414]",
        )?;
        if self.min_start_distance >= self.max_start_distance {
            return Err(GestureConfigError::InvalidStartDistance {
                min: self.min_start_distance,
                max: self.max_start_distance,
            });
        }
        require(
            "restore_proximity",
            self.restore_proximity,
            self.restore_proximity >= 0.0,
            "non-negative",
        )?;
        if self.close_window_hold_ms == 0 {
            return Err(GestureConfigError::OutOfRange {
                field: "close_window_hold_ms",
                value: 0.0,
                expected: "at least 1",
            });
        }
        Ok(())
    }
}

fn require(
    field: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> GestureConfigResult<()> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(GestureConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GestureThresholds::default().validate(), Ok(()));
        assert_eq!(
            GestureThresholds::default().close_window_hold(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_pinch_bounds() {
        let open = GestureThresholds {
            pinch_open: 0.9,
            ..Default::default()
        };
        assert!(matches!(
            open.validate(),
            Err(GestureConfigError::OutOfRange {
                field: "pinch_open",
                ..
            })
        ));

        let close = GestureThresholds {
            pinch_close: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            close.validate(),
            Err(GestureConfigError::OutOfRange {
                field: "pinch_close",
                ..
            })
        ));
    }

    #[test]
    fn test_start_distance_order() {
        let thresholds = GestureThresholds {
            min_start_distance: 0.5,
            max_start_distance: 0.4,
            ..Default::default()
        };
        assert_eq!(
            thresholds.validate(),
            Err(GestureConfigError::InvalidStartDistance { min: 0.5, max: 0.4 })
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let thresholds = GestureThresholds {
            swipe_up: f64::NAN,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_zero_hold_is_rejected() {
        let thresholds = GestureThresholds {
            close_window_hold_ms: 0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let thresholds: GestureThresholds = serde_yaml::from_str("pinch_open: 1.8\nswipe_up: 0.2\n")?;
        assert_eq!(thresholds.pinch_open, 1.8);
        assert_eq!(thresholds.swipe_up, 0.2);
        assert_eq!(thresholds.swipe_down, 0.18);
        assert_eq!(thresholds.validate(), Ok(()));
        Ok(())
    }
}
