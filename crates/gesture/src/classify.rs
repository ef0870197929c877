//! Gesture classification from scale and vertical travel.

use std::time::Duration;

use crate::feedback::GestureCandidate;
use crate::thresholds::GestureThresholds;

const MIN_DENOMINATOR: f64 = 0.0001;

/// Which dominance thresholds apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// Low thresholds for early feedback while fingers move.
    Hint,
    /// Full thresholds for deciding what to do at lift-off.
    Action,
}

/// Candidate and progress towards it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Likely gesture.
    pub candidate: GestureCandidate,
    /// Progress in `[0, 1]`.
    pub progress: f64,
}

impl Classification {
    /// No recognisable motion.
    pub const NONE: Self = Self {
        candidate: GestureCandidate::None,
        progress: 0.0,
    };

    fn new(candidate: GestureCandidate, progress: f64) -> Self {
        Self {
            candidate,
            progress: progress.min(1.0),
        }
    }
}

/// Which axis dominates a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dominance {
    /// Vertical travel dominates.
    pub swipe: bool,
    /// Pinching dominates.
    pub pinch: bool,
}

impl Dominance {
    /// Swipe-dominant when `|y|` passes its threshold and is more than twice
    /// the scale deviation; pinch-dominant when the scale deviation passes
    /// its threshold and the motion is not swipe-dominant.
    #[must_use]
    pub fn of(scale: f64, y_delta: f64, y_threshold: f64, scale_threshold: f64) -> Self {
        let abs_y = y_delta.abs();
        let deviation = (scale - 1.0).abs();
        let swipe = abs_y > y_threshold && abs_y > deviation * 2.0;
        let pinch = deviation > scale_threshold && !swipe;
        Self { swipe, pinch }
    }
}

/// Progress of an upward swipe towards its action threshold.
#[must_use]
pub fn swipe_up_progress(thresholds: &GestureThresholds, y_delta: f64) -> f64 {
    (y_delta.abs() / thresholds.swipe_up.max(MIN_DENOMINATOR)).min(1.0)
}

/// Classify a motion.
///
/// An upward swipe over a window that is not full screen becomes
/// [`GestureCandidate::CloseWindow`], with progress driven by how long the
/// gesture has been held rather than by distance.
#[must_use]
pub fn classify(
    thresholds: &GestureThresholds,
    scale: f64,
    y_delta: f64,
    mode: ThresholdMode,
    window_full_screen: bool,
    duration: Duration,
) -> Classification {
    let (y_threshold, scale_threshold) = match mode {
        ThresholdMode::Hint => (thresholds.hint_y_delta, thresholds.hint_scale_deviation),
        ThresholdMode::Action => (thresholds.y_delta, thresholds.scale_deviation),
    };
    let dominance = Dominance::of(scale, y_delta, y_threshold, scale_threshold);

    if dominance.swipe {
        if y_delta < 0.0 {
            let denom = thresholds.swipe_down.max(MIN_DENOMINATOR);
            return Classification::new(GestureCandidate::SwipeDown, y_delta.abs() / denom);
        }
        if !window_full_screen {
            let hold = thresholds.close_window_hold().as_secs_f64().max(MIN_DENOMINATOR);
            return Classification::new(
                GestureCandidate::CloseWindow,
                duration.as_secs_f64() / hold,
            );
        }
        return Classification::new(
            GestureCandidate::SwipeUp,
            swipe_up_progress(thresholds, y_delta),
        );
    }

    if dominance.pinch {
        if scale >= 1.0 {
            let denom = (thresholds.pinch_open - 1.0).max(MIN_DENOMINATOR);
            return Classification::new(GestureCandidate::PinchOpen, (scale - 1.0) / denom);
        }
        let denom = (1.0 - thresholds.pinch_close).max(MIN_DENOMINATOR);
        return Classification::new(GestureCandidate::PinchClose, (1.0 - scale) / denom);
    }

    Classification::NONE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(scale: f64, y: f64, full_screen: bool, secs: f64) -> Classification {
        classify(
            &GestureThresholds::default(),
            scale,
            y,
            ThresholdMode::Action,
            full_screen,
            Duration::from_secs_f64(secs),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_swipe_down_progress() {
        let c = action(1.0, -0.09, true, 0.0);
        assert_eq!(c.candidate, GestureCandidate::None);

        let c = action(1.0, -0.12, true, 0.0);
        assert_eq!(c.candidate, GestureCandidate::SwipeDown);
        assert_close(c.progress, 0.12 / 0.18);

        assert_eq!(action(1.0, -0.5, true, 0.0).progress, 1.0);
    }

    #[test]
    fn test_swipe_up_depends_on_full_screen() {
        let c = action(1.0, 0.12, true, 0.5);
        assert_eq!(c.candidate, GestureCandidate::SwipeUp);
        assert_close(c.progress, 0.8);

        let c = action(1.0, 0.12, false, 0.5);
        assert_eq!(c.candidate, GestureCandidate::CloseWindow);
        assert_close(c.progress, 0.5);

        assert_eq!(action(1.0, 0.12, false, 3.0).progress, 1.0);
    }

    #[test]
    fn test_pinch_classification() {
        let c = action(1.3, 0.0, true, 0.0);
        assert_eq!(c.candidate, GestureCandidate::PinchOpen);
        assert_close(c.progress, 0.6);

        let c = action(0.7, 0.0, true, 0.0);
        assert_eq!(c.candidate, GestureCandidate::PinchClose);
        assert_close(c.progress, 0.6);

        assert_eq!(action(1.2, 0.0, true, 0.0), Classification::NONE);
    }

    #[test]
    fn test_swipe_beats_pinch_only_when_twice_as_large() {
        // |y| = 0.5 > 2 * 0.2
        assert_eq!(action(1.2, -0.5, true, 0.0).candidate, GestureCandidate::SwipeDown);
        // |y| = 0.5 < 2 * 0.3, so the pinch wins.
        assert_eq!(action(1.3, -0.5, true, 0.0).candidate, GestureCandidate::PinchOpen);
    }

    #[test]
    fn test_hint_mode_reacts_earlier() {
        let thresholds = GestureThresholds::default();
        let hint = classify(
            &thresholds,
            1.0,
            -0.03,
            ThresholdMode::Hint,
            true,
            Duration::ZERO,
        );
        assert_eq!(hint.candidate, GestureCandidate::SwipeDown);

        let hint = classify(
            &thresholds,
            1.06,
            0.0,
            ThresholdMode::Hint,
            true,
            Duration::ZERO,
        );
        assert_eq!(hint.candidate, GestureCandidate::PinchOpen);
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn prop_progress_in_unit_interval(
            scale in 0.0f64..3.0,
            y in -1.0f64..1.0,
            full_screen in any::<bool>(),
            secs in 0.0f64..5.0,
            hint in any::<bool>(),
        ) {
            let mode = if hint { ThresholdMode::Hint } else { ThresholdMode::Action };
            let c = classify(
                &GestureThresholds::default(),
                scale,
                y,
                mode,
                full_screen,
                Duration::from_secs_f64(secs),
            );
            prop_assert!((0.0..=1.0).contains(&c.progress));
        }

        #[test]
        fn prop_dominance_is_exclusive(scale in 0.0f64..3.0, y in -1.0f64..1.0) {
            let d = Dominance::of(scale, y, 0.10, 0.25);
            prop_assert!(!(d.swipe && d.pinch));
        }

        #[test]
        fn prop_downward_swipe_never_closes(
            y in -1.0f64..-0.11,
            secs in 0.0f64..5.0,
        ) {
            let c = classify(
                &GestureThresholds::default(),
                1.0,
                y,
                ThresholdMode::Action,
                false,
                Duration::from_secs_f64(secs),
            );
            prop_assert_eq!(c.candidate, GestureCandidate::SwipeDown);
        }
    }
}
