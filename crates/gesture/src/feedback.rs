//! Live gesture feedback.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swishmini_window::{Point, Rect};

/// Lifecycle phase of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Two fingers came down on a valid region.
    Began,
    /// The fingers moved.
    Changed,
    /// The fingers lifted. An abandoned close is reported here too, with
    /// [`GestureCandidate::Cancelled`].
    Ended,
}

/// Gesture the current motion is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureCandidate {
    /// Motion too small to tell.
    None,
    /// Fingers spreading.
    PinchOpen,
    /// Fingers closing.
    PinchClose,
    /// Fingers moving down.
    SwipeDown,
    /// Fingers moving up.
    SwipeUp,
    /// Fingers moving up over a windowed window, held towards closing it.
    CloseWindow,
    /// A close was hinted but nothing will happen.
    Cancelled,
}

impl GestureCandidate {
    /// What lifting the fingers now would do.
    #[must_use]
    pub fn action_description(self) -> &'static str {
        match self {
            Self::None => "Two-finger gesture",
            Self::PinchOpen => "Full screen",
            Self::PinchClose => "Restore",
            Self::SwipeDown => "Minimize",
            Self::SwipeUp => "Unminimize",
            Self::CloseWindow => "Close window",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for GestureCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::PinchOpen => "pinch open",
            Self::PinchClose => "pinch close",
            Self::SwipeDown => "swipe down",
            Self::SwipeUp => "swipe up",
            Self::CloseWindow => "close window",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A recognised title-bar gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleBarGesture {
    /// Toggle full screen.
    PinchOpen,
    /// Leave full screen.
    PinchClose,
    /// Minimize.
    SwipeDown,
    /// Close, or restore the last minimized window.
    SwipeUp,
}

impl fmt::Display for TitleBarGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PinchOpen => "pinch open",
            Self::PinchClose => "pinch close",
            Self::SwipeDown => "swipe down",
            Self::SwipeUp => "swipe up",
        };
        f.write_str(name)
    }
}

/// Snapshot of a gesture in progress, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureFeedback {
    /// Lifecycle phase.
    pub phase: GesturePhase,
    /// Likely outcome.
    pub candidate: GestureCandidate,
    /// Progress towards the outcome, in `[0, 1]`.
    pub progress: f64,
    /// Finger distance relative to the start; 1.0 initially.
    pub scale: f64,
    /// Vertical travel since the start; positive is up.
    pub y_delta: f64,
    /// Time since the gesture began.
    pub duration: Duration,
    /// Whether the pointer is on a title bar or the restore hotspot.
    pub in_valid_region: bool,
    /// Pointer location, bottom-left origin.
    pub pointer: Point,
    /// Frame of the window under the pointer, top-left origin.
    pub window_frame: Option<Rect>,
}

impl GestureFeedback {
    /// Build feedback, clamping `progress` to `[0, 1]`.
    #[expect(clippy::too_many_arguments, reason = "plain data constructor")]
    #[must_use]
    pub fn new(
        phase: GesturePhase,
        candidate: GestureCandidate,
        progress: f64,
        scale: f64,
        y_delta: f64,
        duration: Duration,
        in_valid_region: bool,
        pointer: Point,
        window_frame: Option<Rect>,
    ) -> Self {
        Self {
            phase,
            candidate,
            progress: if progress.is_nan() {
                0.0
            } else {
                progress.clamp(0.0, 1.0)
            },
            scale,
            y_delta,
            duration,
            in_valid_region,
            pointer,
            window_frame,
        }
    }
}
