//! Two-finger title-bar gestures over multitouch contact frames.
//!
//! Feed each contact frame to a [`GestureDetector`]. While the pointer rests
//! on a window's title bar it tracks one pair of fingers and, when they
//! lift, turns the motion into a window action:
//!
//! | Gesture | Action |
//! |---------|--------|
//! | Pinch open | Toggle full screen |
//! | Pinch close | Leave full screen |
//! | Swipe down | Minimize, remembering where |
//! | Swipe up near that spot | Un-minimize it |
//! | Swipe up held over a windowed window | Close it |
//!
//! Every frame also yields [`GestureFeedback`] suitable for an overlay.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//!
//! use swishmini_gesture::{GestureDetector, GestureThresholds};
//! use swishmini_multitouch_abi::MtTouch;
//! use swishmini_window::Rect;
//! use swishmini_window::mock::{MockEnvironment, MockWindow};
//!
//! let mut env = MockEnvironment::new(1440.0, 900.0)
//!     .with_window(MockWindow::new(1, Rect::new(100.0, 100.0, 600.0, 400.0)));
//! env.point_at_title_bar(1);
//!
//! let mut detector = GestureDetector::new(env, GestureThresholds::default())?;
//! let now = Instant::now();
//! detector.process_frame(
//!     &[MtTouch::with_contact(1, 4, 0.4, 0.5), MtTouch::with_contact(2, 4, 0.6, 0.5)],
//!     now,
//! );
//! assert!(detector.is_active());
//! # Ok::<(), swishmini_gesture::GestureConfigError>(())
//! ```

#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod classify;
pub mod contact;
pub mod detector;
pub mod error;
pub mod feedback;
pub mod prelude;
pub mod thresholds;

pub use classify::{Classification, Dominance, ThresholdMode, classify};
pub use contact::{ContactPoint, active_points, find_closest_valid_pair};
pub use detector::{FrameOutcome, GestureDetector, MinimizedWindowRecord};
pub use error::{GestureConfigError, GestureConfigResult};
pub use feedback::{GestureCandidate, GestureFeedback, GesturePhase, TitleBarGesture};
pub use thresholds::GestureThresholds;
