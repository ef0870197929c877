//! Convenience re-exports for running the detector.

pub use crate::detector::{FrameOutcome, GestureDetector};
pub use crate::feedback::{GestureCandidate, GestureFeedback, GesturePhase, TitleBarGesture};
pub use crate::thresholds::GestureThresholds;
