//! Window geometry and actions for title-bar gestures.
//!
//! Gestures only count when the pointer rests on a window's title bar, and
//! their effect lands on the window under the pointer. This crate holds the
//! rules for both:
//! - Rectangle math and the conversion between top-left and bottom-left
//!   screen origins
//! - Front-most window selection from an on-screen window list
//! - Title-bar hit testing, including the top screen edge of full-screen
//!   windows
//! - Visual full-screen detection for apps that do not report it
//! - [`WindowEnvironment`], the seam between gesture logic and a platform
//!   window backend, plus a scripted [`mock::MockEnvironment`]

#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod action;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod mock;
pub mod prelude;
pub mod rules;

pub use action::WindowAction;
pub use environment::WindowEnvironment;
pub use error::{WindowError, WindowResult};
pub use geometry::{Point, Rect, Size};
pub use rules::{
    WindowSnapshot, is_chrome_bundle, is_point_on_title_bar, is_visually_full_screen,
    select_window_at,
};
