//! Window environment abstraction.

use std::fmt::Debug;

use crate::error::WindowResult;
use crate::geometry::{Point, Rect};
use crate::rules;

/// Queries and actions against the windows on screen.
///
/// Pointer locations use a bottom-left origin; window frames use a top-left
/// origin, matching what the window server and accessibility report.
pub trait WindowEnvironment {
    /// Reference to a window. Held across gestures to restore minimized
    /// windows, so it must stay meaningful after the window leaves the screen.
    type Window: Clone + Debug;

    /// Current pointer location.
    fn pointer_location(&self) -> Point;

    /// Height of the main screen, for origin conversion.
    fn main_screen_height(&self) -> f64;

    /// Front-most window under `point` and its frame.
    fn window_under(&self, point: Point) -> Option<(Self::Window, Rect)>;

    /// Whether `window` is full screen, natively or visually.
    fn is_full_screen(&self, window: &Self::Window) -> bool;

    /// Whether `window` belongs to Chrome.
    fn is_chrome(&self, window: &Self::Window) -> bool;

    /// Minimize `window`.
    fn minimize(&mut self, window: &Self::Window) -> WindowResult<()>;

    /// Un-minimize `window`.
    fn unminimize(&mut self, window: &Self::Window) -> WindowResult<()>;

    /// Close `window`.
    fn close(&mut self, window: &Self::Window) -> WindowResult<()>;

    /// Enter or leave full screen.
    fn toggle_full_screen(&mut self, window: &Self::Window) -> WindowResult<()>;

    /// Whether `point` is on the title bar of the window under it.
    fn is_point_on_title_bar(&self, point: Point) -> bool {
        let under = self
            .window_under(point)
            .map(|(window, frame)| (frame, self.is_full_screen(&window)));
        rules::is_point_on_title_bar(point, self.main_screen_height(), under)
    }

    /// Leave full screen. Returns `false` without acting when `window` is
    /// not full screen.
    fn restore(&mut self, window: &Self::Window) -> WindowResult<bool> {
        if !self.is_full_screen(window) {
            tracing::debug!(?window, "Window not full screen, ignoring restore");
            return Ok(false);
        }
        self.toggle_full_screen(window)?;
        Ok(true)
    }
}
