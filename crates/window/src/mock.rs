//! Scripted window environment.
//!
//! Used by tests and by dry runs: it keeps a front-to-back window list on a
//! set of screens, answers queries with the same rules a real backend uses,
//! and records every action instead of touching real windows.

use std::collections::HashSet;

use crate::action::WindowAction;
use crate::environment::WindowEnvironment;
use crate::error::{WindowError, WindowResult};
use crate::geometry::{Point, Rect};
use crate::rules::{self, TITLE_BAR_HEIGHT, WindowSnapshot};

/// Process id reported for the environment's own windows.
pub const MOCK_SELF_PID: i32 = 1;

/// A window in the mock environment.
#[derive(Debug, Clone, PartialEq)]
pub struct MockWindow {
    /// Identifier, also the window number.
    pub id: u32,
    /// Frame, top-left origin.
    pub frame: Rect,
    /// Native full-screen flag.
    pub full_screen: bool,
    /// Owning application's bundle identifier.
    pub bundle_id: Option<String>,
    /// Whether the window is in the Dock.
    pub minimized: bool,
    /// Owning process.
    pub owner_pid: i32,
    /// Window layer.
    pub layer: i64,
}

impl MockWindow {
    /// Ordinary window of another process.
    #[must_use]
    pub fn new(id: u32, frame: Rect) -> Self {
        Self {
            id,
            frame,
            full_screen: false,
            bundle_id: None,
            minimized: false,
            owner_pid: 100,
            layer: 0,
        }
    }

    /// Mark as natively full screen.
    #[must_use]
    pub fn full_screen(mut self) -> Self {
        self.full_screen = true;
        self
    }

    /// Set the owning bundle identifier.
    #[must_use]
    pub fn bundle_id(mut self, bundle_id: &str) -> Self {
        self.bundle_id = Some(bundle_id.to_string());
        self
    }

    /// Set the owning process.
    #[must_use]
    pub fn owner_pid(mut self, pid: i32) -> Self {
        self.owner_pid = pid;
        self
    }

    fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            number: Some(self.id),
            owner_pid: self.owner_pid,
            layer: self.layer,
            bounds: self.frame,
        }
    }
}

/// Window environment backed by an in-memory window list.
#[derive(Debug, Clone)]
pub struct MockEnvironment {
    pointer: Point,
    screens: Vec<Rect>,
    windows: Vec<MockWindow>,
    actions: Vec<(WindowAction, u32)>,
    failing: HashSet<WindowAction>,
}

impl MockEnvironment {
    /// Environment with a single main screen of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pointer: Point::default(),
            screens: vec![Rect::new(0.0, 0.0, width, height)],
            windows: Vec::new(),
            actions: Vec::new(),
            failing: HashSet::new(),
        }
    }

    /// Add a secondary screen (bottom-left origin).
    #[must_use]
    pub fn with_screen(mut self, screen: Rect) -> Self {
        self.screens.push(screen);
        self
    }

    /// Add a window behind the existing ones.
    #[must_use]
    pub fn with_window(mut self, window: MockWindow) -> Self {
        self.windows.push(window);
        self
    }

    /// Put a window in front of all others.
    pub fn push_front(&mut self, window: MockWindow) {
        self.windows.insert(0, window);
    }

    /// Move the pointer (bottom-left origin).
    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Move the pointer to the middle of a window's title bar.
    ///
    /// Returns `false` when no such window exists.
    pub fn point_at_title_bar(&mut self, id: u32) -> bool {
        let Some(frame) = self.window(id).map(|w| w.frame) else {
            return false;
        };
        let top_left = Point::new(
            frame.min_x() + frame.width() / 2.0,
            frame.min_y() + TITLE_BAR_HEIGHT / 2.0,
        );
        self.pointer = top_left.flip_y(self.main_screen_height());
        true
    }

    /// Make every future `action` fail.
    pub fn fail(&mut self, action: WindowAction) {
        self.failing.insert(action);
    }

    /// Window with the given id.
    #[must_use]
    pub fn window(&self, id: u32) -> Option<&MockWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Actions performed so far, in order.
    #[must_use]
    pub fn actions(&self) -> &[(WindowAction, u32)] {
        &self.actions
    }

    fn perform(
        &mut self,
        action: WindowAction,
        id: u32,
        apply: impl FnOnce(&mut Vec<MockWindow>, usize),
    ) -> WindowResult<()> {
        if self.failing.contains(&action) {
            return Err(WindowError::ActionFailed {
                action,
                window: format!("#{id}"),
                reason: "scripted failure".to_string(),
            });
        }
        let index = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WindowError::WindowGone(format!("#{id}")))?;
        apply(&mut self.windows, index);
        self.actions.push((action, id));
        tracing::info!(%action, window = id, "Window action");
        Ok(())
    }
}

impl WindowEnvironment for MockEnvironment {
    type Window = u32;

    fn pointer_location(&self) -> Point {
        self.pointer
    }

    fn main_screen_height(&self) -> f64 {
        self.screens.first().map_or(0.0, Rect::height)
    }

    fn window_under(&self, point: Point) -> Option<(u32, Rect)> {
        let snapshots: Vec<WindowSnapshot> = self
            .windows
            .iter()
            .filter(|w| !w.minimized)
            .map(MockWindow::snapshot)
            .collect();
        let top_left = point.flip_y(self.main_screen_height());
        rules::select_window_at(top_left, &snapshots, MOCK_SELF_PID)
            .and_then(|s| s.number.map(|id| (id, s.bounds)))
    }

    fn is_full_screen(&self, window: &u32) -> bool {
        let Some(w) = self.window(*window) else {
            return false;
        };
        w.full_screen
            || (rules::is_chrome_bundle(w.bundle_id.as_deref())
                && rules::is_visually_full_screen(
                    &w.frame,
                    &self.screens,
                    self.main_screen_height(),
                ))
    }

    fn is_chrome(&self, window: &u32) -> bool {
        self.window(*window)
            .is_some_and(|w| rules::is_chrome_bundle(w.bundle_id.as_deref()))
    }

    fn minimize(&mut self, window: &u32) -> WindowResult<()> {
        self.perform(WindowAction::Minimize, *window, |windows, i| {
            if let Some(w) = windows.get_mut(i) {
                w.minimized = true;
            }
        })
    }

    fn unminimize(&mut self, window: &u32) -> WindowResult<()> {
        self.perform(WindowAction::Unminimize, *window, |windows, i| {
            if let Some(w) = windows.get_mut(i) {
                w.minimized = false;
            }
        })
    }

    fn close(&mut self, window: &u32) -> WindowResult<()> {
        self.perform(WindowAction::Close, *window, |windows, i| {
            windows.remove(i);
        })
    }

    fn toggle_full_screen(&mut self, window: &u32) -> WindowResult<()> {
        let target = !self.is_full_screen(window);
        self.perform(WindowAction::ToggleFullScreen, *window, |windows, i| {
            if let Some(w) = windows.get_mut(i) {
                w.full_screen = target;
            }
        })
    }
}
