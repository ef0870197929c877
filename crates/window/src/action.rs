//! Window actions a gesture can trigger.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of window action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAction {
    /// Send the window to the Dock.
    Minimize,
    /// Bring a minimized window back.
    Unminimize,
    /// Press the close button.
    Close,
    /// Enter or leave full screen.
    ToggleFullScreen,
    /// Leave full screen; no effect on a windowed window.
    Restore,
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimize => "minimize",
            Self::Unminimize => "unminimize",
            Self::Close => "close",
            Self::ToggleFullScreen => "toggle full screen",
            Self::Restore => "restore",
        };
        f.write_str(name)
    }
}
