//! Window error types.

use thiserror::Error;

use crate::action::WindowAction;

/// Error type for window operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The window no longer exists.
    #[error("Window {0} is gone")]
    WindowGone(String),

    /// The backend refused an action.
    #[error("Failed to {action} window {window}: {reason}")]
    ActionFailed {
        /// Attempted action.
        action: WindowAction,
        /// Window description.
        window: String,
        /// Backend message.
        reason: String,
    },
}

/// Result alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;
