//! Convenience re-exports for window backends and their users.

pub use crate::action::WindowAction;
pub use crate::environment::WindowEnvironment;
pub use crate::error::{WindowError, WindowResult};
pub use crate::geometry::{Point, Rect, Size};
pub use crate::rules::WindowSnapshot;
