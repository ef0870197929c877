//! Convenience re-exports for driving a session.

pub use crate::backend::MultitouchBackend;
pub use crate::dispatch::ContactFrame;
pub use crate::error::{MultitouchError, MultitouchResult};
pub use crate::framework::MultitouchFramework;
pub use crate::handle::DeviceHandle;
pub use crate::restart::{RestartDebouncer, RestartReason};
pub use crate::session::{MultitouchSession, SessionConfig};

pub use swishmini_multitouch_abi::{ContactState, MtPoint, MtTouch};
