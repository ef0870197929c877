//! Runtime access to the MultitouchSupport framework.
//!
//! This crate turns the raw declarations in `swishmini-multitouch-abi` into
//! something an application can drive:
//! - Runtime resolution of the private framework (no link-time dependency)
//! - Device enumeration with ownership of the returned `CFArray`
//! - A C-ABI trampoline that copies contact frames into a bounded channel
//! - Start/stop sessions over every attached device
//! - Debounced restarts after display or power changes
//!
//! # Callback Routing
//!
//! `MTRegisterContactFrameCallback` takes a bare function pointer with no
//! user-data argument. Frames therefore leave the callback through a single
//! process-wide sink, and at most one [`MultitouchSession`] can be monitoring
//! at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use swishmini_multitouch::{MultitouchFramework, MultitouchSession, SessionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let framework = MultitouchFramework::load()?;
//!     let mut session = MultitouchSession::new(framework, SessionConfig::default());
//!
//!     let devices = session.start()?;
//!     println!("monitoring {devices} device(s)");
//!
//!     if let Ok(frame) = session.frames().recv() {
//!         println!("{} contact(s)", frame.touches.len());
//!     }
//!
//!     session.stop();
//!     Ok(())
//! }
//! ```

#![expect(
    unsafe_code,
    reason = "calls into a C framework resolved at runtime"
)]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod framework;
pub mod handle;
pub mod mock;
pub mod prelude;
pub mod restart;
pub mod session;

pub use backend::MultitouchBackend;
pub use dispatch::{ContactFrame, DispatchGuard, contact_frame_trampoline, dropped_frames};
pub use error::{MultitouchError, MultitouchResult};
pub use framework::MultitouchFramework;
pub use handle::DeviceHandle;
pub use restart::{RestartDebouncer, RestartReason};
pub use session::{MultitouchSession, SessionConfig};
