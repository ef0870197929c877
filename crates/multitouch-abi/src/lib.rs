//! C layouts and symbol declarations for the private MultitouchSupport framework.
//!
//! This crate declares the binding surface used to talk to the trackpad
//! driver shipped with macOS:
//! - `#[repr(C)]` contact records ([`MtPoint`], [`MtReadout`], [`MtTouch`])
//! - The opaque device reference ([`MtDeviceRef`])
//! - The contact-frame callback signature ([`MtContactCallbackFunction`])
//! - Symbol names and library paths for runtime resolution
//! - Optional link-time `extern "C"` declarations (feature `link`, macOS only)
//!
//! The framework is closed source and undocumented. Several fields of
//! [`MtTouch`] have no known meaning and are kept under `unknown*` names; do
//! not attach semantics to them.
//!
//! # Layout Guarantees
//!
//! Every record matches the native C layout field for field. Size, alignment
//! and field offsets are checked at compile time, so a layout drift fails the
//! build instead of corrupting callback data at runtime.
//!
//! # Entry Points
//!
//! | Symbol                           | Purpose                                   |
//! |----------------------------------|-------------------------------------------|
//! | `MTDeviceCreateDefault`          | Default multitouch device                 |
//! | `MTDeviceCreateList`             | `CFArray` of every multitouch device      |
//! | `MTRegisterContactFrameCallback` | Install a per-frame contact callback      |
//! | `MTDeviceStart`                  | Begin delivering callbacks (mode `0`)     |
//! | `MTDeviceStop`                   | Stop delivering callbacks                 |

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

pub mod constants;
pub mod contact_state;
pub mod prelude;
pub mod types;

#[cfg(all(target_os = "macos", feature = "link"))]
#[cfg_attr(docsrs, doc(cfg(all(target_os = "macos", feature = "link"))))]
pub mod link;

pub use constants::{
    CALLBACK_HANDLED, COREFOUNDATION_PATH, DEFAULT_START_MODE, MULTITOUCH_FRAMEWORK_PATH,
    cf_symbol, mt_symbol, symbol_display_name,
};
pub use contact_state::ContactState;
pub use types::{MtContactCallbackFunction, MtDeviceRef, MtPoint, MtReadout, MtTouch};
