//! Convenience re-exports for common ABI types.
//!
//! # Example
//!
//! ```
//! use swishmini_multitouch_abi::prelude::*;
//!
//! let touch = MtTouch::with_contact(1, 1, 0.5, 0.5);
//! assert_eq!(touch.contact_state(), ContactState::Begin);
//! ```

pub use crate::constants::{
    CALLBACK_HANDLED, COREFOUNDATION_PATH, DEFAULT_START_MODE, MULTITOUCH_FRAMEWORK_PATH,
    cf_symbol, mt_symbol, symbol_display_name,
};

pub use crate::contact_state::ContactState;

pub use crate::types::{MtContactCallbackFunction, MtDeviceRef, MtPoint, MtReadout, MtTouch};
