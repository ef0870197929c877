//! Error types for framework access and sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for multitouch operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultitouchError {
    /// The framework is only shipped on macOS.
    #[error("MultitouchSupport is not available on this platform")]
    UnsupportedPlatform,

    /// A library could not be opened.
    #[error("Failed to load {path}: {reason}")]
    LibraryLoadFailed {
        /// Path that was opened.
        path: PathBuf,
        /// Loader error message.
        reason: String,
    },

    /// A required symbol is missing from a loaded library.
    #[error("Missing symbol {symbol} in {library}: {reason}")]
    MissingSymbol {
        /// Symbol name.
        symbol: String,
        /// Library the symbol was looked up in.
        library: String,
        /// Loader error message.
        reason: String,
    },

    /// `MTDeviceCreateList` returned null.
    #[error("Device list unavailable")]
    DeviceListUnavailable,

    /// The device list was empty.
    #[error("No multitouch devices found")]
    NoDevices,

    /// A handle was not produced by this backend.
    #[error("Unknown device handle {0:#x}")]
    UnknownDevice(usize),

    /// A backend refused to start a device.
    #[error("Failed to start device {0:#x}")]
    DeviceStartFailed(usize),

    /// Another session already owns the contact-frame sink.
    #[error("Contact frame sink already installed")]
    AlreadyMonitoring,
}

/// Result alias for multitouch operations.
pub type MultitouchResult<T> = Result<T, MultitouchError>;

impl MultitouchError {
    /// Whether the framework itself could not be brought up.
    #[must_use]
    pub fn is_framework_unavailable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform | Self::LibraryLoadFailed { .. } | Self::MissingSymbol { .. }
        )
    }
}
