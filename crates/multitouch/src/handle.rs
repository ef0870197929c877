//! Opaque device handle.

use std::ffi::c_void;
use std::ptr::NonNull;

use swishmini_multitouch_abi::MtDeviceRef;

/// Non-null reference to a multitouch device.
///
/// The pointee belongs to the framework. A handle is only meaningful to the
/// backend that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(NonNull<c_void>);

// SAFETY: the handle is an opaque CoreFoundation reference. It is never
// dereferenced on the Rust side, only handed back to the framework, which
// accepts device references from any thread.
unsafe impl Send for DeviceHandle {}
// SAFETY: see `Send`; shared access never touches the pointee.
unsafe impl Sync for DeviceHandle {}

impl DeviceHandle {
    /// Wrap a raw device reference. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `raw` must be a device reference obtained from the framework and must
    /// stay valid for as long as the handle is used.
    pub unsafe fn from_raw(raw: MtDeviceRef) -> Option<Self> {
        NonNull::new(raw).map(Self)
    }

    /// Handle with a made-up address, for backends that never dereference it.
    pub(crate) fn synthetic(index: usize) -> Self {
        let addr = index.saturating_add(1).saturating_mul(16);
        Self(
            NonNull::new(std::ptr::without_provenance_mut::<c_void>(addr))
                .unwrap_or(NonNull::dangling()),
        )
    }

    /// Raw device reference.
    #[must_use]
    pub fn as_raw(self) -> MtDeviceRef {
        self.0.as_ptr()
    }

    /// Address of the reference, for logging.
    #[must_use]
    pub fn addr(self) -> usize {
        self.0.as_ptr().addr()
    }
}
