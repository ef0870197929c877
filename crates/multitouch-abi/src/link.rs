//! Link-time declarations of the framework entry points.
//!
//! Enabled with the `link` feature. Linking pulls in the private framework at
//! load time, so a binary built this way will not start on a system without
//! it; prefer runtime resolution unless the host is known to ship it.

use core::ffi::{c_int, c_void};

use crate::types::{MtContactCallbackFunction, MtDeviceRef};

#[link(name = "MultitouchSupport", kind = "framework")]
unsafe extern "C" {
    /// Obtain the default multitouch device.
    pub fn MTDeviceCreateDefault() -> MtDeviceRef;

    /// Enumerate multitouch devices. Returns a retained `CFArrayRef`.
    pub fn MTDeviceCreateList() -> *const c_void;

    /// Install a contact-frame callback on a device.
    pub fn MTRegisterContactFrameCallback(device: MtDeviceRef, callback: MtContactCallbackFunction);

    /// Begin delivering callbacks. `mode` is conventionally zero.
    pub fn MTDeviceStart(device: MtDeviceRef, mode: c_int);

    /// Stop delivering callbacks.
    pub fn MTDeviceStop(device: MtDeviceRef);
}
