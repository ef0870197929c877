//! Backend trait over the five framework entry points.

use swishmini_multitouch_abi::MtContactCallbackFunction;

use crate::error::MultitouchResult;
use crate::handle::DeviceHandle;

/// The device-level operations a session needs.
///
/// [`MultitouchFramework`](crate::MultitouchFramework) forwards to the real
/// framework; [`MockBackend`](crate::mock::MockBackend) records calls for
/// tests. Implementations reject handles they did not produce with
/// [`MultitouchError::UnknownDevice`](crate::MultitouchError::UnknownDevice).
pub trait MultitouchBackend: Send + Sync {
    /// Obtain the default device, if any.
    fn create_default_device(&self) -> Option<DeviceHandle>;

    /// Enumerate every device.
    fn create_device_list(&self) -> MultitouchResult<Vec<DeviceHandle>>;

    /// Install `callback` as the contact-frame callback of `device`.
    fn register_contact_frame_callback(
        &self,
        device: DeviceHandle,
        callback: MtContactCallbackFunction,
    ) -> MultitouchResult<()>;

    /// Begin delivering callbacks for `device`.
    fn start_device(&self, device: DeviceHandle, mode: i32) -> MultitouchResult<()>;

    /// Stop delivering callbacks for `device`.
    fn stop_device(&self, device: DeviceHandle) -> MultitouchResult<()>;
}

impl<B: MultitouchBackend + ?Sized> MultitouchBackend for Box<B> {
    fn create_default_device(&self) -> Option<DeviceHandle> {
        (**self).create_default_device()
    }

    fn create_device_list(&self) -> MultitouchResult<Vec<DeviceHandle>> {
        (**self).create_device_list()
    }

    fn register_contact_frame_callback(
        &self,
        device: DeviceHandle,
        callback: MtContactCallbackFunction,
    ) -> MultitouchResult<()> {
        (**self).register_contact_frame_callback(device, callback)
    }

    fn start_device(&self, device: DeviceHandle, mode: i32) -> MultitouchResult<()> {
        (**self).start_device(device, mode)
    }

    fn stop_device(&self, device: DeviceHandle) -> MultitouchResult<()> {
        (**self).stop_device(device)
    }
}
