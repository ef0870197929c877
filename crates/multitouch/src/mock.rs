//! In-process backend for tests and dry runs.
//!
//! [`MockBackend`] hands out synthetic device handles, records every call and
//! can replay contact frames through whatever callback a session registered,
//! exercising the same trampoline the real framework calls.

use std::collections::HashMap;
use std::ffi::c_int;
use std::sync::Arc;

use parking_lot::Mutex;
use swishmini_multitouch_abi::{MtContactCallbackFunction, MtTouch};

use crate::backend::MultitouchBackend;
use crate::error::{MultitouchError, MultitouchResult};
use crate::handle::DeviceHandle;

#[derive(Default)]
struct MockState {
    devices: Vec<DeviceHandle>,
    callbacks: HashMap<DeviceHandle, MtContactCallbackFunction>,
    running: Vec<DeviceHandle>,
    started: Vec<(DeviceHandle, i32)>,
    stopped: Vec<DeviceHandle>,
    fail_device_list: bool,
    fail_start_at: Option<usize>,
}

/// Backend with scripted devices. Clones share state.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockBackend")
            .field("devices", &state.devices.len())
            .field("running", &state.running.len())
            .finish()
    }
}

impl MockBackend {
    /// Backend exposing `count` devices.
    #[must_use]
    pub fn with_devices(count: usize) -> Self {
        let backend = Self::default();
        backend.state.lock().devices = (0..count).map(DeviceHandle::synthetic).collect();
        backend
    }

    /// Backend with no devices at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_devices(0)
    }

    /// Make `create_device_list` fail.
    pub fn fail_device_list(&self) {
        self.state.lock().fail_device_list = true;
    }

    /// Make starting the device at `index` fail.
    pub fn fail_start_at(&self, index: usize) {
        self.state.lock().fail_start_at = Some(index);
    }

    /// Handle of the device at `index`.
    #[must_use]
    pub fn device(&self, index: usize) -> Option<DeviceHandle> {
        self.state.lock().devices.get(index).copied()
    }

    /// Every `start_device` call, in order.
    #[must_use]
    pub fn started(&self) -> Vec<(DeviceHandle, i32)> {
        self.state.lock().started.clone()
    }

    /// Every `stop_device` call, in order.
    #[must_use]
    pub fn stopped(&self) -> Vec<DeviceHandle> {
        self.state.lock().stopped.clone()
    }

    /// Devices started and not yet stopped.
    #[must_use]
    pub fn running(&self) -> Vec<DeviceHandle> {
        self.state.lock().running.clone()
    }

    /// Whether a callback is registered for `device`.
    #[must_use]
    pub fn has_callback(&self, device: DeviceHandle) -> bool {
        self.state.lock().callbacks.contains_key(&device)
    }

    /// Deliver `touches` through the callback of the device at `index`.
    ///
    /// Returns the callback's status, or `None` when that device is not
    /// running or has no callback.
    pub fn emit_frame(&self, index: usize, touches: &[MtTouch], timestamp: f64) -> Option<i32> {
        let callback = {
            let state = self.state.lock();
            let device = *state.devices.get(index)?;
            if !state.running.contains(&device) {
                return None;
            }
            *state.callbacks.get(&device)?
        };

        let mut buffer = touches.to_vec();
        let count = c_int::try_from(buffer.len()).ok()?;
        let device_id = c_int::try_from(index).ok()?;
        let pointer = if buffer.is_empty() {
            std::ptr::null_mut()
        } else {
            buffer.as_mut_ptr()
        };
        // SAFETY: `pointer` is null or addresses `count` live records in
        // `buffer`, which outlives the call.
        Some(unsafe { callback(device_id, pointer, count, timestamp, 0) })
    }

    fn index_of(state: &MockState, device: DeviceHandle) -> MultitouchResult<usize> {
        state
            .devices
            .iter()
            .position(|d| *d == device)
            .ok_or(MultitouchError::UnknownDevice(device.addr()))
    }
}

impl MultitouchBackend for MockBackend {
    fn create_default_device(&self) -> Option<DeviceHandle> {
        self.state.lock().devices.first().copied()
    }

    fn create_device_list(&self) -> MultitouchResult<Vec<DeviceHandle>> {
        let state = self.state.lock();
        if state.fail_device_list {
            return Err(MultitouchError::DeviceListUnavailable);
        }
        Ok(state.devices.clone())
    }

    fn register_contact_frame_callback(
        &self,
        device: DeviceHandle,
        callback: MtContactCallbackFunction,
    ) -> MultitouchResult<()> {
        let mut state = self.state.lock();
        Self::index_of(&state, device)?;
        state.callbacks.insert(device, callback);
        Ok(())
    }

    fn start_device(&self, device: DeviceHandle, mode: i32) -> MultitouchResult<()> {
        let mut state = self.state.lock();
        let index = Self::index_of(&state, device)?;
        if state.fail_start_at == Some(index) {
            return Err(MultitouchError::DeviceStartFailed(device.addr()));
        }
        state.started.push((device, mode));
        if !state.running.contains(&device) {
            state.running.push(device);
        }
        Ok(())
    }

    fn stop_device(&self, device: DeviceHandle) -> MultitouchResult<()> {
        let mut state = self.state.lock();
        Self::index_of(&state, device)?;
        state.stopped.push(device);
        state.running.retain(|d| *d != device);
        Ok(())
    }
}
