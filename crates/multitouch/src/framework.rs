//! Runtime-resolved MultitouchSupport framework.

use std::collections::HashSet;
use std::ffi::{c_int, c_void};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libloading::Library;
use parking_lot::Mutex;
use swishmini_multitouch_abi::{
    COREFOUNDATION_PATH, MULTITOUCH_FRAMEWORK_PATH, MtContactCallbackFunction, MtDeviceRef,
    cf_symbol, mt_symbol, symbol_display_name,
};

use crate::backend::MultitouchBackend;
use crate::error::{MultitouchError, MultitouchResult};
use crate::handle::DeviceHandle;

type CreateDefaultFn = unsafe extern "C" fn() -> MtDeviceRef;
type CreateListFn = unsafe extern "C" fn() -> *const c_void;
type RegisterCallbackFn = unsafe extern "C" fn(MtDeviceRef, MtContactCallbackFunction);
type DeviceStartFn = unsafe extern "C" fn(MtDeviceRef, c_int);
type DeviceStopFn = unsafe extern "C" fn(MtDeviceRef);
type CfArrayGetCountFn = unsafe extern "C" fn(*const c_void) -> isize;
type CfArrayGetValueAtIndexFn = unsafe extern "C" fn(*const c_void, isize) -> *const c_void;
type CfReleaseFn = unsafe extern "C" fn(*const c_void);

/// Resolved entry points. Only valid while both libraries stay loaded.
#[derive(Clone, Copy)]
struct FrameworkApi {
    create_default: CreateDefaultFn,
    create_list: CreateListFn,
    register_callback: RegisterCallbackFn,
    device_start: DeviceStartFn,
    device_stop: DeviceStopFn,
    cf_array_get_count: CfArrayGetCountFn,
    cf_array_get_value_at_index: CfArrayGetValueAtIndexFn,
    cf_release: CfReleaseFn,
}

/// A `CFArray` returned by `MTDeviceCreateList`. It keeps the devices it
/// holds alive until the next enumeration or until the framework drops.
struct RetainedArray(NonNull<c_void>);

// SAFETY: CoreFoundation objects may be retained and released from any thread.
unsafe impl Send for RetainedArray {}

/// Device references the framework may currently be handed.
///
/// Only the latest enumeration is kept; devices from an older list are
/// unknown once a new list replaces it.
#[derive(Default)]
struct Ownership {
    array: Option<RetainedArray>,
    listed: HashSet<DeviceHandle>,
    default_device: Option<DeviceHandle>,
}

impl Ownership {
    /// Adopt a fresh enumeration. Returns the array it supersedes, which
    /// the caller must release.
    fn adopt(&mut self, array: RetainedArray, devices: &[DeviceHandle]) -> Option<RetainedArray> {
        self.listed = devices.iter().copied().collect();
        self.array.replace(array)
    }

    fn is_known(&self, device: DeviceHandle) -> bool {
        self.default_device == Some(device) || self.listed.contains(&device)
    }
}

/// Hand `array` back to CoreFoundation.
///
/// # Safety
///
/// `release` must be `CFRelease` (or behave like it) and `array` must hold a
/// retain count owned by the caller.
unsafe fn release_array(release: CfReleaseFn, array: RetainedArray) {
    // SAFETY: forwarded to the caller.
    unsafe { release(array.0.as_ptr()) };
}

/// The MultitouchSupport framework, opened at runtime.
///
/// Holds both the framework and CoreFoundation open for its whole lifetime;
/// every resolved function pointer and every device handle it returned is
/// invalid once it is dropped.
pub struct MultitouchFramework {
    api: FrameworkApi,
    path: PathBuf,
    ownership: Mutex<Ownership>,
    // Dropped after `ownership` is released in `Drop`.
    _core_foundation: Library,
    _multitouch: Library,
}

impl std::fmt::Debug for MultitouchFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultitouchFramework")
            .field("path", &self.path)
            .field("listed_devices", &self.ownership.lock().listed.len())
            .finish_non_exhaustive()
    }
}

impl MultitouchFramework {
    /// Open the framework from its system location.
    pub fn load() -> MultitouchResult<Self> {
        if !cfg!(target_os = "macos") {
            return Err(MultitouchError::UnsupportedPlatform);
        }
        Self::load_from(Path::new(MULTITOUCH_FRAMEWORK_PATH))
    }

    /// Open the framework from `path`.
    ///
    /// CoreFoundation is always opened from its system location.
    pub fn load_from(path: &Path) -> MultitouchResult<Self> {
        let multitouch = open_library(path)?;
        let core_foundation = open_library(Path::new(COREFOUNDATION_PATH))?;

        let library_name = path.display().to_string();
        // SAFETY: every type alias above matches the C prototype of the symbol
        // it is resolved for.
        let api = unsafe {
            FrameworkApi {
                create_default: resolve(
                    &multitouch,
                    &library_name,
                    mt_symbol::DEVICE_CREATE_DEFAULT,
                )?,
                create_list: resolve(&multitouch, &library_name, mt_symbol::DEVICE_CREATE_LIST)?,
                register_callback: resolve(
                    &multitouch,
                    &library_name,
                    mt_symbol::REGISTER_CONTACT_FRAME_CALLBACK,
                )?,
                device_start: resolve(&multitouch, &library_name, mt_symbol::DEVICE_START)?,
                device_stop: resolve(&multitouch, &library_name, mt_symbol::DEVICE_STOP)?,
                cf_array_get_count: resolve(
                    &core_foundation,
                    COREFOUNDATION_PATH,
                    cf_symbol::ARRAY_GET_COUNT,
                )?,
                cf_array_get_value_at_index: resolve(
                    &core_foundation,
                    COREFOUNDATION_PATH,
                    cf_symbol::ARRAY_GET_VALUE_AT_INDEX,
                )?,
                cf_release: resolve(&core_foundation, COREFOUNDATION_PATH, cf_symbol::RELEASE)?,
            }
        };

        tracing::info!(path = %path.display(), "MultitouchSupport loaded");

        Ok(Self {
            api,
            path: path.to_path_buf(),
            ownership: Mutex::new(Ownership::default()),
            _core_foundation: core_foundation,
            _multitouch: multitouch,
        })
    }

    /// Path the framework was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_known(&self, device: DeviceHandle) -> MultitouchResult<()> {
        if self.ownership.lock().is_known(device) {
            Ok(())
        } else {
            Err(MultitouchError::UnknownDevice(device.addr()))
        }
    }
}

impl MultitouchBackend for MultitouchFramework {
    fn create_default_device(&self) -> Option<DeviceHandle> {
        // SAFETY: `create_default` was resolved from the loaded framework and
        // takes no arguments.
        let raw = unsafe { (self.api.create_default)() };
        // SAFETY: a non-null return is a device reference owned by the framework.
        let device = unsafe { DeviceHandle::from_raw(raw) }?;
        self.ownership.lock().default_device = Some(device);
        Some(device)
    }

    fn create_device_list(&self) -> MultitouchResult<Vec<DeviceHandle>> {
        // SAFETY: `create_list` takes no arguments and returns a retained CFArray or null.
        let raw = unsafe { (self.api.create_list)() };
        let array = NonNull::new(raw.cast_mut()).ok_or(MultitouchError::DeviceListUnavailable)?;

        // SAFETY: `array` is a live CFArray returned above.
        let count = unsafe { (self.api.cf_array_get_count)(array.as_ptr()) };
        let mut devices = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
        for index in 0..count.max(0) {
            // SAFETY: `index` is within `0..count` of the same array.
            let value = unsafe { (self.api.cf_array_get_value_at_index)(array.as_ptr(), index) };
            // SAFETY: array elements are device references kept alive by the
            // array, which is retained below.
            if let Some(device) = unsafe { DeviceHandle::from_raw(value.cast_mut()) } {
                devices.push(device);
            }
        }

        let superseded = self.ownership.lock().adopt(RetainedArray(array), &devices);
        if let Some(previous) = superseded {
            // SAFETY: the previous list came retained from `MTDeviceCreateList`
            // and its devices were stopped before enumerating again.
            unsafe { release_array(self.api.cf_release, previous) };
            tracing::trace!("Released superseded device list");
        }

        tracing::debug!(count = devices.len(), "Enumerated multitouch devices");
        Ok(devices)
    }

    fn register_contact_frame_callback(
        &self,
        device: DeviceHandle,
        callback: MtContactCallbackFunction,
    ) -> MultitouchResult<()> {
        self.ensure_known(device)?;
        // SAFETY: `device` came from this framework and is still retained.
        unsafe { (self.api.register_callback)(device.as_raw(), callback) };
        Ok(())
    }

    fn start_device(&self, device: DeviceHandle, mode: i32) -> MultitouchResult<()> {
        self.ensure_known(device)?;
        // SAFETY: `device` came from this framework and is still retained.
        unsafe { (self.api.device_start)(device.as_raw(), mode) };
        Ok(())
    }

    fn stop_device(&self, device: DeviceHandle) -> MultitouchResult<()> {
        self.ensure_known(device)?;
        // SAFETY: `device` came from this framework and is still retained.
        unsafe { (self.api.device_stop)(device.as_raw()) };
        Ok(())
    }
}

impl Drop for MultitouchFramework {
    fn drop(&mut self) {
        if let Some(array) = self.ownership.get_mut().array.take() {
            // SAFETY: the array was returned retained by `MTDeviceCreateList`
            // and is released exactly once, before the libraries unload.
            unsafe { release_array(self.api.cf_release, array) };
        }
    }
}

fn open_library(path: &Path) -> MultitouchResult<Library> {
    // SAFETY: the system frameworks opened here run no initialisers with
    // preconditions on the caller.
    unsafe { Library::new(path) }.map_err(|e| MultitouchError::LibraryLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve `symbol` as a `T`.
///
/// # Safety
///
/// `T` must be a function pointer type matching the symbol's C prototype.
unsafe fn resolve<T: Copy>(
    library: &Library,
    library_name: &str,
    symbol: &[u8],
) -> MultitouchResult<T> {
    // SAFETY: forwarded to the caller.
    let found: Result<libloading::Symbol<'_, T>, libloading::Error> =
        unsafe { library.get(symbol) };
    found
        .map(|s| *s)
        .map_err(|e| MultitouchError::MissingSymbol {
            symbol: symbol_display_name(symbol).to_string(),
            library: library_name.to_string(),
            reason: e.to_string(),
        })
}
