//! Contact-frame routing out of the C callback.
//!
//! The framework calls [`contact_frame_trampoline`] on its own thread. The
//! trampoline copies the touches and does a non-blocking send into whichever
//! channel is currently installed; when the channel is full the frame is
//! dropped and counted.

use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam::channel::{Sender, TrySendError};
use parking_lot::RwLock;
use serde::Serialize;
use swishmini_multitouch_abi::{CALLBACK_HANDLED, MtTouch};

use crate::error::{MultitouchError, MultitouchResult};

/// One callback delivery, copied out of framework memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactFrame {
    /// Device identifier passed by the framework.
    pub device_id: i32,
    /// Touches in delivery order. Empty when every finger lifted.
    pub touches: Vec<MtTouch>,
    /// Frame timestamp in seconds.
    pub timestamp: f64,
    /// Trailing flags value; meaning unconfirmed.
    pub flags: i32,
}

impl ContactFrame {
    /// Whether the frame carries no touches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Number of touches whose state code marks them on the surface.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.touches.iter().filter(|t| t.is_active()).count()
    }
}

static SINK: RwLock<Option<Sender<ContactFrame>>> = parking_lot::const_rwlock(None);
static INSTALLED: AtomicBool = AtomicBool::new(false);
static DELIVERED: AtomicU64 = AtomicU64::new(0);
static DROPPED: AtomicU64 = AtomicU64::new(0);

/// Keeps the contact-frame sink installed. Dropping it removes the sink.
#[derive(Debug)]
pub struct DispatchGuard {
    _private: (),
}

impl DispatchGuard {
    /// Install `sender` as the process-wide sink.
    ///
    /// Fails with [`MultitouchError::AlreadyMonitoring`] while another guard
    /// is alive.
    pub fn install(sender: Sender<ContactFrame>) -> MultitouchResult<Self> {
        if INSTALLED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(MultitouchError::AlreadyMonitoring);
        }
        *SINK.write() = Some(sender);
        tracing::debug!("Contact frame sink installed");
        Ok(Self { _private: () })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        *SINK.write() = None;
        INSTALLED.store(false, Ordering::Release);
        tracing::debug!("Contact frame sink removed");
    }
}

/// Whether a sink is currently installed.
#[must_use]
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// Frames delivered into a sink since process start.
#[must_use]
pub fn delivered_frames() -> u64 {
    DELIVERED.load(Ordering::Relaxed)
}

/// Frames dropped because the sink was full, since process start.
#[must_use]
pub fn dropped_frames() -> u64 {
    DROPPED.load(Ordering::Relaxed)
}

/// Contact-frame callback registered with the framework.
///
/// A null `touches` pointer or a non-positive `count` is delivered as an
/// empty frame. Always returns [`CALLBACK_HANDLED`].
///
/// # Safety
///
/// When `touches` is non-null and `count` is positive, `touches` must point
/// to `count` initialised, contiguous [`MtTouch`] records valid for the
/// duration of the call.
pub unsafe extern "C" fn contact_frame_trampoline(
    device: c_int,
    touches: *mut MtTouch,
    count: c_int,
    timestamp: f64,
    flags: c_int,
) -> c_int {
    let len = usize::try_from(count).unwrap_or(0);
    let touches = if touches.is_null() || len == 0 {
        Vec::new()
    } else {
        // SAFETY: the caller guarantees `len` contiguous records at `touches`.
        unsafe { std::slice::from_raw_parts(touches.cast_const(), len) }.to_vec()
    };

    deliver(ContactFrame {
        device_id: device,
        touches,
        timestamp,
        flags,
    });
    CALLBACK_HANDLED
}

fn deliver(frame: ContactFrame) {
    let sink = SINK.read();
    let Some(sender) = sink.as_ref() else {
        return;
    };
    match sender.try_send(frame) {
        Ok(()) => {
            DELIVERED.fetch_add(1, Ordering::Relaxed);
        }
        Err(TrySendError::Full(_)) => {
            let dropped = DROPPED.fetch_add(1, Ordering::Relaxed).saturating_add(1);
            if dropped.is_power_of_two() {
                tracing::warn!(dropped, "Contact frame channel full, dropping frames");
            }
        }
        Err(TrySendError::Disconnected(_)) => {}
    }
}

#[cfg(test)]
pub(crate) static TEST_SINK_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::bounded;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn call(device: c_int, touches: &mut [MtTouch], timestamp: f64) -> c_int {
        let count = c_int::try_from(touches.len()).unwrap_or(c_int::MAX);
        // SAFETY: `touches` is a live slice of `count` records.
        unsafe { contact_frame_trampoline(device, touches.as_mut_ptr(), count, timestamp, 0) }
    }

    #[test]
    fn test_frame_is_copied_into_sink() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (tx, rx) = bounded(4);
        let _guard = DispatchGuard::install(tx)?;

        let mut touches = [
            MtTouch::with_contact(1, 1, 0.2, 0.3),
            MtTouch::with_contact(2, 4, 0.6, 0.3),
        ];
        assert_eq!(call(7, &mut touches, 12.5), CALLBACK_HANDLED);

        let frame = rx.try_recv()?;
        assert_eq!(frame.device_id, 7);
        assert_eq!(frame.timestamp, 12.5);
        assert_eq!(frame.touches, touches.to_vec());
        assert_eq!(frame.active_count(), 2);
        Ok(())
    }

    #[test]
    fn test_null_pointer_yields_empty_frame() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (tx, rx) = bounded(4);
        let _guard = DispatchGuard::install(tx)?;

        // SAFETY: null is handled without dereferencing.
        let status =
            unsafe { contact_frame_trampoline(0, std::ptr::null_mut(), 3, 1.0, 0) };
        assert_eq!(status, CALLBACK_HANDLED);
        assert!(rx.try_recv()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_negative_count_yields_empty_frame() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (tx, rx) = bounded(4);
        let _guard = DispatchGuard::install(tx)?;

        let mut touch = MtTouch::with_contact(1, 1, 0.5, 0.5);
        // SAFETY: a negative count is handled without reading the pointer.
        unsafe { contact_frame_trampoline(0, &mut touch, -1, 1.0, 0) };
        assert!(rx.try_recv()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_second_install_is_rejected() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (tx, _rx) = bounded(1);
        let guard = DispatchGuard::install(tx.clone())?;
        assert!(is_installed());
        assert_eq!(
            DispatchGuard::install(tx.clone()).err(),
            Some(MultitouchError::AlreadyMonitoring)
        );

        drop(guard);
        assert!(!is_installed());
        let _again = DispatchGuard::install(tx)?;
        Ok(())
    }

    #[test]
    fn test_full_channel_counts_drops() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (tx, rx) = bounded(1);
        let _guard = DispatchGuard::install(tx)?;
        let before = dropped_frames();

        let mut touches = [MtTouch::with_contact(1, 1, 0.5, 0.5)];
        call(0, &mut touches, 1.0);
        call(0, &mut touches, 2.0);
        call(0, &mut touches, 3.0);

        assert_eq!(dropped_frames() - before, 2);
        assert_eq!(rx.try_recv()?.timestamp, 1.0);
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn test_no_sink_discards_silently() {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = (delivered_frames(), dropped_frames());
        let mut touches = [MtTouch::with_contact(1, 1, 0.5, 0.5)];
        assert_eq!(call(0, &mut touches, 1.0), CALLBACK_HANDLED);
        assert_eq!((delivered_frames(), dropped_frames()), before);
    }
}
