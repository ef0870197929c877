//! Session lifecycle against the mock backend.

use std::sync::Mutex;
use std::time::Duration;

use swishmini_multitouch::mock::MockBackend;
use swishmini_multitouch::prelude::*;
use swishmini_multitouch::{DispatchGuard, dispatch};

type TestResult = Result<(), Box<dyn std::error::Error>>;

// Every test here touches the process-wide frame sink.
static SERIAL: Mutex<()> = Mutex::new(());

fn config(capacity: usize) -> SessionConfig {
    SessionConfig {
        channel_capacity: capacity,
        start_mode: 0,
        restart_settle: Duration::ZERO,
    }
}

fn pinch_pair(spread: f32) -> [MtTouch; 2] {
    [
        MtTouch::with_contact(1, 4, 0.5 - spread / 2.0, 0.5),
        MtTouch::with_contact(2, 4, 0.5 + spread / 2.0, 0.5),
    ]
}

#[test]
fn test_frames_from_every_device_share_one_channel() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::with_devices(2);
    let mut session = MultitouchSession::new(backend.clone(), config(16));
    assert_eq!(session.start()?, 2);

    backend.emit_frame(0, &pinch_pair(0.2), 1.0);
    backend.emit_frame(1, &pinch_pair(0.4), 1.5);

    let first = session.frames().recv_timeout(Duration::from_secs(1))?;
    let second = session.frames().recv_timeout(Duration::from_secs(1))?;
    assert_eq!((first.device_id, second.device_id), (0, 1));
    assert_eq!(second.active_count(), 2);
    Ok(())
}

#[test]
fn test_lift_off_arrives_as_empty_frame() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::with_devices(1);
    let mut session = MultitouchSession::new(backend.clone(), config(4));
    session.start()?;

    backend.emit_frame(0, &[], 2.0);
    let frame = session.frames().recv_timeout(Duration::from_secs(1))?;
    assert!(frame.is_empty());
    assert_eq!(frame.timestamp, 2.0);
    Ok(())
}

#[test]
fn test_second_session_cannot_start_while_first_monitors() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let mut first = MultitouchSession::new(MockBackend::with_devices(1), config(4));
    let mut second = MultitouchSession::new(MockBackend::with_devices(1), config(4));

    first.start()?;
    assert_eq!(second.start(), Err(MultitouchError::AlreadyMonitoring));

    first.stop();
    assert_eq!(second.start()?, 1);
    Ok(())
}

#[test]
fn test_device_list_failure_leaves_session_idle() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::with_devices(1);
    backend.fail_device_list();
    let mut session = MultitouchSession::new(backend.clone(), config(4));

    assert_eq!(session.start(), Err(MultitouchError::DeviceListUnavailable));
    assert!(!session.is_monitoring());
    assert!(!dispatch::is_installed());
    assert!(backend.started().is_empty());
}

#[test]
fn test_overflow_drops_newest_frames() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::with_devices(1);
    let mut session = MultitouchSession::new(backend.clone(), config(2));
    session.start()?;
    let before = session.dropped_frames();

    for i in 0..5u8 {
        backend.emit_frame(0, &pinch_pair(0.3), f64::from(i));
    }

    assert_eq!(session.dropped_frames() - before, 3);
    let kept: Vec<f64> = session.frames().try_iter().map(|f| f.timestamp).collect();
    assert_eq!(kept, vec![0.0, 1.0]);
    Ok(())
}

#[test]
fn test_restart_after_failure_recovers() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::empty();
    let mut session = MultitouchSession::new(backend, config(4));

    assert_eq!(
        session.restart(RestartReason::ScreenConfigurationChanged),
        Err(MultitouchError::NoDevices)
    );
    assert!(!session.is_monitoring());

    // The sink is free again for anyone else.
    let (tx, _rx) = crossbeam::channel::bounded(1);
    let guard = DispatchGuard::install(tx)?;
    drop(guard);
    Ok(())
}

#[test]
fn test_debounced_restart_drives_session() -> TestResult {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let backend = MockBackend::with_devices(1);
    let mut session = MultitouchSession::new(backend.clone(), config(4));
    session.start()?;

    let mut debouncer = RestartDebouncer::new(Duration::from_millis(300));
    let t0 = std::time::Instant::now();
    debouncer.request(RestartReason::ScreenConfigurationChanged, t0);
    debouncer.request(RestartReason::SystemWakeUp, t0 + Duration::from_millis(100));

    let mut restarts = 0;
    for step in 0..10u64 {
        if let Some(reason) = debouncer.poll(t0 + Duration::from_millis(step * 100)) {
            assert_eq!(reason, RestartReason::SystemWakeUp);
            session.restart(reason)?;
            restarts += 1;
        }
    }

    assert_eq!(restarts, 1);
    assert_eq!(backend.started().len(), 2);
    assert_eq!(backend.running().len(), 1);
    Ok(())
}
