//! Start/stop sessions over every attached device.

use std::thread;
use std::time::Duration;

use crossbeam::channel::{Receiver, Sender, bounded};
use serde::{Deserialize, Serialize};
use swishmini_multitouch_abi::DEFAULT_START_MODE;

use crate::backend::MultitouchBackend;
use crate::dispatch::{self, ContactFrame, DispatchGuard, contact_frame_trampoline};
use crate::error::{MultitouchError, MultitouchResult};
use crate::handle::DeviceHandle;
use crate::restart::{DEFAULT_RESTART_SETTLE, RestartReason};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Capacity of the contact-frame channel.
    pub channel_capacity: usize,
    /// Mode passed to `MTDeviceStart`.
    pub start_mode: i32,
    /// Pause between stop and start during a restart.
    #[serde(with = "millis")]
    pub restart_settle: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            start_mode: DEFAULT_START_MODE,
            restart_settle: DEFAULT_RESTART_SETTLE,
        }
    }
}

/// Monitors every device of a backend and collects their contact frames.
///
/// Only one session can monitor at a time per process, since the framework
/// callback carries no context pointer.
pub struct MultitouchSession<B: MultitouchBackend> {
    backend: B,
    config: SessionConfig,
    sender: Sender<ContactFrame>,
    receiver: Receiver<ContactFrame>,
    devices: Vec<DeviceHandle>,
    guard: Option<DispatchGuard>,
}

impl<B: MultitouchBackend> MultitouchSession<B> {
    /// Create an idle session.
    pub fn new(backend: B, config: SessionConfig) -> Self {
        let (sender, receiver) = bounded(config.channel_capacity.max(1));
        Self {
            backend,
            config,
            sender,
            receiver,
            devices: Vec::new(),
            guard: None,
        }
    }

    /// Begin monitoring every device. Returns the number of devices started.
    ///
    /// Calling `start` on a running session is a no-op.
    pub fn start(&mut self) -> MultitouchResult<usize> {
        if self.is_monitoring() {
            return Ok(self.devices.len());
        }

        let guard = DispatchGuard::install(self.sender.clone())?;

        let devices = self.backend.create_device_list()?;
        if devices.is_empty() {
            tracing::warn!("No multitouch devices to monitor");
            return Err(MultitouchError::NoDevices);
        }

        let mut started = Vec::with_capacity(devices.len());
        for device in devices {
            let result = self
                .backend
                .register_contact_frame_callback(device, contact_frame_trampoline)
                .and_then(|()| self.backend.start_device(device, self.config.start_mode));
            if let Err(e) = result {
                tracing::error!(device = device.addr(), error = %e, "Failed to start device");
                self.stop_all(&started);
                return Err(e);
            }
            started.push(device);
        }

        tracing::info!(devices = started.len(), "Multitouch monitoring started");
        self.devices = started;
        self.guard = Some(guard);
        Ok(self.devices.len())
    }

    /// Stop every device and release the frame sink.
    pub fn stop(&mut self) {
        if !self.is_monitoring() {
            return;
        }
        let devices = std::mem::take(&mut self.devices);
        self.stop_all(&devices);
        self.guard = None;
        tracing::info!(
            devices = devices.len(),
            dropped_frames = dispatch::dropped_frames(),
            "Multitouch monitoring stopped"
        );
    }

    /// Stop, wait for the configured settle time, and start again.
    pub fn restart(&mut self, reason: RestartReason) -> MultitouchResult<usize> {
        tracing::info!(%reason, "Restarting multitouch monitoring");
        self.stop();
        if !self.config.restart_settle.is_zero() {
            thread::sleep(self.config.restart_settle);
        }
        match self.start() {
            Ok(count) => {
                tracing::info!(%reason, devices = count, "Monitoring restart succeeded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(%reason, error = %e, "Monitoring restart failed");
                Err(e)
            }
        }
    }

    /// Whether devices are currently delivering frames.
    pub fn is_monitoring(&self) -> bool {
        self.guard.is_some()
    }

    /// Devices started by this session.
    pub fn devices(&self) -> &[DeviceHandle] {
        &self.devices
    }

    /// Receiving end of the contact-frame channel.
    ///
    /// The channel outlives restarts, so a cloned receiver keeps working.
    pub fn frames(&self) -> &Receiver<ContactFrame> {
        &self.receiver
    }

    /// Frames dropped process-wide because the channel was full.
    pub fn dropped_frames(&self) -> u64 {
        dispatch::dropped_frames()
    }

    /// The backend driving this session.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn stop_all(&self, devices: &[DeviceHandle]) {
        for &device in devices {
            if let Err(e) = self.backend.stop_device(device) {
                tracing::warn!(device = device.addr(), error = %e, "Failed to stop device");
            }
        }
    }
}

impl<B: MultitouchBackend> Drop for MultitouchSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::TEST_SINK_LOCK;
    use crate::mock::MockBackend;
    use swishmini_multitouch_abi::MtTouch;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn quick_config() -> SessionConfig {
        SessionConfig {
            channel_capacity: 8,
            start_mode: 0,
            restart_settle: Duration::ZERO,
        }
    }

    #[test]
    fn test_start_registers_and_starts_every_device() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(2);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());

        assert_eq!(session.start()?, 2);
        assert!(session.is_monitoring());
        assert_eq!(backend.running().len(), 2);
        for device in session.devices() {
            assert!(backend.has_callback(*device));
        }
        assert!(backend.started().iter().all(|(_, mode)| *mode == 0));
        Ok(())
    }

    #[test]
    fn test_start_twice_is_noop() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(1);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());

        session.start()?;
        session.start()?;
        assert_eq!(backend.started().len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_device_list_fails_and_releases_sink() {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut session = MultitouchSession::new(MockBackend::with_devices(0), quick_config());

        assert_eq!(session.start(), Err(MultitouchError::NoDevices));
        assert!(!session.is_monitoring());
        assert!(!dispatch::is_installed());
    }

    #[test]
    fn test_start_failure_rolls_back_started_devices() {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(3);
        backend.fail_start_at(2);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());

        assert!(session.start().is_err());
        assert!(backend.running().is_empty());
        assert_eq!(backend.stopped().len(), 2);
        assert!(!dispatch::is_installed());
    }

    #[test]
    fn test_frames_reach_receiver() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(1);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());
        session.start()?;

        let touches = [
            MtTouch::with_contact(1, 1, 0.4, 0.5),
            MtTouch::with_contact(2, 1, 0.6, 0.5),
        ];
        assert_eq!(backend.emit_frame(0, &touches, 3.0), Some(0));

        let frame = session.frames().try_recv()?;
        assert_eq!(frame.touches.len(), 2);
        assert_eq!(frame.device_id, 0);
        Ok(())
    }

    #[test]
    fn test_stop_stops_devices_and_frees_sink() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(2);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());
        session.start()?;
        session.stop();

        assert!(!session.is_monitoring());
        assert!(session.devices().is_empty());
        assert!(backend.running().is_empty());
        assert!(!dispatch::is_installed());
        assert_eq!(backend.emit_frame(0, &[], 1.0), None);
        Ok(())
    }

    #[test]
    fn test_restart_keeps_receiver_alive() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(1);
        let mut session = MultitouchSession::new(backend.clone(), quick_config());
        let frames = session.frames().clone();
        session.start()?;

        assert_eq!(session.restart(RestartReason::SystemWakeUp)?, 1);
        assert_eq!(backend.started().len(), 2);

        backend.emit_frame(0, &[MtTouch::with_contact(1, 1, 0.5, 0.5)], 9.0);
        assert_eq!(frames.try_recv()?.timestamp, 9.0);
        Ok(())
    }

    #[test]
    fn test_drop_stops_monitoring() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(1);
        {
            let mut session = MultitouchSession::new(backend.clone(), quick_config());
            session.start()?;
        }
        assert!(backend.running().is_empty());
        assert!(!dispatch::is_installed());
        Ok(())
    }

    #[test]
    fn test_config_deserializes_with_defaults() -> TestResult {
        let config: SessionConfig = serde_json::from_str(r#"{"restart_settle": 250}"#)?;
        assert_eq!(config.restart_settle, Duration::from_millis(250));
        assert_eq!(config.channel_capacity, 256);
        assert_eq!(config.start_mode, 0);
        Ok(())
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_restart_outcome_is_logged() -> TestResult {
        let _serial = TEST_SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let backend = MockBackend::with_devices(1);
        let mut session = MultitouchSession::new(backend, quick_config());
        session.start()?;
        session.restart(RestartReason::ScreenConfigurationChanged)?;

        assert!(logs_contain("Monitoring restart succeeded"));
        assert!(logs_contain("screen configuration changed"));
        Ok(())
    }
}
