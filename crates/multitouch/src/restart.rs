//! Debounced monitoring restarts.
//!
//! Display reconfiguration and wake-from-sleep both invalidate device
//! handles, and they tend to arrive in bursts. Requests are coalesced: each
//! new request replaces the pending one and pushes the deadline out.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default debounce window.
pub const DEFAULT_RESTART_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default pause between stopping and starting devices.
pub const DEFAULT_RESTART_SETTLE: Duration = Duration::from_millis(100);

/// Why monitoring is being restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartReason {
    /// Displays were attached, detached or reconfigured.
    ScreenConfigurationChanged,
    /// The system woke from sleep.
    SystemWakeUp,
    /// The user asked for it.
    UserRequested,
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScreenConfigurationChanged => write!(f, "screen configuration changed"),
            Self::SystemWakeUp => write!(f, "system wake-up"),
            Self::UserRequested => write!(f, "user requested"),
        }
    }
}

/// Coalesces restart requests.
#[derive(Debug, Clone)]
pub struct RestartDebouncer {
    delay: Duration,
    pending: Option<(RestartReason, Instant)>,
}

impl Default for RestartDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_DEBOUNCE)
    }
}

impl RestartDebouncer {
    /// Create a debouncer with the given window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Debounce window.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a restart, replacing any pending one.
    pub fn request(&mut self, reason: RestartReason, now: Instant) {
        if let Some((previous, _)) = self.pending {
            tracing::trace!(%previous, %reason, "Coalescing restart request");
        }
        self.pending = Some((reason, now + self.delay));
    }

    /// Drop any pending restart.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a restart is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending restart fires.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Take the pending reason once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<RestartReason> {
        match self.pending {
            Some((reason, due)) if now >= due => {
                self.pending = None;
                Some(reason)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = RestartDebouncer::default();
        debouncer.request(RestartReason::SystemWakeUp, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some(RestartReason::SystemWakeUp)
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_new_request_replaces_pending() {
        let start = Instant::now();
        let mut debouncer = RestartDebouncer::new(Duration::from_millis(300));
        debouncer.request(RestartReason::ScreenConfigurationChanged, start);
        debouncer.request(
            RestartReason::UserRequested,
            start + Duration::from_millis(200),
        );

        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some(RestartReason::UserRequested)
        );
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = RestartDebouncer::default();
        debouncer.request(RestartReason::UserRequested, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_time_until_due() {
        let start = Instant::now();
        let mut debouncer = RestartDebouncer::new(Duration::from_millis(300));
        assert_eq!(debouncer.time_until_due(start), None);

        debouncer.request(RestartReason::UserRequested, start);
        assert_eq!(
            debouncer.time_until_due(start + Duration::from_millis(100)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            debouncer.time_until_due(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            RestartReason::ScreenConfigurationChanged.to_string(),
            "screen configuration changed"
        );
        assert_eq!(RestartReason::SystemWakeUp.to_string(), "system wake-up");
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_last_request_wins(offsets in proptest::collection::vec(0u64..1_000, 1..20)) {
            let start = Instant::now();
            let mut debouncer = RestartDebouncer::default();
            let mut last = start;
            let mut elapsed = 0u64;
            for offset in &offsets {
                elapsed += offset;
                last = start + Duration::from_millis(elapsed);
                debouncer.request(RestartReason::UserRequested, last);
            }
            let due = last + DEFAULT_RESTART_DEBOUNCE;
            prop_assert_eq!(debouncer.poll(due - Duration::from_millis(1)), None);
            prop_assert_eq!(debouncer.poll(due), Some(RestartReason::UserRequested));
        }
    }
}
