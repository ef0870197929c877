//! Live gesture recognition against a simulated desktop
//!
//! Frames from the trackpad drive a [`GestureDetector`] whose window
//! environment is a single scripted window with the pointer resting on its
//! title bar. Recognised gestures are printed together with the window
//! action they would have triggered; no real window is touched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime};

use anyhow::Result;
use crossbeam::channel::RecvTimeoutError;
use swishmini_gesture::{FrameOutcome, GestureDetector, GesturePhase};
use swishmini_multitouch::{
    ContactFrame, MultitouchBackend, MultitouchSession, RestartDebouncer, RestartReason,
};
use swishmini_window::mock::{MockEnvironment, MockWindow};
use swishmini_window::{Rect, WindowEnvironment};

use crate::commands::{DryRunArgs, POLL_INTERVAL, load_framework};
use crate::config::SwishConfig;
use crate::error::CliError;
use crate::output;

const SCREEN_WIDTH: f64 = 1440.0;
const SCREEN_HEIGHT: f64 = 900.0;
const MENU_BAR_HEIGHT: f64 = 25.0;
const WINDOW_ID: u32 = 1;
const CHROME_BUNDLE_ID: &str = "com.google.Chrome";

/// Wall-clock jump between two loop turns that means the machine slept.
const WAKE_GAP: Duration = Duration::from_secs(5);

/// One window filling the screen below the menu bar, or the whole screen
/// when full screen, with the pointer on its title bar.
pub fn dry_run_environment(args: &DryRunArgs) -> MockEnvironment {
    let window = if args.full_screen {
        MockWindow::new(WINDOW_ID, Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)).full_screen()
    } else {
        MockWindow::new(
            WINDOW_ID,
            Rect::new(
                0.0,
                MENU_BAR_HEIGHT,
                SCREEN_WIDTH,
                SCREEN_HEIGHT - MENU_BAR_HEIGHT,
            ),
        )
    };
    let window = if args.chrome {
        window.bundle_id(CHROME_BUNDLE_ID)
    } else {
        window
    };

    let mut env = MockEnvironment::new(SCREEN_WIDTH, SCREEN_HEIGHT).with_window(window);
    env.point_at_title_bar(WINDOW_ID);
    env
}

/// Flags set from async signal handlers and read by the frame loop.
#[derive(Debug, Default)]
struct Signals {
    stop: AtomicBool,
    restart: AtomicBool,
}

/// Run the detector over live frames until Ctrl-C.
pub async fn execute(config: &SwishConfig, args: &DryRunArgs, json: bool) -> Result<()> {
    let framework = load_framework(config)?;
    let detector = GestureDetector::new(dry_run_environment(args), config.gesture.clone())
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    let mut session = MultitouchSession::new(framework, config.session_config());
    let devices = session.start().map_err(CliError::from)?;
    output::print_status(
        &format!("Recognising gestures on {devices} device(s) (dry run), Ctrl-C to stop"),
        json,
    );

    let signals = Arc::new(Signals::default());
    forward_hangups(Arc::clone(&signals))?;

    let runner = GestureLoop::new(
        session,
        detector,
        RestartDebouncer::new(config.restart_debounce()),
        json,
    );
    let worker_signals = Arc::clone(&signals);
    let mut worker = tokio::task::spawn_blocking(move || runner.run(&worker_signals));

    let handled = tokio::select! {
        joined = &mut worker => joined?,
        _ = tokio::signal::ctrl_c() => {
            signals.stop.store(true, Ordering::Relaxed);
            worker.await?
        }
    };

    output::print_status(&format!("{handled} frames processed"), json);
    Ok(())
}

/// SIGHUP schedules a debounced restart of monitoring.
#[cfg(unix)]
fn forward_hangups(signals: Arc<Signals>) -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())?;
    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, scheduling restart");
            signals.restart.store(true, Ordering::Relaxed);
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn forward_hangups(_signals: Arc<Signals>) -> std::io::Result<()> {
    Ok(())
}

/// Owns the session and the detector for the lifetime of the command.
struct GestureLoop<B: MultitouchBackend, E: WindowEnvironment> {
    session: MultitouchSession<B>,
    detector: GestureDetector<E>,
    debouncer: RestartDebouncer,
    json: bool,
}

impl<B: MultitouchBackend, E: WindowEnvironment> GestureLoop<B, E> {
    fn new(
        session: MultitouchSession<B>,
        detector: GestureDetector<E>,
        debouncer: RestartDebouncer,
        json: bool,
    ) -> Self {
        Self {
            session,
            detector,
            debouncer,
            json,
        }
    }

    /// Returns the number of frames handled.
    fn run(mut self, signals: &Signals) -> u64 {
        let mut handled: u64 = 0;
        let mut last_wall = SystemTime::now();

        while !signals.stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            let wall = SystemTime::now();
            if wall
                .duration_since(last_wall)
                .is_ok_and(|gap| gap > WAKE_GAP)
            {
                self.debouncer.request(RestartReason::SystemWakeUp, now);
            }
            last_wall = wall;
            if signals.restart.swap(false, Ordering::Relaxed) {
                self.debouncer.request(RestartReason::UserRequested, now);
            }
            self.restart_if_due(now);

            let timeout = self
                .debouncer
                .time_until_due(now)
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));
            match self.session.frames().recv_timeout(timeout) {
                Ok(frame) => {
                    self.handle(&frame, Instant::now());
                    handled = handled.saturating_add(1);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.shutdown();
        handled
    }

    /// Drop any gesture in flight without acting on it, then stop devices.
    fn shutdown(&mut self) {
        if self.detector.is_active() {
            tracing::debug!("Discarding gesture in progress at shutdown");
        }
        self.detector.reset();
        self.session.stop();
    }

    fn handle(&mut self, frame: &ContactFrame, now: Instant) -> FrameOutcome {
        let outcome = self.detector.process_frame(&frame.touches, now);
        self.report(&outcome);
        outcome
    }

    fn report(&self, outcome: &FrameOutcome) {
        if outcome
            .feedback
            .as_ref()
            .is_some_and(|f| f.phase != GesturePhase::Changed)
        {
            output::print_gesture(outcome, self.json);
        }
    }

    fn restart_if_due(&mut self, now: Instant) -> Option<RestartReason> {
        let reason = self.debouncer.poll(now)?;
        // A gesture cannot span a restart.
        self.detector.reset();
        if let Err(error) = self.session.restart(reason) {
            output::print_status(&format!("Restart after {reason} failed: {error}"), self.json);
        }
        Some(reason)
    }
}
