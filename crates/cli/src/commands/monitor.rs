//! Contact frame monitoring

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossbeam::channel::{Receiver, RecvTimeoutError};
use swishmini_multitouch::{ContactFrame, MultitouchSession};

use crate::commands::{POLL_INTERVAL, load_framework};
use crate::config::SwishConfig;
use crate::error::CliError;
use crate::output;

/// Print frames until Ctrl-C, or until `limit` frames arrived.
pub async fn execute(config: &SwishConfig, limit: Option<u64>, json: bool) -> Result<()> {
    let framework = load_framework(config)?;
    let mut session = MultitouchSession::new(framework, config.session_config());
    let devices = session.start().map_err(CliError::from)?;
    output::print_status(
        &format!("Monitoring {devices} device(s), Ctrl-C to stop"),
        json,
    );

    let stop = Arc::new(AtomicBool::new(false));
    let receiver = session.frames().clone();
    let worker_stop = Arc::clone(&stop);
    let mut worker =
        tokio::task::spawn_blocking(move || pump(&receiver, limit, json, &worker_stop));

    let received = tokio::select! {
        joined = &mut worker => joined?,
        _ = tokio::signal::ctrl_c() => {
            stop.store(true, Ordering::Relaxed);
            worker.await?
        }
    };

    session.stop();
    output::print_session_summary(received, session.dropped_frames(), json);
    Ok(())
}

/// Drain `receiver` until `stop` is set, `limit` is reached or the channel
/// closes. Returns the number of frames printed.
pub(crate) fn pump(
    receiver: &Receiver<ContactFrame>,
    limit: Option<u64>,
    json: bool,
    stop: &AtomicBool,
) -> u64 {
    let mut received: u64 = 0;
    while !stop.load(Ordering::Relaxed) && limit.is_none_or(|n| received < n) {
        match receiver.recv_timeout(POLL_INTERVAL) {
            Ok(frame) => {
                output::print_frame(&frame, json);
                received = received.saturating_add(1);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    received
}
