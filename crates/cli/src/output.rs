//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Error;
use colored::*;
use serde_json::json;
use swishmini_gesture::{FrameOutcome, GesturePhase};
use swishmini_multitouch::prelude::{ContactFrame, ContactState, MtTouch};

use crate::config::SwishConfig;
use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "exit_code": crate::error::exit_code(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print what the framework reported about attached devices
pub fn print_device_summary(framework: &Path, has_default: bool, count: usize, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "framework": framework,
            "default_device": has_default,
            "device_count": count
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format device summary as JSON: {e}"),
        }
        return;
    }

    println!("{} {}", "Framework:".bold(), framework.display());
    println!(
        "  Default device: {}",
        if has_default {
            "present".green()
        } else {
            "none".yellow()
        }
    );
    if count == 0 {
        println!("  {}", "No multitouch devices found".yellow());
    } else {
        println!("  Devices: {}", count.to_string().cyan());
    }
}

/// Print one contact frame
pub fn print_frame(frame: &ContactFrame, json: bool) {
    if json {
        match serde_json::to_string(frame) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format contact frame as JSON: {e}"),
        }
        return;
    }

    let header = format!("[{:>12.6}]", frame.timestamp);
    if frame.is_empty() {
        println!("{} device {} {}", header.dimmed(), frame.device_id, "lifted".dimmed());
        return;
    }
    println!(
        "{} device {} {} touch(es), {} active",
        header.dimmed(),
        frame.device_id,
        frame.touches.len(),
        frame.active_count()
    );
    for touch in &frame.touches {
        print_touch(touch);
    }
}

fn print_touch(touch: &MtTouch) {
    let position = touch.normalized_position();
    let label = state_label(touch.contact_state());
    let label = if touch.is_active() {
        label.green()
    } else {
        label.dimmed()
    };
    println!(
        "    #{:<3} {:<14} x={:.3} y={:.3} size={:.2} angle={:.2}",
        touch.identifier, label, position.x, position.y, touch.size, touch.angle
    );
}

fn state_label(state: ContactState) -> String {
    match state {
        ContactState::NotTouching => "not touching".to_string(),
        ContactState::Begin => "begin".to_string(),
        ContactState::End => "end".to_string(),
        ContactState::Other(code) => format!("state {code}"),
    }
}

/// Print a gesture that began or ended
pub fn print_gesture(outcome: &FrameOutcome, json: bool) {
    let Some(feedback) = &outcome.feedback else {
        return;
    };

    if json {
        let output = json!({
            "phase": feedback.phase,
            "candidate": feedback.candidate,
            "progress": feedback.progress,
            "scale": feedback.scale,
            "y_delta": feedback.y_delta,
            "duration_ms": feedback.duration.as_millis(),
            "recognized": outcome.recognized,
            "action": outcome.action,
        });
        println!("{output}");
        return;
    }

    match feedback.phase {
        GesturePhase::Began => println!("{} gesture began", "●".cyan()),
        GesturePhase::Ended => {
            let recognized = outcome
                .recognized
                .map_or_else(|| "nothing".to_string(), |g| g.to_string());
            let action = match outcome.action {
                Some(action) => format!("would {action}").green(),
                None => "no action".yellow(),
            };
            println!(
                "{} {} ({}), scale {:.2}, y {:+.3}, {} ms: {}",
                "○".cyan(),
                recognized.bold(),
                feedback.candidate.action_description(),
                feedback.scale,
                feedback.y_delta,
                feedback.duration.as_millis(),
                action
            );
        }
        GesturePhase::Changed => {}
    }
}

/// Print the effective configuration
pub fn print_config(path: Option<&Path>, config: &SwishConfig, json: bool) -> anyhow::Result<()> {
    let exists = path.is_some_and(Path::exists);
    if json {
        let output = json!({
            "success": true,
            "path": path,
            "file_exists": exists,
            "config": config
        });
        let rendered = serde_json::to_string_pretty(&output).map_err(CliError::from)?;
        println!("{rendered}");
        return Ok(());
    }

    match path {
        Some(path) if exists => println!("{} {}", "Config file:".bold(), path.display()),
        Some(path) => println!(
            "{} {} {}",
            "Config file:".bold(),
            path.display(),
            "(not found, using defaults)".yellow()
        ),
        None => println!("{}", "No config file, using defaults".yellow()),
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

/// Print counters collected while monitoring
pub fn print_session_summary(frames: u64, dropped: u64, json: bool) {
    if json {
        // Frames were streamed as JSON lines; keep the summary on stderr.
        eprintln!("{}", json!({ "frames": frames, "dropped_frames": dropped }));
        return;
    }
    println!("{} frames received, {} dropped", frames, dropped);
}

/// Print success message
pub fn print_success(message: &str, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "message": message
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format success message as JSON: {e}"),
        }
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print a status line; suppressed in JSON mode so streams stay parseable
pub fn print_status(message: &str, json: bool) {
    if !json {
        eprintln!("{}", message.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        assert_eq!(state_label(ContactState::Begin), "begin");
        assert_eq!(state_label(ContactState::Other(4)), "state 4");
        assert_eq!(state_label(ContactState::NotTouching), "not touching");
    }
}
