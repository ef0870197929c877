//! Two-finger title-bar gesture state machine.
//!
//! A gesture begins when two fingers land while the pointer is on a title
//! bar (or near the spot where a window was last minimized). The closest
//! pair of fingers within the start-distance window is locked for the rest
//! of the gesture. Lifting the fingers, leaving the valid region or losing a
//! locked finger ends it; the final scale and vertical travel then decide
//! which window action runs.

use std::time::{Duration, Instant};

use swishmini_multitouch_abi::MtTouch;
use swishmini_window::{Point, WindowAction, WindowEnvironment, WindowResult};

use crate::classify::{Classification, Dominance, ThresholdMode, classify, swipe_up_progress};
use crate::contact::{ContactPoint, active_points, find_closest_valid_pair};
use crate::error::GestureConfigResult;
use crate::feedback::{GestureCandidate, GestureFeedback, GesturePhase, TitleBarGesture};
use crate::thresholds::GestureThresholds;

/// The most recently minimized window, restorable by swiping up nearby.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizedWindowRecord<W> {
    /// The minimized window.
    pub window: W,
    /// Pointer location when it was minimized, bottom-left origin.
    pub location: Point,
    /// When it was minimized.
    pub minimized_at: Instant,
}

/// What one frame produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    /// Feedback for display, if the frame advanced a gesture.
    pub feedback: Option<GestureFeedback>,
    /// Gesture recognised at lift-off.
    pub recognized: Option<TitleBarGesture>,
    /// Window action that ran successfully.
    pub action: Option<WindowAction>,
    /// Current scale, when the fingers moved past the jitter thresholds.
    pub pinch_scale: Option<f64>,
    /// Final scale, when a gesture ended.
    pub final_scale: Option<f64>,
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    ids: (i32, i32),
    start_distance: f64,
    previous_distance: f64,
    start_y: f64,
    previous_y: f64,
    started_at: Instant,
    entered_close_hint: bool,
}

impl ActiveGesture {
    fn scale_at(&self, distance: f64) -> f64 {
        if self.start_distance > 0.0 {
            distance / self.start_distance
        } else {
            1.0
        }
    }
}

/// Recognises title-bar gestures and drives a [`WindowEnvironment`].
#[derive(Debug)]
pub struct GestureDetector<E: WindowEnvironment> {
    env: E,
    thresholds: GestureThresholds,
    active: Option<ActiveGesture>,
    last_minimized: Option<MinimizedWindowRecord<E::Window>>,
}

impl<E: WindowEnvironment> GestureDetector<E> {
    /// Create a detector.
    ///
    /// # Errors
    ///
    /// Returns an error if `thresholds` fail validation.
    pub fn new(env: E, thresholds: GestureThresholds) -> GestureConfigResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            env,
            thresholds,
            active: None,
            last_minimized: None,
        })
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Window environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable window environment.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Window restorable by an upward swipe.
    pub fn last_minimized(&self) -> Option<&MinimizedWindowRecord<E::Window>> {
        self.last_minimized.as_ref()
    }

    /// Drop any gesture in progress without acting on it.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feed one contact frame.
    pub fn process_frame(&mut self, touches: &[MtTouch], now: Instant) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if touches.is_empty() {
            self.end_gesture(now, &mut outcome);
            return outcome;
        }

        let pointer = self.env.pointer_location();
        let near_minimized = self.is_near_minimized(pointer);
        if !near_minimized && !self.env.is_point_on_title_bar(pointer) {
            self.end_gesture(now, &mut outcome);
            return outcome;
        }

        let points = active_points(touches);
        if points.len() < 2 {
            self.end_gesture(now, &mut outcome);
            return outcome;
        }

        let locked = self.active.as_ref().map(|active| active.ids);
        let pair = match locked {
            Some((a, b)) => {
                match (find_point(&points, a), find_point(&points, b)) {
                    (Some(p1), Some(p2)) => (p1, p2),
                    _ => {
                        self.end_gesture(now, &mut outcome);
                        return outcome;
                    }
                }
            }
            None => {
                let found = find_closest_valid_pair(
                    &points,
                    narrow(self.thresholds.min_start_distance),
                    narrow(self.thresholds.max_start_distance),
                );
                match found {
                    Some(pair) => pair,
                    None => return outcome,
                }
            }
        };

        let (p1, p2) = pair;
        let distance = f64::from(p1.distance_to(p2));
        let avg_y = (f64::from(p1.y) + f64::from(p2.y)) / 2.0;

        if self.active.is_none() {
            self.active = Some(ActiveGesture {
                ids: (p1.id, p2.id),
                start_distance: distance,
                previous_distance: distance,
                start_y: avg_y,
                previous_y: avg_y,
                started_at: now,
                entered_close_hint: false,
            });
            tracing::debug!(ids = ?(p1.id, p2.id), distance, "Gesture began");
            outcome.feedback = Some(self.emit_feedback(
                GesturePhase::Began,
                1.0,
                0.0,
                pointer,
                Duration::ZERO,
                None,
                ThresholdMode::Hint,
            ));
            return outcome;
        }

        let Some(active) = self.active.as_mut() else {
            return outcome;
        };
        let scale = active.scale_at(distance);
        let y_delta = avg_y - active.start_y;
        let moved = (distance - active.previous_distance).abs() > self.thresholds.jitter_distance
            || (avg_y - active.previous_y).abs() > self.thresholds.jitter_y;
        let duration = now.saturating_duration_since(active.started_at);
        active.previous_distance = distance;
        active.previous_y = avg_y;

        if moved {
            outcome.pinch_scale = Some(scale);
        }
        outcome.feedback = Some(self.emit_feedback(
            GesturePhase::Changed,
            scale,
            y_delta,
            pointer,
            duration,
            None,
            ThresholdMode::Hint,
        ));
        outcome
    }

    fn distance_from_last_minimized(&self, point: Point) -> Option<f64> {
        self.last_minimized
            .as_ref()
            .map(|record| point.distance_to(record.location))
    }

    fn is_near_minimized(&self, point: Point) -> bool {
        self.distance_from_last_minimized(point)
            .is_some_and(|d| d <= self.thresholds.restore_proximity)
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the feedback fields")]
    fn emit_feedback(
        &mut self,
        phase: GesturePhase,
        scale: f64,
        y_delta: f64,
        pointer: Point,
        duration: Duration,
        forced: Option<Classification>,
        mode: ThresholdMode,
    ) -> GestureFeedback {
        let under = self.env.window_under(pointer);
        let window_frame = under.as_ref().map(|(_, frame)| *frame);
        let full_screen = under
            .as_ref()
            .is_some_and(|(window, _)| self.env.is_full_screen(window));

        let mut classified = forced.unwrap_or_else(|| {
            classify(
                &self.thresholds,
                scale,
                y_delta,
                mode,
                full_screen,
                duration,
            )
        });

        // Near the restore hotspot a short upward swipe restores instead of
        // closing; holding past the close threshold still closes.
        if classified.candidate == GestureCandidate::CloseWindow
            && duration < self.thresholds.close_window_hold()
            && self.is_near_minimized(pointer)
        {
            classified = Classification {
                candidate: GestureCandidate::SwipeUp,
                progress: swipe_up_progress(&self.thresholds, y_delta),
            };
        }

        if matches!(phase, GesturePhase::Began | GesturePhase::Changed)
            && classified.candidate == GestureCandidate::CloseWindow
            && let Some(active) = self.active.as_mut()
        {
            active.entered_close_hint = true;
        }

        GestureFeedback::new(
            phase,
            classified.candidate,
            classified.progress,
            scale,
            y_delta,
            duration,
            true,
            pointer,
            window_frame,
        )
    }

    fn end_gesture(&mut self, now: Instant, outcome: &mut FrameOutcome) {
        let Some(active) = self.active.take() else {
            return;
        };
        let th = self.thresholds.clone();

        let final_scale = active.scale_at(active.previous_distance);
        let total_y = active.previous_y - active.start_y;
        let duration = now.saturating_duration_since(active.started_at);
        let hold_reached = duration >= th.close_window_hold();
        let dominance = Dominance::of(final_scale, total_y, th.y_delta, th.scale_deviation);

        let pointer = self.env.pointer_location();
        let under = self.env.window_under(pointer);
        let has_window = under.is_some();
        let full_screen = under
            .as_ref()
            .is_some_and(|(window, _)| self.env.is_full_screen(window));
        let near_minimized = self.is_near_minimized(pointer);

        let will_swipe_down = has_window && dominance.swipe && total_y < -th.swipe_down;
        let will_swipe_up = dominance.swipe
            && total_y > th.swipe_up
            && near_minimized
            && !(has_window && !full_screen && hold_reached);
        let will_pinch_open = has_window && dominance.pinch && final_scale > th.pinch_open;
        let will_pinch_close = has_window && dominance.pinch && final_scale < th.pinch_close;
        let will_close = has_window
            && !full_screen
            && dominance.swipe
            && total_y > th.swipe_up
            && hold_reached
            && !will_swipe_up;
        let will_restore = full_screen && will_pinch_close;
        let will_act_otherwise = will_swipe_down || will_swipe_up || will_pinch_open || will_restore;

        let cancelled = (active.entered_close_hint && !will_close && !will_act_otherwise).then_some(
            Classification {
                candidate: GestureCandidate::Cancelled,
                progress: 1.0,
            },
        );
        outcome.feedback = Some(self.emit_feedback(
            GesturePhase::Ended,
            final_scale,
            total_y,
            pointer,
            duration,
            cancelled,
            ThresholdMode::Action,
        ));

        let gesture = if dominance.swipe {
            if total_y < -th.swipe_down {
                Some(TitleBarGesture::SwipeDown)
            } else if total_y > th.swipe_up {
                Some(TitleBarGesture::SwipeUp)
            } else {
                None
            }
        } else if dominance.pinch {
            if final_scale > th.pinch_open {
                Some(TitleBarGesture::PinchOpen)
            } else if final_scale < th.pinch_close {
                Some(TitleBarGesture::PinchClose)
            } else {
                None
            }
        } else {
            None
        };

        if let Some(gesture) = gesture {
            tracing::info!(%gesture, final_scale, total_y, ?duration, "Gesture recognised");
            outcome.recognized = Some(gesture);
            outcome.action = self.execute(gesture, pointer, duration, now);
        } else {
            tracing::debug!(final_scale, total_y, "Gesture ended without action");
        }
        outcome.final_scale = Some(final_scale);
    }

    fn execute(
        &mut self,
        gesture: TitleBarGesture,
        pointer: Point,
        duration: Duration,
        now: Instant,
    ) -> Option<WindowAction> {
        if gesture == TitleBarGesture::SwipeUp {
            // Closing a windowed window after a long hold beats restoring.
            if duration >= self.thresholds.close_window_hold()
                && let Some((window, _)) = self.env.window_under(pointer)
                && !self.env.is_full_screen(&window)
            {
                return self.perform(WindowAction::Close, &window);
            }
            if self.is_near_minimized(pointer)
                && let Some(record) = self.last_minimized.take()
            {
                return self.perform(WindowAction::Unminimize, &record.window);
            }
            return None;
        }

        let (window, _) = self.env.window_under(pointer)?;
        match gesture {
            TitleBarGesture::PinchOpen => self.perform(WindowAction::ToggleFullScreen, &window),
            TitleBarGesture::PinchClose => {
                // Chrome's presentation mode is only detectable visually, so
                // always let `restore` decide for it.
                if self.env.is_chrome(&window) || self.env.is_full_screen(&window) {
                    match self.env.restore(&window) {
                        Ok(true) => Some(WindowAction::Restore),
                        Ok(false) => None,
                        Err(e) => {
                            tracing::warn!(?window, error = %e, "Restore failed");
                            None
                        }
                    }
                } else {
                    None
                }
            }
            TitleBarGesture::SwipeDown => {
                self.last_minimized = Some(MinimizedWindowRecord {
                    window: window.clone(),
                    location: pointer,
                    minimized_at: now,
                });
                self.perform(WindowAction::Minimize, &window)
            }
            TitleBarGesture::SwipeUp => None,
        }
    }

    fn perform(&mut self, action: WindowAction, window: &E::Window) -> Option<WindowAction> {
        let result: WindowResult<()> = match action {
            WindowAction::Minimize => self.env.minimize(window),
            WindowAction::Unminimize => self.env.unminimize(window),
            WindowAction::Close => self.env.close(window),
            WindowAction::ToggleFullScreen => self.env.toggle_full_screen(window),
            WindowAction::Restore => self.env.restore(window).map(|_| ()),
        };
        match result {
            Ok(()) => Some(action),
            Err(e) => {
                tracing::warn!(%action, ?window, error = %e, "Window action failed");
                None
            }
        }
    }
}

fn find_point(points: &[ContactPoint], id: i32) -> Option<ContactPoint> {
    points.iter().find(|p| p.id == id).copied()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "normalized distances fit in f32"
)]
fn narrow(value: f64) -> f32 {
    value as f32
}
