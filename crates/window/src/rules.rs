//! Hit-testing rules shared by every window backend.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Height of the title-bar strip at the top of a window frame.
pub const TITLE_BAR_HEIGHT: f64 = 30.0;

/// Strip at the top of the main screen that reveals a full-screen title bar.
pub const SCREEN_TOP_EDGE: f64 = 6.0;

/// Windows narrower or shorter than this are ignored (toolbars, badges).
pub const MIN_WINDOW_SIZE: f64 = 100.0;

/// Window layers considered ordinary application windows.
pub const WINDOW_LAYERS: std::ops::Range<i64> = 0..25;

/// Smallest tolerance when matching a window against a screen.
pub const FULL_SCREEN_MIN_TOLERANCE: f64 = 10.0;

/// Tolerance as a fraction of the screen dimension.
pub const FULL_SCREEN_RELATIVE_TOLERANCE: f64 = 0.01;

/// Bundle identifiers treated as Chrome.
pub const CHROME_BUNDLE_IDS: [&str; 2] = ["com.google.Chrome", "com.google.Chrome.canary"];

/// One entry of the on-screen window list, front to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Window-server number, when reported.
    pub number: Option<u32>,
    /// Owning process.
    pub owner_pid: i32,
    /// Window layer.
    pub layer: i64,
    /// Bounds, top-left origin.
    pub bounds: Rect,
}

impl WindowSnapshot {
    /// Whether the entry is an ordinary window of another process.
    #[must_use]
    pub fn is_candidate(&self, self_pid: i32) -> bool {
        WINDOW_LAYERS.contains(&self.layer)
            && self.owner_pid != self_pid
            && self.bounds.width() >= MIN_WINDOW_SIZE
            && self.bounds.height() >= MIN_WINDOW_SIZE
    }
}

/// Front-most candidate window containing `point` (top-left origin).
///
/// Windows owned by `self_pid` are skipped so an overlay drawn by the caller
/// never shadows the window beneath it.
#[must_use]
pub fn select_window_at(
    point: Point,
    snapshots: &[WindowSnapshot],
    self_pid: i32,
) -> Option<&WindowSnapshot> {
    snapshots
        .iter()
        .filter(|s| s.is_candidate(self_pid))
        .find(|s| s.bounds.contains(point))
}

/// Title-bar strip of a window frame (top-left origin).
#[must_use]
pub fn title_bar_rect(frame: &Rect) -> Rect {
    Rect::new(frame.min_x(), frame.min_y(), frame.width(), TITLE_BAR_HEIGHT)
}

/// Whether a pointer sits on the title bar of the window under it.
///
/// `pointer` uses a bottom-left origin. `window` is the frame of the window
/// under the pointer (top-left origin) and whether it is full screen. A
/// full-screen window has no visible title bar, so the top edge of the
/// screen stands in for it.
#[must_use]
pub fn is_point_on_title_bar(
    pointer: Point,
    main_screen_height: f64,
    window: Option<(Rect, bool)>,
) -> bool {
    let Some((frame, full_screen)) = window else {
        return false;
    };
    if full_screen && pointer.y >= main_screen_height - SCREEN_TOP_EDGE {
        return true;
    }
    title_bar_rect(&frame).contains(pointer.flip_y(main_screen_height))
}

/// Whether a frame covers a whole screen, menu bar included.
///
/// `frame` uses a top-left origin and `screens` a bottom-left origin. The
/// screen overlapping the frame the most is the reference; each edge and
/// dimension must match within `max(10, 1%)` of that screen.
#[must_use]
pub fn is_visually_full_screen(frame: &Rect, screens: &[Rect], main_screen_height: f64) -> bool {
    let frame = frame.flip_y(main_screen_height);
    let best = screens.iter().max_by(|a, b| {
        frame
            .intersection_area(a)
            .total_cmp(&frame.intersection_area(b))
    });
    let Some(screen) = best else {
        return false;
    };

    let tol_x = FULL_SCREEN_MIN_TOLERANCE.max(screen.width() * FULL_SCREEN_RELATIVE_TOLERANCE);
    let tol_y = FULL_SCREEN_MIN_TOLERANCE.max(screen.height() * FULL_SCREEN_RELATIVE_TOLERANCE);

    let dx = (frame.min_x() - screen.min_x()).abs();
    let dy = (frame.min_y() - screen.min_y()).abs();
    let dw = (frame.width() - screen.width()).abs();
    let dh = (frame.height() - screen.height()).abs();
    let matched = dx <= tol_x && dy <= tol_y && dw <= tol_x && dh <= tol_y;

    tracing::debug!(
        matched,
        dx,
        dy,
        dw,
        dh,
        tolerance = tol_x,
        "Visual full-screen check"
    );
    matched
}

/// Whether a bundle identifier belongs to Chrome.
#[must_use]
pub fn is_chrome_bundle(bundle_id: Option<&str>) -> bool {
    bundle_id.is_some_and(|id| CHROME_BUNDLE_IDS.contains(&id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_HEIGHT: f64 = 900.0;

    fn snapshot(pid: i32, layer: i64, bounds: Rect) -> WindowSnapshot {
        WindowSnapshot {
            number: None,
            owner_pid: pid,
            layer,
            bounds,
        }
    }

    #[test]
    fn test_select_skips_own_process_and_small_windows() {
        let snapshots = vec![
            snapshot(42, 0, Rect::new(0.0, 0.0, 800.0, 600.0)),
            snapshot(7, 0, Rect::new(0.0, 0.0, 800.0, 40.0)),
            snapshot(7, 30, Rect::new(0.0, 0.0, 800.0, 600.0)),
            snapshot(9, 3, Rect::new(0.0, 0.0, 800.0, 600.0)),
        ];
        let found = select_window_at(Point::new(10.0, 10.0), &snapshots, 42);
        assert_eq!(found.map(|s| s.owner_pid), Some(9));
    }

    #[test]
    fn test_select_returns_front_most() {
        let snapshots = vec![
            snapshot(1, 0, Rect::new(100.0, 100.0, 200.0, 200.0)),
            snapshot(2, 0, Rect::new(0.0, 0.0, 800.0, 600.0)),
        ];
        let hit = select_window_at(Point::new(150.0, 150.0), &snapshots, 0);
        assert_eq!(hit.map(|s| s.owner_pid), Some(1));
        let miss = select_window_at(Point::new(50.0, 50.0), &snapshots, 0);
        assert_eq!(miss.map(|s| s.owner_pid), Some(2));
        assert!(select_window_at(Point::new(900.0, 50.0), &snapshots, 0).is_none());
    }

    #[test]
    fn test_negative_layer_is_rejected() {
        let snapshots = vec![snapshot(1, -1, Rect::new(0.0, 0.0, 800.0, 600.0))];
        assert!(select_window_at(Point::new(10.0, 10.0), &snapshots, 0).is_none());
    }

    #[test]
    fn test_title_bar_hit() {
        // Window 100pt below the top of the screen.
        let frame = Rect::new(100.0, 100.0, 600.0, 400.0);
        let window = Some((frame, false));

        // 110pt from the top in top-left coordinates is 790 bottom-left.
        assert!(is_point_on_title_bar(Point::new(200.0, 790.0), MAIN_HEIGHT, window));
        // 140pt from the top is past the 30pt strip.
        assert!(!is_point_on_title_bar(Point::new(200.0, 760.0), MAIN_HEIGHT, window));
        assert!(!is_point_on_title_bar(Point::new(200.0, 790.0), MAIN_HEIGHT, None));
    }

    #[test]
    fn test_screen_top_edge_counts_for_full_screen_only() {
        let frame = Rect::new(0.0, 0.0, 1440.0, 900.0);
        let pointer = Point::new(700.0, 897.0);
        assert!(is_point_on_title_bar(pointer, MAIN_HEIGHT, Some((frame, true))));

        // The same spot on a windowed frame starting lower down misses.
        let windowed = Rect::new(0.0, 50.0, 1440.0, 800.0);
        assert!(!is_point_on_title_bar(pointer, MAIN_HEIGHT, Some((windowed, false))));
    }

    #[test]
    fn test_visual_full_screen_with_tolerance() {
        let screens = [Rect::new(0.0, 0.0, 1440.0, 900.0)];
        assert!(is_visually_full_screen(
            &Rect::new(0.0, 0.0, 1440.0, 900.0),
            &screens,
            MAIN_HEIGHT
        ));
        // 14.4pt tolerance on x for a 1440pt screen.
        assert!(is_visually_full_screen(
            &Rect::new(12.0, 0.0, 1430.0, 895.0),
            &screens,
            MAIN_HEIGHT
        ));
        // A window below the menu bar does not cover the screen.
        assert!(!is_visually_full_screen(
            &Rect::new(0.0, 25.0, 1440.0, 875.0),
            &screens,
            MAIN_HEIGHT
        ));
        assert!(!is_visually_full_screen(
            &Rect::new(0.0, 0.0, 1440.0, 900.0),
            &[],
            MAIN_HEIGHT
        ));
    }

    #[test]
    fn test_visual_full_screen_picks_best_screen() {
        // Secondary screen to the right of the main one.
        let screens = [
            Rect::new(0.0, 0.0, 1440.0, 900.0),
            Rect::new(1440.0, 0.0, 1920.0, 1080.0),
        ];
        // Top-left y of -180 puts a 1080pt frame flush with the secondary.
        let frame = Rect::new(1440.0, -180.0, 1920.0, 1080.0);
        assert!(is_visually_full_screen(&frame, &screens, MAIN_HEIGHT));
    }

    #[test]
    fn test_chrome_bundles() {
        assert!(is_chrome_bundle(Some("com.google.Chrome")));
        assert!(is_chrome_bundle(Some("com.google.Chrome.canary")));
        assert!(!is_chrome_bundle(Some("com.apple.Safari")));
        assert!(!is_chrome_bundle(None));
    }
}
