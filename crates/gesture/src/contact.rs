//! Contact filtering and finger-pair selection.

use swishmini_multitouch_abi::MtTouch;

/// A touch on the surface, in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Finger identifier, stable while the finger stays down.
    pub id: i32,
    /// Horizontal position, 0 at the left edge.
    pub x: f32,
    /// Vertical position, 0 at the bottom edge.
    pub y: f32,
}

impl ContactPoint {
    /// Create a contact point.
    #[must_use]
    pub const fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    fn distance_squared(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Touches that are on the surface and inside the unit square, in order.
#[must_use]
pub fn active_points(touches: &[MtTouch]) -> Vec<ContactPoint> {
    touches
        .iter()
        .filter(|t| t.is_active() && t.is_within_unit_square())
        .map(|t| {
            let position = t.normalized_position();
            ContactPoint::new(t.identifier, position.x, position.y)
        })
        .collect()
}

/// Closest pair whose distance lies in `[min_distance, max_distance]`.
///
/// Earlier pairs win ties. Returns `None` with fewer than two points or
/// when no pair qualifies.
#[must_use]
pub fn find_closest_valid_pair(
    points: &[ContactPoint],
    min_distance: f32,
    max_distance: f32,
) -> Option<(ContactPoint, ContactPoint)> {
    let min_sq = min_distance * min_distance;
    let max_sq = max_distance * max_distance;

    let mut best: Option<(f32, (ContactPoint, ContactPoint))> = None;
    for (i, &a) in points.iter().enumerate() {
        for &b in points.iter().skip(i + 1) {
            let dist_sq = a.distance_squared(b);
            if dist_sq < min_sq || dist_sq > max_sq {
                continue;
            }
            if best.is_none_or(|(current, _)| dist_sq < current) {
                best = Some((dist_sq, (a, b)));
            }
        }
    }
    best.map(|(_, pair)| pair)
}
