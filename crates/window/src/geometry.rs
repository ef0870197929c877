//! Screen geometry in points.
//!
//! Two origin conventions meet here. Window lists and accessibility frames
//! put the origin at the top-left of the main screen with y growing down;
//! pointer locations and screen frames put it at the bottom-left with y
//! growing up. [`Point::flip_y`] and [`Rect::flip_y`] convert between them
//! given the main screen height.

use serde::{Deserialize, Serialize};

/// A location on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Convert between top-left and bottom-left origins.
    #[must_use]
    pub fn flip_y(self, main_screen_height: f64) -> Self {
        Self::new(self.x, main_screen_height - self.y)
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Corner with the smallest coordinates.
    pub origin: Point,
    /// Extent from the origin.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from origin and extent.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Smallest x.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Smallest y.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Largest x.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Largest y.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Whether the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Whether `point` lies inside. The min edges are inclusive and the max
    /// edges exclusive.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Overlap of two rectangles. `None` when they are disjoint; rectangles
    /// sharing only an edge yield an empty rectangle.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x0 = self.min_x().max(other.min_x());
        let y0 = self.min_y().max(other.min_y());
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Area of the overlap, zero when there is none.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        match self.intersection(other) {
            Some(overlap) if !overlap.is_empty() => overlap.width() * overlap.height(),
            _ => 0.0,
        }
    }

    /// Convert between top-left and bottom-left origins.
    #[must_use]
    pub fn flip_y(&self, main_screen_height: f64) -> Self {
        Self::new(
            self.origin.x,
            main_screen_height - self.origin.y - self.size.height,
            self.size.width,
            self.size.height,
        )
    }
}
