//! C-compatible contact records.
//!
//! Field order and primitive widths follow the native declarations exactly.
//! Padding is implicit (as in C); no `_pad` fields are inserted.

use core::ffi::{c_int, c_void};

use crate::contact_state::ContactState;

/// Two-dimensional floating point coordinate.
///
/// # Memory Layout
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 4    | x     |
/// | 4      | 4    | y     |
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MtPoint {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl MtPoint {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Position and velocity pair.
///
/// # Memory Layout
///
/// | Offset | Size | Field    |
/// |--------|------|----------|
/// | 0      | 8    | position |
/// | 8      | 8    | velocity |
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MtReadout {
    /// Position sample.
    pub position: MtPoint,
    /// Velocity sample.
    pub velocity: MtPoint,
}

/// One finger-contact sample from a contact frame.
///
/// # Memory Layout
///
/// Size 96 bytes, 8-byte alignment (driven by `timestamp`).
///
/// | Offset | Size | Field       |
/// |--------|------|-------------|
/// | 0      | 4    | frame       |
/// | 4      | 4    | (padding)   |
/// | 8      | 8    | timestamp   |
/// | 16     | 4    | identifier  |
/// | 20     | 4    | state       |
/// | 24     | 4    | unknown1    |
/// | 28     | 4    | unknown2    |
/// | 32     | 16   | normalized  |
/// | 48     | 4    | size        |
/// | 52     | 4    | zero1       |
/// | 56     | 4    | angle       |
/// | 60     | 4    | major_axis  |
/// | 64     | 4    | minor_axis  |
/// | 68     | 16   | unknown3    |
/// | 84     | 8    | unknown4    |
/// | 92     | 4    | unknown5    |
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MtTouch {
    /// Frame counter.
    pub frame: c_int,
    /// Timestamp in seconds.
    pub timestamp: f64,
    /// Per-contact identifier, stable while the finger stays down.
    pub identifier: c_int,
    /// Raw contact-state code, see [`ContactState`].
    pub state: c_int,
    /// Unknown.
    pub unknown1: c_int,
    /// Unknown.
    pub unknown2: c_int,
    /// Position and velocity normalized to the sensor surface (0.0 - 1.0).
    pub normalized: MtReadout,
    /// Contact size.
    pub size: f32,
    /// Reported as zero so far.
    pub zero1: c_int,
    /// Ellipse angle.
    pub angle: f32,
    /// Ellipse major axis.
    pub major_axis: f32,
    /// Ellipse minor axis.
    pub minor_axis: f32,
    /// Unknown readout.
    pub unknown3: MtReadout,
    /// Unknown.
    pub unknown4: [c_int; 2],
    /// Unknown.
    pub unknown5: f32,
}

impl MtTouch {
    /// Create a touch with identifier, state and normalized position set.
    ///
    /// All other fields are zero.
    #[must_use]
    pub fn with_contact(identifier: c_int, state: c_int, x: f32, y: f32) -> Self {
        Self {
            identifier,
            state,
            normalized: MtReadout {
                position: MtPoint::new(x, y),
                velocity: MtPoint::default(),
            },
            ..Default::default()
        }
    }

    /// Decoded contact state.
    #[must_use]
    pub const fn contact_state(&self) -> ContactState {
        ContactState::from_raw(self.state)
    }

    /// Whether the finger is on the surface.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.contact_state().is_touching()
    }

    /// Normalized position on the sensor surface.
    #[must_use]
    pub const fn normalized_position(&self) -> MtPoint {
        self.normalized.position
    }

    /// Whether the normalized position lies within `[0, 1]` on both axes.
    #[must_use]
    pub fn is_within_unit_square(&self) -> bool {
        let p = self.normalized.position;
        (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
    }
}

/// Opaque reference to a multitouch device (`MTDeviceRef`).
///
/// Produced and consumed only by the framework.
pub type MtDeviceRef = *mut c_void;

/// Contact-frame callback (`MTContactCallbackFunction`).
///
/// Arguments: device identifier, pointer to the first touch, number of
/// touches, frame timestamp, flags value. Returns a status code.
pub type MtContactCallbackFunction =
    unsafe extern "C" fn(c_int, *mut MtTouch, c_int, f64, c_int) -> c_int;

static_assertions::const_assert_eq!(core::mem::size_of::<MtPoint>(), 8);
static_assertions::const_assert_eq!(core::mem::align_of::<MtPoint>(), 4);
static_assertions::const_assert_eq!(core::mem::size_of::<MtReadout>(), 16);
static_assertions::const_assert_eq!(core::mem::align_of::<MtReadout>(), 4);
static_assertions::const_assert_eq!(core::mem::size_of::<MtTouch>(), 96);
static_assertions::const_assert_eq!(core::mem::align_of::<MtTouch>(), 8);
static_assertions::const_assert_eq!(core::mem::offset_of!(MtTouch, timestamp), 8);
static_assertions::const_assert_eq!(core::mem::offset_of!(MtTouch, normalized), 32);
static_assertions::const_assert_eq!(core::mem::offset_of!(MtTouch, unknown3), 68);
static_assertions::const_assert_eq!(core::mem::offset_of!(MtTouch, unknown5), 92);
