//! Gesture configuration errors.

use thiserror::Error;

/// Error type for invalid gesture thresholds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureConfigError {
    /// A threshold lies outside its valid range.
    #[error("Invalid gesture threshold {field} = {value}: expected {expected}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Description of the valid range.
        expected: &'static str,
    },

    /// The start-distance window is empty.
    #[error("Invalid start distance range: min {min} must be below max {max}")]
    InvalidStartDistance {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

/// Result alias for gesture configuration.
pub type GestureConfigResult<T> = Result<T, GestureConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GestureConfigError::OutOfRange {
            field: "pinch_open",
            value: 0.9,
            expected: "greater than 1.0",
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid gesture threshold pinch_open = 0.9: expected greater than 1.0"
        );
        let err = GestureConfigError::InvalidStartDistance { min: 0.5, max: 0.4 };
        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid start distance range: min 0.5 must be below max 0.4"
        );
    }
}
