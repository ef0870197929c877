//! Contact-state codes reported in [`MtTouch::state`](crate::MtTouch::state).
//!
//! Only two codes have been observed with confidence: `1` when a finger lands
//! and `2` when it lifts. The driver keeps reporting other positive codes
//! while a finger rests or moves; their exact meaning is unconfirmed, so they
//! are preserved verbatim as [`ContactState::Other`].

/// Decoded contact state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactState {
    /// Code `0`: no contact.
    NotTouching,
    /// Code `1`: contact begin.
    Begin,
    /// Code `2`: contact end.
    End,
    /// Any other code, kept as reported.
    Other(i32),
}

impl ContactState {
    /// Decode a raw state code.
    #[must_use]
    pub const fn from_raw(code: i32) -> Self {
        match code {
            0 => Self::NotTouching,
            1 => Self::Begin,
            2 => Self::End,
            other => Self::Other(other),
        }
    }

    /// Raw code as delivered by the framework.
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::NotTouching => 0,
            Self::Begin => 1,
            Self::End => 2,
            Self::Other(code) => code,
        }
    }

    /// Whether the finger is on the surface.
    ///
    /// Any positive code counts as touching.
    #[must_use]
    pub const fn is_touching(self) -> bool {
        self.to_raw() > 0
    }
}

impl From<i32> for ContactState {
    fn from(code: i32) -> Self {
        Self::from_raw(code)
    }
}

impl From<ContactState> for i32 {
    fn from(state: ContactState) -> Self {
        state.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(ContactState::from_raw(0), ContactState::NotTouching);
        assert_eq!(ContactState::from_raw(1), ContactState::Begin);
        assert_eq!(ContactState::from_raw(2), ContactState::End);
    }

    #[test]
    fn test_unknown_codes_are_preserved() {
        assert_eq!(ContactState::from_raw(4), ContactState::Other(4));
        assert_eq!(ContactState::from_raw(-3), ContactState::Other(-3));
        assert_eq!(ContactState::Other(7).to_raw(), 7);
    }

    #[test]
    fn test_touching_is_positive_code() {
        assert!(!ContactState::NotTouching.is_touching());
        assert!(ContactState::Begin.is_touching());
        assert!(ContactState::End.is_touching());
        assert!(ContactState::Other(4).is_touching());
        assert!(!ContactState::Other(-1).is_touching());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_raw_code_survives_decoding(code: i32) {
            prop_assert_eq!(ContactState::from_raw(code).to_raw(), code);
        }

        #[test]
        fn prop_touching_matches_sign(code: i32) {
            prop_assert_eq!(ContactState::from_raw(code).is_touching(), code > 0);
        }
    }
}
