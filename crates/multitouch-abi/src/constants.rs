//! Library paths, symbol names and call constants.
//!
//! Symbol names are stored NUL-terminated so they can be handed straight to
//! a dynamic loader without allocating.

/// Install path of the private MultitouchSupport framework binary.
pub const MULTITOUCH_FRAMEWORK_PATH: &str =
    "/System/Library/PrivateFrameworks/MultitouchSupport.framework/MultitouchSupport";

/// Install path of the CoreFoundation framework binary.
///
/// Needed to walk the `CFArray` returned by `MTDeviceCreateList`.
pub const COREFOUNDATION_PATH: &str =
    "/System/Library/Frameworks/CoreFoundation.framework/CoreFoundation";

/// Mode passed to `MTDeviceStart`. Every known caller passes zero.
pub const DEFAULT_START_MODE: i32 = 0;

/// Return value of a contact-frame callback that consumed the frame.
pub const CALLBACK_HANDLED: i32 = 0;

/// MultitouchSupport entry points.
pub mod mt_symbol {
    /// `MTDeviceRef MTDeviceCreateDefault(void)`
    pub const DEVICE_CREATE_DEFAULT: &[u8] = b"MTDeviceCreateDefault\0";
    /// `CFArrayRef MTDeviceCreateList(void)`
    pub const DEVICE_CREATE_LIST: &[u8] = b"MTDeviceCreateList\0";
    /// `void MTRegisterContactFrameCallback(MTDeviceRef, MTContactCallbackFunction)`
    pub const REGISTER_CONTACT_FRAME_CALLBACK: &[u8] = b"MTRegisterContactFrameCallback\0";
    /// `void MTDeviceStart(MTDeviceRef, int)`
    pub const DEVICE_START: &[u8] = b"MTDeviceStart\0";
    /// `void MTDeviceStop(MTDeviceRef)`
    pub const DEVICE_STOP: &[u8] = b"MTDeviceStop\0";

    /// Every entry point, in declaration order.
    pub const ALL: [&[u8]; 5] = [
        DEVICE_CREATE_DEFAULT,
        DEVICE_CREATE_LIST,
        REGISTER_CONTACT_FRAME_CALLBACK,
        DEVICE_START,
        DEVICE_STOP,
    ];
}

/// CoreFoundation helpers used on the device list.
pub mod cf_symbol {
    /// `CFIndex CFArrayGetCount(CFArrayRef)`
    pub const ARRAY_GET_COUNT: &[u8] = b"CFArrayGetCount\0";
    /// `const void *CFArrayGetValueAtIndex(CFArrayRef, CFIndex)`
    pub const ARRAY_GET_VALUE_AT_INDEX: &[u8] = b"CFArrayGetValueAtIndex\0";
    /// `void CFRelease(CFTypeRef)`
    pub const RELEASE: &[u8] = b"CFRelease\0";

    /// Every helper, in declaration order.
    pub const ALL: [&[u8]; 3] = [ARRAY_GET_COUNT, ARRAY_GET_VALUE_AT_INDEX, RELEASE];
}

/// Strip the trailing NUL from a symbol name for display.
#[must_use]
pub fn symbol_display_name(symbol: &[u8]) -> &str {
    let trimmed = symbol.strip_suffix(&[0u8]).unwrap_or(symbol);
    core::str::from_utf8(trimmed).unwrap_or("<non-utf8 symbol>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_nul() {
        assert_eq!(
            symbol_display_name(mt_symbol::DEVICE_START),
            "MTDeviceStart"
        );
        assert_eq!(
            symbol_display_name(cf_symbol::RELEASE),
            "CFRelease"
        );
    }

    #[test]
    fn test_display_name_without_nul() {
        assert_eq!(symbol_display_name(b"Plain"), "Plain");
    }

    #[test]
    fn test_start_mode_is_zero() {
        assert_eq!(DEFAULT_START_MODE, 0);
        assert_eq!(CALLBACK_HANDLED, 0);
    }

    #[test]
    fn test_paths_point_into_system_library() {
        assert!(MULTITOUCH_FRAMEWORK_PATH.starts_with("/System/Library/PrivateFrameworks/"));
        assert!(COREFOUNDATION_PATH.starts_with("/System/Library/Frameworks/"));
    }
}
