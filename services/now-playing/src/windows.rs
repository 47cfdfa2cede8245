//!
//! src/windows.rs  Andrew Belles  Oct 19th, 2026
//!
//! Lists on-screen windows and picks the one owned by the target app.
//! The Quartz listing needs screen recording permission on macOS, without
//! it titles come back empty.
//!

use crate::errors::NowPlayingError;
use crate::types::WindowRecord;

pub trait WindowSource {
    /// Every on-screen window, front to back as the OS orders them
    fn on_screen_windows(&self) -> Result<Vec<WindowRecord>, NowPlayingError>;
}

/// First window whose owner matches exactly
pub fn locate<'a>(windows: &'a [WindowRecord], owner: &str) -> Option<&'a WindowRecord> {
    windows.iter().find(|w| w.owner == owner)
}

#[cfg(target_os = "macos")]
mod quartz {
    use core_foundation::base::{CFType, TCFType};
    use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
    use core_foundation::string::CFString;
    use core_graphics::window::{
        copy_window_info, kCGNullWindowID, kCGWindowListOptionOnScreenOnly,
        kCGWindowName, kCGWindowOwnerName
    };
    use tracing::warn;

    use super::WindowSource;
    use crate::errors::NowPlayingError;
    use crate::types::WindowRecord;

    pub struct QuartzWindows;

    fn string_field(info: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<String> {
        info.find(key)
            .and_then(|value| value.downcast::<CFString>())
            .map(|s| s.to_string())
    }

    impl WindowSource for QuartzWindows {
        fn on_screen_windows(&self) -> Result<Vec<WindowRecord>, NowPlayingError> {
            let Some(listing) = copy_window_info(
                kCGWindowListOptionOnScreenOnly, kCGNullWindowID
            ) else {
                warn!("windows.null_listing");
                return Ok(Vec::new());
            };

            // SAFETY: CoreGraphics exports these as immutable CFString constants
            let (owner_key, name_key) = unsafe {(
                CFString::wrap_under_get_rule(kCGWindowOwnerName),
                CFString::wrap_under_get_rule(kCGWindowName)
            )};

            let records = listing.iter().map(|entry| {
                // SAFETY: every element of the window list is a CFDictionary
                let info: CFDictionary<CFString, CFType> = unsafe {
                    CFDictionary::wrap_under_get_rule(*entry as CFDictionaryRef)
                };
                WindowRecord {
                    owner: string_field(&info, &owner_key).unwrap_or_default(),
                    title: string_field(&info, &name_key)
                }
            }).collect();

            Ok(records)
        }
    }
}

/// The platform window list, or the missing-capability error where there
/// is no Quartz to ask
#[cfg(target_os = "macos")]
pub fn system_source(_capability: &str) -> Result<Box<dyn WindowSource>, NowPlayingError> {
    Ok(Box::new(quartz::QuartzWindows))
}

#[cfg(not(target_os = "macos"))]
pub fn system_source(capability: &str) -> Result<Box<dyn WindowSource>, NowPlayingError> {
    Err(NowPlayingError::Capability(capability.to_string()))
}
