//! IOMobileFramebuffer-backed capability control
//!
//! Each attached display is driven by a framebuffer service in the IOKit
//! registry. Temporal dithering and uniformity compensation are framebuffer
//! properties (`enableDither`, `uniformity2D`); toggling a capability means
//! writing the matching property on the service behind the display.
//!
//! The property stores "enabled", while the user preference stores
//! "suppressed", so the value written is the negation of the preference.

use crate::config::Capability;
use crate::display::{CapabilityBackend, DisplayHandle};
use crate::error::{Result, StillscreenError, StringError};
use core_foundation::base::{CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::string::{CFString, CFStringRef};

/// kIOReturnUnsupported
const IO_RETURN_UNSUPPORTED: i32 = -536_870_201;

/// Framebuffer property name for a capability
fn framebuffer_key(capability: Capability) -> &'static str {
    match capability {
        Capability::Dithering => "enableDither",
        Capability::Uniformity2D => "uniformity2D",
    }
}

/// Capability backend writing IOMobileFramebuffer registry properties
#[derive(Default)]
pub struct IomfbBackend;

impl CapabilityBackend for IomfbBackend {
    #[expect(
        unsafe_code,
        reason = "IOKit FFI for framebuffer property control"
    )]
    fn set_display_capability(
        &self,
        display: DisplayHandle,
        capability: Capability,
        disabled: bool,
    ) -> Result<()> {
        let service = unsafe { CGDisplayIOServicePort(display.id) };
        if service == 0 {
            // No IOKit service behind this display; nothing to toggle
            return Err(StillscreenError::CapabilityUnsupported {
                display_id: display.id,
                capability,
            });
        }

        let key = CFString::from_static_string(framebuffer_key(capability));
        let value = if disabled {
            CFBoolean::false_value()
        } else {
            CFBoolean::true_value()
        };

        let status = unsafe {
            IORegistryEntrySetCFProperty(service, key.as_concrete_TypeRef(), value.as_CFTypeRef())
        };

        match status {
            0 => Ok(()),
            IO_RETURN_UNSUPPORTED => Err(StillscreenError::CapabilityUnsupported {
                display_id: display.id,
                capability,
            }),
            code => Err(StillscreenError::ApplicationFailed {
                display_id: display.id,
                capability,
                source: StringError::new(format!(
                    "IORegistryEntrySetCFProperty returned {code}"
                )),
            }),
        }
    }
}

// io_service_t is a mach port name (u32). CGDisplayIOServicePort is linked
// through CoreGraphics (pulled in by the core-graphics crate).
#[allow(unsafe_code)]
unsafe extern "C" {
    fn CGDisplayIOServicePort(display: u32) -> u32;
}

#[allow(unsafe_code)]
#[link(name = "IOKit", kind = "framework")]
unsafe extern "C" {
    fn IORegistryEntrySetCFProperty(
        entry: u32,
        property_name: CFStringRef,
        value: CFTypeRef,
    ) -> i32;
}
