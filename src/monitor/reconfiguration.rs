//! CoreGraphics display reconfiguration feed
//!
//! Forwards completed reconfiguration events (connect, disconnect,
//! resolution change, sleep/wake) into the debouncing observer. Delivery is
//! at-least-once and bursty; coalescing is the observer's job, this module
//! only bridges the callback.

use crate::error::{Result, StillscreenError, StringError};
use crate::monitor::NotificationSender;
use parking_lot::Mutex;
use std::ffi::c_void;
use tracing::{debug, info};

static REGISTERED_SENDER: Mutex<Option<NotificationSender>> = Mutex::new(None);

/// CGDisplayBeginConfigurationFlag
const BEGIN_CONFIGURATION: u32 = 1 << 0;

extern "C" fn reconfiguration_callback(_display: u32, flags: u32, _user_info: *mut c_void) {
    // Skip the "begin configuration" callback; enumeration only reflects the
    // new topology once the change has completed.
    if flags & BEGIN_CONFIGURATION != 0 {
        return;
    }

    debug!("display reconfiguration event (flags {flags:#x})");
    if let Some(sender) = REGISTERED_SENDER.lock().as_ref() {
        sender.notify();
    }
}

/// Register the reconfiguration callback, feeding the given sender
///
/// Callbacks are delivered while the registering thread runs its run loop.
#[expect(
    unsafe_code,
    reason = "CoreGraphics FFI for display reconfiguration callbacks"
)]
pub fn register(sender: NotificationSender) -> Result<()> {
    *REGISTERED_SENDER.lock() = Some(sender);

    let status = unsafe {
        CGDisplayRegisterReconfigurationCallback(reconfiguration_callback, std::ptr::null_mut())
    };
    if status != 0 {
        *REGISTERED_SENDER.lock() = None;
        return Err(StillscreenError::ObservationFailed(StringError::new(
            format!("CGDisplayRegisterReconfigurationCallback returned {status}"),
        )));
    }

    info!("registered for display reconfiguration notifications");
    Ok(())
}

/// Remove the reconfiguration callback and drop the sender
#[expect(
    unsafe_code,
    reason = "CoreGraphics FFI for display reconfiguration callbacks"
)]
pub fn unregister() {
    unsafe {
        let _ = CGDisplayRemoveReconfigurationCallback(
            reconfiguration_callback,
            std::ptr::null_mut(),
        );
    }
    *REGISTERED_SENDER.lock() = None;
    debug!("unregistered display reconfiguration callback");
}

// FFI declarations for CGDisplay reconfiguration
#[allow(unsafe_code)]
unsafe extern "C" {
    fn CGDisplayRegisterReconfigurationCallback(
        callback: extern "C" fn(u32, u32, *mut c_void),
        user_info: *mut c_void,
    ) -> i32;

    fn CGDisplayRemoveReconfigurationCallback(
        callback: extern "C" fn(u32, u32, *mut c_void),
        user_info: *mut c_void,
    ) -> i32;
}
