//! Display topology change monitoring
//!
//! [`change_observer`] owns the debounce worker; [`reconfiguration`] bridges
//! the CoreGraphics notification feed into it on macOS.

pub mod change_observer;

#[cfg(target_os = "macos")]
pub mod reconfiguration;

pub use change_observer::{
    DisplayChangeObserver, NotificationSender, DEFAULT_QUIESCENCE_WINDOW,
};
