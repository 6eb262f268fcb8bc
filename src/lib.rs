//! `Stillscreen` - display dithering and uniformity control for macOS
//!
//! Suppresses temporal dithering and edge-uniformity brightness compensation
//! on attached displays and keeps that suppression consistent as displays are
//! connected, disconnected, put to sleep, or reconfigured. The
//! [`controller::DisplayController`] composes the preference store, display
//! enumeration, capability application, and a debounced topology observer;
//! the platform primitives sit behind narrow traits in [`display`].

// Module declarations
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod monitor;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{Result, StillscreenError};
