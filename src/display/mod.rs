//! Display enumeration and capability application
//!
//! The platform seams live here: [`DisplayEnumerator`] answers "which
//! displays are attached right now", and [`CapabilityBackend`] toggles one
//! capability on one display. [`applier::CapabilityApplier`] walks a display
//! set through a backend, tolerating per-display failures.

pub mod applier;
pub mod enumerator;

#[cfg(target_os = "macos")]
pub mod iomfb;

pub use applier::{ApplicationResult, CapabilityApplier};
pub use enumerator::{DisplayEnumerator, DisplayHandle, DisplaySet};

#[cfg(target_os = "macos")]
pub use enumerator::CgDisplayEnumerator;
#[cfg(target_os = "macos")]
pub use iomfb::IomfbBackend;

use crate::config::Capability;
use crate::error::Result;

/// Low-level capability-control primitive provided by the host platform
///
/// The call is synchronous and must not affect any display other than the
/// one named. Retry policy belongs to the caller; topology changes naturally
/// retry through reapplication.
pub trait CapabilityBackend: Send + Sync {
    /// Toggle one capability on one display
    ///
    /// `disabled` = true suppresses the rendering behavior.
    fn set_display_capability(
        &self,
        display: DisplayHandle,
        capability: Capability,
        disabled: bool,
    ) -> Result<()>;
}
