//! Attached-display enumeration
//!
//! Handles are transient: they are borrowed from the platform for the
//! duration of one enumeration and must be refreshed after any topology
//! change. `current()` therefore never caches.

use crate::error::Result;
use smallvec::SmallVec;

#[cfg(target_os = "macos")]
use crate::error::{StillscreenError, StringError};

/// Transient reference to one attached physical display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayHandle {
    /// Platform display identifier (CGDirectDisplayID on macOS)
    pub id: u32,
    /// Whether this is the machine's built-in panel
    pub is_builtin: bool,
}

/// The set of displays attached at one point in time
///
/// Inline capacity covers the common fleet size; produced fresh on every
/// enumeration and never reused across a topology change.
pub type DisplaySet = SmallVec<[DisplayHandle; 4]>;

/// Source of the live attached-display set
pub trait DisplayEnumerator: Send + Sync {
    /// The displays attached right now
    ///
    /// Synchronous and side-effect-free; re-queries the platform on every
    /// call. An empty set is a valid result, not an error.
    fn current(&self) -> Result<DisplaySet>;
}

/// Enumerator over CoreGraphics active displays
#[cfg(target_os = "macos")]
pub struct CgDisplayEnumerator;

#[cfg(target_os = "macos")]
impl DisplayEnumerator for CgDisplayEnumerator {
    fn current(&self) -> Result<DisplaySet> {
        use core_graphics::display::CGDisplay;

        let ids = CGDisplay::active_displays().map_err(|code| {
            StillscreenError::EnumerationFailed(StringError::new(format!(
                "CGGetActiveDisplayList returned {code:?}"
            )))
        })?;

        Ok(ids
            .into_iter()
            .map(|id| DisplayHandle {
                id,
                is_builtin: CGDisplay::new(id).is_builtin(),
            })
            .collect())
    }
}
