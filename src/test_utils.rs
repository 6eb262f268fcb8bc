//! Shared test doubles for unit tests
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::config::Capability;
use crate::display::{CapabilityBackend, DisplayEnumerator, DisplayHandle, DisplaySet};
use crate::error::{Result, StillscreenError, StringError};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Build a plain external-display handle
pub fn handle(id: u32) -> DisplayHandle {
    DisplayHandle {
        id,
        is_builtin: false,
    }
}

/// Backend that records every platform call
///
/// Configure `unsupported` / `failing` before sharing to inject per-display
/// outcomes.
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<(u32, Capability, bool)>>,
    /// Displays that report the capability as unsupported
    pub unsupported: HashSet<u32>,
    /// Displays whose platform call fails outright
    pub failing: HashSet<u32>,
}

impl MockBackend {
    /// Every call recorded so far, in order
    pub fn recorded(&self) -> Vec<(u32, Capability, bool)> {
        self.calls.lock().clone()
    }

    /// Forget recorded calls (e.g. after a startup pass)
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl CapabilityBackend for MockBackend {
    fn set_display_capability(
        &self,
        display: DisplayHandle,
        capability: Capability,
        disabled: bool,
    ) -> Result<()> {
        self.calls.lock().push((display.id, capability, disabled));

        if self.unsupported.contains(&display.id) {
            return Err(StillscreenError::CapabilityUnsupported {
                display_id: display.id,
                capability,
            });
        }
        if self.failing.contains(&display.id) {
            return Err(StillscreenError::ApplicationFailed {
                display_id: display.id,
                capability,
                source: StringError::new("injected failure"),
            });
        }
        Ok(())
    }
}

/// Enumerator over a mutable display list, for topology-change tests
#[derive(Default)]
pub struct MockEnumerator {
    displays: Mutex<DisplaySet>,
    fail: bool,
}

impl MockEnumerator {
    /// Enumerator reporting the given display ids
    pub fn with_displays(ids: &[u32]) -> Self {
        let enumerator = Self::default();
        enumerator.set_displays(ids);
        enumerator
    }

    /// Enumerator whose every `current()` call fails
    pub fn failing() -> Self {
        Self {
            displays: Mutex::new(DisplaySet::new()),
            fail: true,
        }
    }

    /// Replace the reported topology
    pub fn set_displays(&self, ids: &[u32]) {
        *self.displays.lock() = ids.iter().map(|&id| handle(id)).collect();
    }
}

impl DisplayEnumerator for MockEnumerator {
    fn current(&self) -> Result<DisplaySet> {
        if self.fail {
            return Err(StillscreenError::EnumerationFailed(StringError::new(
                "injected enumeration failure",
            )));
        }
        Ok(self.displays.lock().clone())
    }
}
