//! Capability application across a display set
//!
//! The applier is stateless apart from its backend handle: one pass is a
//! pure function from (capability, value, display set) to per-display
//! results. Partial success is the expected steady state for heterogeneous
//! fleets, so a failure on one display never aborts the pass and nothing is
//! rolled back.

use crate::config::Capability;
use crate::display::{CapabilityBackend, DisplayHandle, DisplaySet};
use crate::error::{Result, StillscreenError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of applying one capability value to one display
#[derive(Debug)]
pub struct ApplicationResult {
    /// The display the application was attempted on
    pub display: DisplayHandle,
    /// Success, or why the platform call did not take effect
    pub outcome: Result<()>,
}

impl ApplicationResult {
    /// Whether the platform accepted the toggle
    pub fn is_applied(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Whether the display simply lacks the capability
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self.outcome,
            Err(StillscreenError::CapabilityUnsupported { .. })
        )
    }
}

/// Applies preference values to displays through the platform primitive
pub struct CapabilityApplier {
    backend: Arc<dyn CapabilityBackend>,
}

impl CapabilityApplier {
    /// Create an applier over the given platform backend
    pub fn new(backend: Arc<dyn CapabilityBackend>) -> Self {
        Self { backend }
    }

    /// Apply one capability value to a single display
    pub fn apply_one(
        &self,
        capability: Capability,
        disabled: bool,
        display: DisplayHandle,
    ) -> ApplicationResult {
        let outcome = self
            .backend
            .set_display_capability(display, capability, disabled);

        let display_id = display.id;
        match &outcome {
            Ok(()) => debug!(
                "{capability} {} on display {}",
                if disabled { "suppressed" } else { "restored" },
                display_id
            ),
            Err(StillscreenError::CapabilityUnsupported { .. }) => {
                // Expected for external displays; not an error condition
                debug!("display {} does not support {capability}", display_id);
            }
            Err(e) => warn!("failed to apply {capability} to display {}: {e}", display_id),
        }

        ApplicationResult { display, outcome }
    }

    /// Apply one capability value to every display in the set
    ///
    /// Each display is attempted exactly once; failures are recorded in the
    /// returned results and the pass continues. No retries here; topology
    /// changes retry naturally through reapplication.
    pub fn apply_all(
        &self,
        capability: Capability,
        disabled: bool,
        displays: &DisplaySet,
    ) -> Vec<ApplicationResult> {
        if displays.is_empty() {
            debug!("no displays attached, {capability} pass is a no-op");
            return Vec::new();
        }

        displays
            .iter()
            .map(|&display| self.apply_one(capability, disabled, display))
            .collect()
    }
}
