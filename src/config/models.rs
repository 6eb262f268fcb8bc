//! Preference data models
//!
//! This module defines the capability set and the preference state that is
//! persisted across restarts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A toggleable display-rendering behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Temporal dithering: rapid per-frame color variation used to simulate
    /// intermediate shades
    Dithering,
    /// Edge-uniformity brightness compensation on built-in panels
    Uniformity2D,
}

impl Capability {
    /// Every capability the controller knows about
    pub const ALL: [Self; 2] = [Self::Dithering, Self::Uniformity2D];

    /// Default "suppressed" value when no persisted preference exists
    pub fn default_disabled(self) -> bool {
        match self {
            Self::Dithering => true,
            Self::Uniformity2D => false,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dithering => write!(f, "dithering"),
            Self::Uniformity2D => write!(f, "uniformity2D"),
        }
    }
}

/// User preference state: one "disabled" flag per capability
///
/// "Disabled" = true means the rendering behavior is suppressed. Per-field
/// serde defaults keep the state fully defined for every capability even when
/// a field is missing from an older preference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether temporal dithering is suppressed
    #[serde(default = "default_disable_dithering")]
    pub disable_dithering: bool,
    /// Whether uniformity compensation is suppressed
    #[serde(default)]
    pub disable_uniformity_2d: bool,
}

fn default_disable_dithering() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            disable_dithering: true,
            disable_uniformity_2d: false,
        }
    }
}

impl Preferences {
    /// Read the flag for one capability
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::Dithering => self.disable_dithering,
            Capability::Uniformity2D => self.disable_uniformity_2d,
        }
    }

    /// Update the flag for one capability
    pub fn set(&mut self, capability: Capability, disabled: bool) {
        match capability {
            Capability::Dithering => self.disable_dithering = disabled,
            Capability::Uniformity2D => self.disable_uniformity_2d = disabled,
        }
    }
}
