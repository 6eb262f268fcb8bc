//! Error types for `Stillscreen`
//!
//! This module defines all error types used throughout the application.
//! Variants preserve their underlying error source with `#[source]` so the
//! full chain stays visible in log output.

use crate::config::Capability;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `Stillscreen` operations
#[derive(Debug, Error)]
pub enum StillscreenError {
    /// The display's framebuffer does not expose the requested capability.
    ///
    /// Expected on heterogeneous display fleets; recorded per display and
    /// never surfaced to the user as an error.
    #[error("display {display_id} does not support {capability}")]
    CapabilityUnsupported {
        /// Platform identifier of the display that lacks the capability
        display_id: u32,
        /// The capability that could not be toggled
        capability: Capability,
    },

    /// The platform rejected the capability toggle for another reason
    #[error("failed to apply {capability} to display {display_id}: {source}")]
    ApplicationFailed {
        /// Platform identifier of the display the toggle was attempted on
        display_id: u32,
        /// The capability that was being toggled
        capability: Capability,
        /// Underlying platform error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Querying the platform for the attached display set failed
    #[error("display enumeration failed: {0}")]
    EnumerationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Registering for display reconfiguration notifications failed
    #[error("display change observation failed: {0}")]
    ObservationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Preference load/save failed; the store degrades to in-memory values
    #[error("preference persistence unavailable: {0}")]
    PersistenceUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging setup failed
    #[error("logging initialization failed: {0}")]
    LoggingInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `Stillscreen` operations
pub type Result<T> = std::result::Result<T, StillscreenError>;
