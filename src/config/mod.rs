//! Preference model and storage
//!
//! See [`models`] for the capability set and [`store`] for persistence and
//! change notification.

pub mod models;
pub mod store;

pub use models::{Capability, Preferences};
pub use store::PreferenceStore;
