//! Controller facade
//!
//! Composes the preference store, display enumeration, capability
//! application, and topology monitoring behind the API the presentation
//! layer consumes.

pub mod facade;

pub use facade::DisplayController;
