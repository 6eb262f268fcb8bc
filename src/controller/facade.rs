//! Display controller facade
//!
//! One explicitly constructed `DisplayController` replaces any ambient
//! shared state: the process entry point builds it and hands it (or its
//! subscription) to the presentation layer.
//!
//! Two entry points run concurrently against the controller: UI-originated
//! `set_preference` calls and the debounced topology-change callback.
//! Preference state is serialized inside the store; application passes are
//! idempotent for a given (capability, value) pair, so overlapping passes
//! converge without mutual exclusion.

use crate::config::{Capability, PreferenceStore};
use crate::display::{CapabilityApplier, CapabilityBackend, DisplayEnumerator};
use crate::monitor::{DisplayChangeObserver, NotificationSender, DEFAULT_QUIESCENCE_WINDOW};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Composes preferences, enumeration, application, and topology monitoring
///
/// Lifecycle: construction runs the first apply pass and wires the topology
/// observer (Initializing), after which the controller accepts calls
/// (Running) until [`DisplayController::shutdown`] tears the observer down
/// (ShuttingDown); calls after shutdown are ignored with a warning.
pub struct DisplayController {
    store: Arc<PreferenceStore>,
    enumerator: Arc<dyn DisplayEnumerator>,
    applier: CapabilityApplier,
    observer: Mutex<Option<DisplayChangeObserver>>,
    running: AtomicBool,
}

impl DisplayController {
    /// Build a controller with the default debounce window
    pub fn new(
        store: Arc<PreferenceStore>,
        enumerator: Arc<dyn DisplayEnumerator>,
        backend: Arc<dyn CapabilityBackend>,
    ) -> Arc<Self> {
        Self::with_quiescence_window(store, enumerator, backend, DEFAULT_QUIESCENCE_WINDOW)
    }

    /// Build a controller with an explicit debounce window
    pub fn with_quiescence_window(
        store: Arc<PreferenceStore>,
        enumerator: Arc<dyn DisplayEnumerator>,
        backend: Arc<dyn CapabilityBackend>,
        window: Duration,
    ) -> Arc<Self> {
        let controller = Arc::new(Self {
            store,
            enumerator,
            applier: CapabilityApplier::new(backend),
            observer: Mutex::new(None),
            running: AtomicBool::new(true),
        });

        // Bring every display in line with persisted preferences before any
        // topology event can interleave.
        controller.apply_pass("startup");

        let weak = Arc::downgrade(&controller);
        let observer = DisplayChangeObserver::with_window(window, move || {
            if let Some(controller) = weak.upgrade() {
                controller.reapply_all();
            }
        });
        *controller.observer.lock() = Some(observer);

        info!("display controller running");
        controller
    }

    /// Current value of one preference
    pub fn get_preference(&self, capability: Capability) -> bool {
        self.store.get(capability)
    }

    /// Record a preference and apply it to every attached display
    ///
    /// The observable preference changes synchronously; per-display
    /// success or failure is logged, not surfaced. The caller's contract is
    /// "the preference was recorded", not "every display honored it".
    pub fn set_preference(&self, capability: Capability, disabled: bool) {
        if !self.running.load(Ordering::SeqCst) {
            warn!("set_preference({capability}) ignored: controller is shut down");
            return;
        }

        self.store.set(capability, disabled);
        self.apply_capability(capability, disabled);
    }

    /// Register a callback for preference changes made through any caller
    pub fn subscribe(&self, subscriber: impl Fn(Capability, bool) + Send + Sync + 'static) {
        self.store.subscribe(subscriber);
    }

    /// Re-apply both capabilities' current values to the current display set
    ///
    /// Invoked by the debounced topology-change callback; also callable
    /// directly by a host that has its own reason to resynchronize.
    pub fn reapply_all(&self) {
        if !self.running.load(Ordering::SeqCst) {
            warn!("reapply_all ignored: controller is shut down");
            return;
        }

        info!("display topology changed, reapplying preferences");
        self.apply_pass("reapply");
    }

    /// Handle for wiring the platform notification feed to this controller
    ///
    /// `None` once the controller has shut down.
    pub fn notification_sender(&self) -> Option<NotificationSender> {
        self.observer.lock().as_ref().map(DisplayChangeObserver::sender)
    }

    /// Stop accepting calls and tear down the topology observer
    ///
    /// Dropping the observer cancels any pending debounced reapplication;
    /// an application pass already in flight runs to completion.
    pub fn shutdown(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            let observer = self.observer.lock().take();
            drop(observer);
            info!("display controller shut down");
        }
    }

    /// One full walk over the current display set for every capability
    fn apply_pass(&self, reason: &str) {
        let displays = match self.enumerator.current() {
            Ok(displays) => displays,
            Err(e) => {
                warn!("skipping {reason} pass, display enumeration failed: {e}");
                return;
            }
        };

        let prefs = self.store.preferences();
        for capability in Capability::ALL {
            let disabled = prefs.get(capability);
            let results = self.applier.apply_all(capability, disabled, &displays);
            let applied = results.iter().filter(|r| r.is_applied()).count();
            info!(
                "{reason}: {capability} disabled={disabled} on {applied}/{} display(s)",
                results.len()
            );
        }
    }

    fn apply_capability(&self, capability: Capability, disabled: bool) {
        let displays = match self.enumerator.current() {
            Ok(displays) => displays,
            Err(e) => {
                warn!("skipping {capability} application, display enumeration failed: {e}");
                return;
            }
        };

        let results = self.applier.apply_all(capability, disabled, &displays);
        let applied = results.iter().filter(|r| r.is_applied()).count();
        info!(
            "{capability} disabled={disabled} applied to {applied}/{} display(s)",
            results.len()
        );
    }
}
