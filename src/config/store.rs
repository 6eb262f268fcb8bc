//! Preference store with persistence and change notification
//!
//! Preferences live in ~/Library/Application Support/Stillscreen/preferences.json
//! (override with `STILLSCREEN_DATA_DIR`). Writes are atomic to prevent
//! corruption; loads are lenient so a missing or corrupt file never keeps the
//! application from starting.

use crate::config::models::{Capability, Preferences};
use crate::error::{Result, StillscreenError, StringError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Callback invoked after a preference change has been persisted
type Subscriber = Box<dyn Fn(Capability, bool) + Send + Sync>;

/// Single owner of the preference state
///
/// `set` persists the new value before returning and then synchronously
/// notifies subscribers. A single lock is held across the update, the save,
/// and the notifications, so concurrent setters observe one total order and
/// notifications for a capability are delivered in `set`-call order.
/// Subscribers must be quick and must not call back into the store.
pub struct PreferenceStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    prefs: Preferences,
    subscribers: Vec<Subscriber>,
}

impl PreferenceStore {
    /// Directory the preference file lives in
    ///
    /// Honors `STILLSCREEN_DATA_DIR` (used by tests), falling back to
    /// ~/Library/Application Support/Stillscreen.
    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("STILLSCREEN_DATA_DIR") {
            return PathBuf::from(dir);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Application Support/Stillscreen")
    }

    /// Default path of the preference file
    pub fn default_path() -> PathBuf {
        Self::data_dir().join("preferences.json")
    }

    /// Open the store at the default location
    pub fn open() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Open the store backed by the given file
    ///
    /// A missing or unparseable file falls back to defaults; persistence
    /// failure is never fatal here or later, since the toggles must remain
    /// usable even when settings cannot be saved.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match Self::read_file(&path) {
            Ok(Some(prefs)) => {
                info!("Preferences loaded from {}", path.display());
                prefs
            }
            Ok(None) => {
                info!("Preference file not found, using defaults");
                Preferences::default()
            }
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {e}");
                Preferences::default()
            }
        };

        Self {
            path,
            inner: Mutex::new(Inner {
                prefs,
                subscribers: Vec::new(),
            }),
        }
    }

    fn read_file(path: &Path) -> Result<Option<Preferences>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Current value for one capability
    pub fn get(&self, capability: Capability) -> bool {
        self.inner.lock().prefs.get(capability)
    }

    /// Snapshot of the full preference state
    pub fn preferences(&self) -> Preferences {
        self.inner.lock().prefs
    }

    /// Update one capability, persist, then notify subscribers
    ///
    /// A failed save degrades to the in-memory value and is retried on the
    /// next mutation, since every save writes the full state.
    pub fn set(&self, capability: Capability, disabled: bool) {
        let mut inner = self.inner.lock();
        inner.prefs.set(capability, disabled);

        if let Err(e) = self.persist(&inner.prefs) {
            warn!(
                "Failed to save preferences: {e}. Continuing with in-memory values; \
                 the next change will retry the save."
            );
        }

        debug!("Preference {capability} set to disabled={disabled}");
        for subscriber in &inner.subscribers {
            subscriber(capability, disabled);
        }
    }

    /// Register a callback for preference changes made through any caller
    pub fn subscribe(&self, subscriber: impl Fn(Capability, bool) + Send + Sync + 'static) {
        self.inner.lock().subscribers.push(Box::new(subscriber));
    }

    /// Atomic write: write to a temp file in the same directory, then rename
    fn persist(&self, prefs: &Preferences) -> Result<()> {
        let dir = self.path.parent().ok_or_else(|| {
            StillscreenError::PersistenceUnavailable(StringError::new(
                "preference path has no parent directory",
            ))
        })?;
        std::fs::create_dir_all(dir)?;

        let temp_path = dir.join("preferences.json.tmp");
        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(temp_path, &self.path)?;
        Ok(())
    }
}
