//! Field settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web, defaults elsewhere.

use serde::{Deserialize, Serialize};

use crate::consts::SHAPE_COUNT;
use crate::sim::BoundsMode;

/// Field preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Shapes in the field
    pub shape_count: usize,
    /// Boundary handling at the viewport edges
    pub mode: BoundsMode,
    /// Shapes drift toward the pointer
    pub cursor_attraction: bool,
    /// Burst effect on breakpoint crossings
    pub bursts: bool,
    /// Force reduced motion regardless of the host preference
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape_count: SHAPE_COUNT,
            mode: BoundsMode::Bounce,
            cursor_attraction: true,
            bursts: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Reduced motion applies when either the user forced it here or the
    /// host reports the accessibility preference
    pub fn effective_reduced_motion(&self, host_pref: bool) -> bool {
        self.reduced_motion || host_pref
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "drift_field_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        // First visit: persist the defaults so later sessions start from a
        // stored record
        let settings = Self::default();
        settings.save();
        log::info!("Using default settings");
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
