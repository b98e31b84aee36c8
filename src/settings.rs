//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::platform::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Auto-pause ===
    /// Pause when the tab is hidden
    pub pause_on_hidden: bool,
    /// Pause when the window loses focus
    pub pause_on_blur: bool,
    /// Pause touch devices held in landscape
    pub pause_on_landscape: bool,

    // === Input ===
    /// Holding a jump key keeps flapping while Wings is active
    pub hold_to_flap: bool,

    // === Notifications ===
    /// Show toast messages
    pub toasts: bool,
    /// Default toast lifetime
    pub toast_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pause_on_hidden: true,
            pause_on_blur: false,
            pause_on_landscape: true,

            hold_to_flap: true,

            toasts: true,
            toast_ms: 900,
        }
    }
}

impl Settings {
    /// Load settings; anything missing or unreadable uses defaults
    pub fn load_from(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(SETTINGS_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings, writing the defaults on first run so they can be edited
    pub fn load_or_init(store: &mut impl KeyValueStore) -> Self {
        let first_run = store.get(SETTINGS_KEY).is_none();
        let settings = Self::load_from(store);
        if first_run {
            if let Err(e) = settings.save_to(store) {
                log::warn!("Could not store default settings: {e}");
            }
        }
        settings
    }

    pub fn save_to(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        store.set(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            pause_on_blur: true,
            toast_ms: 1500,
            ..Default::default()
        };
        settings.save_to(&mut store).unwrap();
        assert_eq!(Settings::load_from(&store), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, r#"{ "toasts": false }"#).unwrap();
        let settings = Settings::load_from(&store);
        assert!(!settings.toasts);
        assert!(settings.pause_on_hidden);
        assert_eq!(settings.toast_ms, 900);
    }

    #[test]
    fn test_first_run_writes_defaults_once() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load_or_init(&mut store), Settings::default());
        assert!(store.get(SETTINGS_KEY).is_some());
        let writes = store.writes;

        // Existing (even customised) settings are left alone
        store.set(SETTINGS_KEY, r#"{ "toast_ms": 400 }"#).unwrap();
        let settings = Settings::load_or_init(&mut store);
        assert_eq!(settings.toast_ms, 400);
        assert_eq!(store.writes, writes + 1);
    }

    #[test]
    fn test_garbage_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{{{").unwrap();
        assert_eq!(Settings::load_from(&store), Settings::default());
    }
}
