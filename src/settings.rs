//! Player preferences
//!
//! Persisted as JSON under the `settings` key. Out-of-range values are
//! healed on load and written back.

use serde::{Deserialize, Serialize};

use crate::persistence::{Store, keys, write_or_warn};

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
        }
    }
}

/// Clamp into [0, 1]; non-finite values fall back to `default`
fn heal_volume(value: &mut f32, default: f32) -> bool {
    let healed = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default
    };
    let changed = healed != *value;
    *value = healed;
    changed
}

impl Settings {
    /// Repair invalid values in place. Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        let defaults = Settings::default();
        let mut changed = heal_volume(&mut self.master_volume, defaults.master_volume);
        changed |= heal_volume(&mut self.music_volume, defaults.music_volume);
        changed |= heal_volume(&mut self.sfx_volume, defaults.sfx_volume);
        changed
    }

    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music gain
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Load settings, healing corrupt or out-of-range values
    pub fn load(store: &mut dyn Store) -> Self {
        let Some(json) = store.get(keys::SETTINGS) else {
            log::info!("Using default settings");
            return Self::default();
        };

        let mut settings = match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Corrupt settings ({}), restoring defaults", e);
                let settings = Self::default();
                settings.save(store);
                return settings;
            }
        };

        if settings.sanitize() {
            log::warn!("Settings out of range, repaired");
            settings.save(store);
        } else {
            log::info!("Loaded settings");
        }
        settings
    }

    pub fn save(&self, store: &mut dyn Store) {
        match serde_json::to_string(self) {
            Ok(json) => write_or_warn(store, keys::SETTINGS, &json),
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_settings_use_defaults() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&mut store), Settings::default());
        assert!(store.get(keys::SETTINGS).is_none());
    }

    #[test]
    fn test_roundtrip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            master_volume: 0.3,
            muted: true,
            ..Default::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&mut store), settings);
    }

    #[test]
    fn test_out_of_range_volume_heals_and_rewrites() {
        let mut store =
            MemoryStore::new().with(keys::SETTINGS, r#"{"master_volume":3.5,"sfx_volume":-1.0}"#);
        let settings = Settings::load(&mut store);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);

        let stored: Settings = serde_json::from_str(&store.get(keys::SETTINGS).unwrap()).unwrap();
        assert_eq!(stored, settings);
    }

    #[test]
    fn test_corrupt_json_restores_defaults() {
        let mut store = MemoryStore::new().with(keys::SETTINGS, "{{{{");
        assert_eq!(Settings::load(&mut store), Settings::default());
        let stored: Settings = serde_json::from_str(&store.get(keys::SETTINGS).unwrap()).unwrap();
        assert_eq!(stored, Settings::default());
    }

    #[test]
    fn test_non_finite_volume_uses_default() {
        let mut settings = Settings {
            music_volume: f32::NAN,
            ..Default::default()
        };
        assert!(settings.sanitize());
        assert_eq!(settings.music_volume, Settings::default().music_volume);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
