//! Player preferences
//!
//! Persisted separately from tuning as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// All audio silenced (toggled by the Mute action)
    pub muted: bool,
    /// Silence the sizzle loop while paused
    pub mute_on_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_pause: true,
        }
    }
}

impl Settings {
    /// Default file name next to the executable
    pub const FILE_NAME: &'static str = "melt_runner_settings.json";

    /// Volume actually sent to the audio collaborator
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {err}");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("melt_runner_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.0);
        settings.toggle_mute();
        settings.master_volume = 3.0;
        assert_eq!(settings.effective_volume(), 1.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("settings_save");
        let settings = Settings {
            master_volume: 0.25,
            muted: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let path = temp_path("settings_corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::try_load(&path), Err(ConfigError::Json(_))));
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);

        let missing = temp_path("settings_missing");
        assert!(matches!(Settings::try_load(&missing), Err(ConfigError::Io { .. })));
        assert_eq!(Settings::load(&missing), Settings::default());
    }
}
