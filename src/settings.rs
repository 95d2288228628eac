//! Game settings and preferences
//!
//! Stored as a JSON file next to the binary or wherever the caller points.
//! Game balance is nested under `tuning`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Run ===
    /// Fixed seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Ticks the headless demo runs before exiting
    pub demo_ticks: u32,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            seed: None,
            // 30 seconds at 60 Hz
            demo_ticks: 1800,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Volume for sound effects after master and mute
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Volume for music after master and mute
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Read and validate settings from a JSON file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> ConfigResult<()> {
        let volumes = [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ];
        for (name, volume) in volumes {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0..=1, got {volume}"
                )));
            }
        }
        self.tuning.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "shuriken_sundown_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.4).abs() < 1e-6);

        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::default();
        settings.seed = Some(42);
        settings.demo_ticks = 600;
        settings.tuning.kill_bonus = 80;

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "muted": true, "tuning": { "gravity": 1.0 } }"#).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(loaded.muted);
        assert_eq!(loaded.demo_ticks, 1800);
        assert_eq!(loaded.tuning.starting_lives, 3);
        assert!((loaded.tuning.gravity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from(&temp_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_out_of_range_volume_rejected() {
        let path = temp_path("loud");
        fs::write(&path, r#"{ "master_volume": 3.0 }"#).unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let loaded = Settings::load(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, Settings::default());
        assert_eq!(Settings::load(None), Settings::default());
    }
}
