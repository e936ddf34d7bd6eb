//! Runtime settings for the headless runner
//!
//! Gameplay constants are fixed; settings only cover how a run is hosted.
//! Stored as JSON; any missing key falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SettingsError;
use crate::sim::Bounds;

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen size in pixels
    pub screen_width: f32,
    pub screen_height: f32,
    /// RNG seed; None picks one from the clock
    pub seed: Option<u64>,
    /// Longest real frame fed to the fixed-step loop (seconds)
    pub max_frame_dt: f32,
    /// Length of a headless run (seconds of simulated time)
    pub run_seconds: f32,
    /// Dump a JSON snapshot of the final state
    pub dump_snapshot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            seed: None,
            max_frame_dt: 0.1,
            run_seconds: 60.0,
            dump_snapshot: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "screen_width/screen_height",
                reason: "must be positive",
            });
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "max_frame_dt",
                reason: "must be positive",
            });
        }
        if self.run_seconds < 0.0 {
            return Err(SettingsError::Invalid {
                field: "run_seconds",
                reason: "must not be negative",
            });
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "run_seconds": 5.0 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.run_seconds, 5.0);
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
        assert!(!settings.dump_snapshot);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "screen_width": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }
}
