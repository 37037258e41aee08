//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::{Difficulty, ServeMode};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected on the welcome screen, applied to the next match
    pub difficulty: Difficulty,
    /// Direction of the serve after a point
    pub serve_mode: ServeMode,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Pause a running match when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            serve_mode: ServeMode::Random,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pong_settings";

    /// Gain the audio manager applies to every sound effect
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            clamp_volume(self.master_volume) * clamp_volume(self.sfx_volume)
        }
    }

    /// Pull volumes back into range after loading
    pub fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }

    /// Load settings from LocalStorage, defaults when absent or corrupt
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.serve_mode, ServeMode::Random);
        assert!(settings.pause_on_blur);
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_mute_silences() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_effective_volume_is_clamped() {
        let settings = Settings {
            master_volume: 4.0,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.5);
        let settings = Settings {
            master_volume: -1.0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"difficulty":"hard","serve_mode":"toward_scorer"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.serve_mode, ServeMode::TowardScorer);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(storage::decode::<Settings>("k", r#"{"difficulty":"insane"}"#).is_none());
    }

    #[test]
    fn test_sanitized_clamps_volumes() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: f32::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
