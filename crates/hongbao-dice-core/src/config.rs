//! Game configuration
//!
//! Every field has a serde default so a config file only needs the values it
//! changes.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::animation::{EXTRA_TURNS, ROLL_DURATION};
use crate::face::Orientation;

/// Errors from loading or validating a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_roll_duration_ms")]
    pub roll_duration_ms: u64,

    /// Pause between the last die landing and the result panel appearing
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    #[serde(default = "default_min_extra_turns")]
    pub min_extra_turns: u8,

    #[serde(default = "default_max_extra_turns")]
    pub max_extra_turns: u8,

    /// Resting pose of every die before it is rolled
    #[serde(default = "default_idle_pose")]
    pub idle_pose: Orientation,

    #[serde(default = "default_share_url")]
    pub share_url: String,

    #[serde(default = "default_screenshot_file_name")]
    pub screenshot_file_name: String,

    /// Save screenshots here instead of asking with a file dialog
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Fixed RNG seed for reproducible games
    #[serde(default)]
    pub seed: Option<u64>,

    /// Font asset (relative to the assets folder) able to render the place labels
    #[serde(default)]
    pub font: Option<String>,
}

fn default_roll_duration_ms() -> u64 {
    ROLL_DURATION.as_millis() as u64
}
fn default_reveal_delay_ms() -> u64 {
    500
}
fn default_min_extra_turns() -> u8 {
    *EXTRA_TURNS.start()
}
fn default_max_extra_turns() -> u8 {
    *EXTRA_TURNS.end()
}
fn default_idle_pose() -> Orientation {
    Orientation::new(-20.0, 20.0)
}
fn default_share_url() -> String {
    "https://www.facebook.com/".to_string()
}
fn default_screenshot_file_name() -> String {
    "新年擲骰子結果.png".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            roll_duration_ms: default_roll_duration_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            min_extra_turns: default_min_extra_turns(),
            max_extra_turns: default_max_extra_turns(),
            idle_pose: default_idle_pose(),
            share_url: default_share_url(),
            screenshot_file_name: default_screenshot_file_name(),
            download_dir: None,
            seed: None,
            font: None,
        }
    }
}

impl GameConfig {
    pub fn roll_duration(&self) -> Duration {
        Duration::from_millis(self.roll_duration_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Extra turns range, never empty even for a config `validate` would reject.
    pub fn extra_turns(&self) -> RangeInclusive<u8> {
        let min = self.min_extra_turns.max(1);
        min..=self.max_extra_turns.max(min)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `path` if given, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config; failed to load {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roll_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "roll_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.min_extra_turns == 0 {
            return Err(ConfigError::Invalid {
                field: "min_extra_turns",
                reason: "must be at least one full turn".to_string(),
            });
        }
        if self.min_extra_turns > self.max_extra_turns {
            return Err(ConfigError::Invalid {
                field: "max_extra_turns",
                reason: format!(
                    "{} is below min_extra_turns ({})",
                    self.max_extra_turns, self.min_extra_turns
                ),
            });
        }
        if self.screenshot_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "screenshot_file_name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.roll_duration(), Duration::from_millis(1200));
        assert_eq!(config.reveal_delay(), Duration::from_millis(500));
        assert_eq!(config.extra_turns(), 3..=4);
        assert_eq!(config.idle_pose, Orientation::new(-20.0, 20.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "roll_duration_ms": 300, "seed": 9 }"#).unwrap();
        assert_eq!(config.roll_duration_ms, 300);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.reveal_delay_ms, 500);
        assert_eq!(config.share_url, "https://www.facebook.com/");
    }

    #[test]
    fn test_rejects_inverted_turn_range() {
        let err = GameConfig::from_json(r#"{ "min_extra_turns": 5, "max_extra_turns": 2 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_extra_turns", .. }));
    }

    #[test]
    fn test_extra_turns_never_empty() {
        let config = GameConfig {
            min_extra_turns: 4,
            max_extra_turns: 3,
            ..GameConfig::default()
        };
        assert_eq!(config.extra_turns(), 4..=4);

        let config = GameConfig {
            min_extra_turns: 0,
            max_extra_turns: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.extra_turns(), 1..=1);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = GameConfig::from_json(r#"{ "roll_duration_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "roll_duration_ms", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "reveal_delay_ms": 0 }}"#).unwrap();
        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.reveal_delay(), Duration::ZERO);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(Some(&dir.path().join("missing.json")));
        assert_eq!(config, GameConfig::default());
        assert_eq!(GameConfig::load_or_default(None), GameConfig::default());
    }

    #[test]
    fn test_broken_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
