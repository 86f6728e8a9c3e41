//! Application settings
//!
//! Wraps the core `GameConfig` as a Bevy resource and applies command-line
//! overrides on top of the loaded file.

use bevy::prelude::*;
use std::path::Path;

use hongbao_dice_core::GameConfig;

/// Resource holding the active game configuration
#[derive(Resource, Debug, Clone, Default)]
pub struct GameSettings {
    pub config: GameConfig,
}

impl GameSettings {
    /// Load settings from `path` (defaults when absent), then apply overrides.
    pub fn load(path: Option<&Path>, seed: Option<u64>) -> Self {
        let mut config = GameConfig::load_or_default(path);
        if seed.is_some() {
            config.seed = seed;
        }
        info!(
            "Roll duration {} ms, reveal delay {} ms, seed {:?}",
            config.roll_duration_ms, config.reveal_delay_ms, config.seed
        );
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_override() {
        let settings = GameSettings::load(None, Some(4));
        assert_eq!(settings.config.seed, Some(4));
        assert_eq!(settings.config.roll_duration_ms, 1200);
    }

    #[test]
    fn test_no_override_keeps_config_seed() {
        let settings = GameSettings::load(None, None);
        assert_eq!(settings.config.seed, None);
    }
}
