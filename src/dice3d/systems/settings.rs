//! Settings systems
//!
//! Applies the parts of the game configuration that need the asset server.

use bevy::prelude::*;

use crate::dice3d::types::{GameSettings, UiFont};

/// Load the configured UI font, if any. Paths are relative to the assets folder.
pub fn load_ui_font(
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut font: ResMut<UiFont>,
) {
    match &settings.config.font {
        Some(path) => {
            info!("Loading UI font {}", path);
            font.handle = Some(asset_server.load(path.clone()));
        }
        None => info!("No UI font configured, using English labels"),
    }
}
