//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the hongbao dice game,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, dice, UI)
//! - `input`: Die picking and keyboard restart
//! - `dice`: Session timing and die transforms
//! - `rendering`: Pip placement on die faces
//! - `ui`: Hint line, result panel, buttons and the share/download flow
//! - `settings`: Font loading from the game configuration

mod dice;
mod input;
pub mod rendering;
mod settings;
mod setup;
mod ui;

// Re-export all public systems
pub use dice::{advance_dice_session, apply_dice_events, reset_dice_visuals};
pub use input::{handle_die_clicks, handle_keyboard_reset, pick_die, restart};
pub use settings::load_ui_font;
pub use setup::{setup, spawn_die};
pub use ui::{
    finish_download, finish_share, handle_button_clicks, poll_save_dialogs, update_button_colors,
    update_hint_text, update_result_panel, update_share_status_text,
};
