// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use hongbao_dice::dice3d::{
    advance_dice_session, apply_dice_events, handle_button_clicks, handle_die_clicks,
    handle_keyboard_reset, load_ui_font, poll_save_dialogs, reset_dice_visuals, setup,
    update_button_colors, update_hint_text, update_result_panel, update_share_status_text,
    DiceEvent, DiceSession, GameReset, GameSettings, ShareStatus, SystemClipboard, UiFont,
    BACKGROUND_RED,
};

/// Hongbao Dice - roll five dice for your New Year red envelope
#[derive(Parser, Debug)]
#[command(name = "hongbao-dice")]
#[command(author = "Edgar Sanchez")]
#[command(version)]
#[command(about = "Click five 3D dice to roll your New Year red envelope amount", long_about = None)]
struct Cli {
    /// Path to a JSON game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    let settings = GameSettings::load(cli.config.as_deref(), cli.seed);
    let session = DiceSession::new(&settings.config);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Hongbao Dice".to_string(),
                        resolution: (1280u32, 720u32).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(BACKGROUND_RED))
        .insert_resource(settings)
        .insert_resource(session)
        .insert_resource(ShareStatus::default())
        .insert_resource(SystemClipboard::default())
        .insert_resource(UiFont::default())
        .add_message::<DiceEvent>()
        .add_message::<GameReset>()
        .add_systems(Startup, (load_ui_font, setup).chain())
        .add_systems(
            Update,
            (
                handle_button_clicks,
                poll_save_dialogs,
                handle_keyboard_reset,
                handle_die_clicks,
                advance_dice_session,
                apply_dice_events,
                reset_dice_visuals,
                update_result_panel,
                update_hint_text,
                update_button_colors,
                update_share_status_text,
            )
                .chain(),
        )
        .run();
}
