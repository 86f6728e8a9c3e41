//! UI systems
//!
//! Keeps the hint line, result panel and share status in step with the
//! session, and handles the Share / Download / Restart buttons.

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use bevy::tasks::{block_on, poll_once};

use hongbao_dice_core::{Completion, DirectoryDownload, Face, SessionEvent, ShareError};

use crate::dice3d::share::{
    complete_export, encode_capture, spawn_save_dialog, BrowserLink, ChosenFile, ExportKind,
    SaveDialogTask, SystemClipboard,
};
use crate::dice3d::types::*;

use super::input::restart;

/// Refresh the hint line whenever the session changes
pub fn update_hint_text(
    session: Res<DiceSession>,
    mut hint_query: Query<&mut Text, With<HintText>>,
) {
    if !session.is_changed() {
        return;
    }

    let hint = session.game.hint().to_string();
    for mut text in hint_query.iter_mut() {
        if text.0 != hint {
            text.0 = hint.clone();
        }
    }
}

/// Show the result panel on reveal, hide it again on restart
#[allow(clippy::too_many_arguments)]
pub fn update_result_panel(
    mut commands: Commands,
    mut dice_events: MessageReader<DiceEvent>,
    mut resets: MessageReader<GameReset>,
    font: Res<UiFont>,
    mut panel_query: Query<&mut Node, With<ResultPanelRoot>>,
    mut amount_query: Query<&mut Text, With<AmountText>>,
    row_query: Query<Entity, With<BreakdownRow>>,
) {
    let revealed = dice_events
        .read()
        .filter_map(|DiceEvent(event)| match event {
            SessionEvent::Revealed(completion) => Some(completion.clone()),
            _ => None,
        })
        .last();
    let reset = resets.read().count() > 0;

    if reset {
        for mut node in panel_query.iter_mut() {
            node.display = Display::None;
        }
        for mut text in amount_query.iter_mut() {
            text.0.clear();
        }
        for row in row_query.iter() {
            commands.entity(row).despawn_related::<Children>();
        }
    }

    let Some(completion) = revealed else {
        return;
    };

    for mut text in amount_query.iter_mut() {
        text.0 = completion.formatted_total();
    }
    for row in row_query.iter() {
        commands.entity(row).despawn_related::<Children>();
        commands.entity(row).with_children(|row| {
            spawn_breakdown(row, &font, &completion);
        });
    }
    for mut node in panel_query.iter_mut() {
        node.display = Display::Flex;
    }
}

/// One mini die card per place: the value over its place label
fn spawn_breakdown(row: &mut ChildSpawnerCommands, font: &UiFont, completion: &Completion) {
    for entry in completion.breakdown() {
        row.spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(8.0)),
                min_width: Val::Px(64.0),
                ..default()
            },
            BackgroundColor(IVORY),
        ))
        .with_children(|card| {
            let color = if is_red_face(Face::for_value(entry.value)) {
                Color::srgb(0.8, 0.05, 0.05)
            } else {
                Color::srgb(0.05, 0.05, 0.05)
            };
            card.spawn((
                Text::new(entry.value.to_string()),
                font.text_font(32.0),
                TextColor(color),
            ));
            card.spawn((
                Text::new(font.place_label(entry.place)),
                font.text_font(14.0),
                TextColor(Color::srgb(0.4, 0.1, 0.1)),
            ));
        });
    }
}

/// Hover and press feedback for every button
pub fn update_button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        *color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED.into(),
            Interaction::Hovered => BUTTON_HOVERED.into(),
            Interaction::None => BUTTON_NORMAL.into(),
        };
    }
}

/// React to button presses
pub fn handle_button_clicks(
    mut commands: Commands,
    buttons: Query<(&Interaction, &ButtonAction), Changed<Interaction>>,
    mut session: ResMut<DiceSession>,
    mut status: ResMut<ShareStatus>,
    mut resets: MessageWriter<GameReset>,
) {
    for (interaction, action) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match action {
            ButtonAction::Restart => restart(&mut session, &mut status, &mut resets),
            ButtonAction::Share | ButtonAction::Download => {
                if session.game.completion().is_none() {
                    status.set("Roll all five dice first");
                    continue;
                }
                status.set("Capturing...");
                let mut screenshot = commands.spawn(Screenshot::primary_window());
                if *action == ButtonAction::Share {
                    screenshot.observe(finish_share);
                } else {
                    screenshot.observe(finish_download);
                }
            }
        }
    }
}

/// Save the captured frame, copy the greeting and open the share page
pub fn finish_share(
    captured: On<ScreenshotCaptured>,
    mut commands: Commands,
    settings: Res<GameSettings>,
    session: Res<DiceSession>,
    mut clipboard: ResMut<SystemClipboard>,
    mut status: ResMut<ShareStatus>,
) {
    begin_export(
        ExportKind::Share,
        captured.image.clone(),
        &mut commands,
        &settings,
        &session,
        &mut clipboard,
        &mut status,
    );
}

/// Save the captured frame only
pub fn finish_download(
    captured: On<ScreenshotCaptured>,
    mut commands: Commands,
    settings: Res<GameSettings>,
    session: Res<DiceSession>,
    mut clipboard: ResMut<SystemClipboard>,
    mut status: ResMut<ShareStatus>,
) {
    begin_export(
        ExportKind::Download,
        captured.image.clone(),
        &mut commands,
        &settings,
        &session,
        &mut clipboard,
        &mut status,
    );
}

/// Encode the frame, then save straight into the configured directory or
/// open a save dialog and leave the rest to `poll_save_dialogs`.
fn begin_export(
    kind: ExportKind,
    image: Image,
    commands: &mut Commands,
    settings: &GameSettings,
    session: &DiceSession,
    clipboard: &mut SystemClipboard,
    status: &mut ShareStatus,
) {
    let bytes = match encode_capture(image) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Screenshot failed: {}", err);
            status.set(err.to_string());
            return;
        }
    };

    match &settings.config.download_dir {
        Some(dir) => {
            let mut download = DirectoryDownload::new(dir.clone());
            let result = complete_export(
                kind,
                bytes,
                &mut download,
                &settings.config,
                session.game.completion().as_ref(),
                clipboard,
                &mut BrowserLink,
            );
            report_export(kind, result, status);
        }
        None => {
            let task = spawn_save_dialog(&settings.config.screenshot_file_name);
            commands.spawn(SaveDialogTask { task, bytes, kind });
            status.set("Choose where to save the card");
        }
    }
}

/// Finish exports whose save dialog has closed
pub fn poll_save_dialogs(
    mut commands: Commands,
    mut task_query: Query<(Entity, &mut SaveDialogTask)>,
    settings: Res<GameSettings>,
    session: Res<DiceSession>,
    mut clipboard: ResMut<SystemClipboard>,
    mut status: ResMut<ShareStatus>,
) {
    for (entity, mut pending) in task_query.iter_mut() {
        let Some(chosen) = block_on(poll_once(&mut pending.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        let kind = pending.kind;
        let result = match chosen {
            Some(path) => complete_export(
                kind,
                std::mem::take(&mut pending.bytes),
                &mut ChosenFile(path),
                &settings.config,
                session.game.completion().as_ref(),
                &mut *clipboard,
                &mut BrowserLink,
            ),
            None => Err(ShareError::Cancelled),
        };
        report_export(kind, result, &mut status);
    }
}

fn report_export(kind: ExportKind, result: Result<String, ShareError>, status: &mut ShareStatus) {
    match result {
        Ok(message) => {
            info!("{:?} finished: {}", kind, message);
            status.set(message);
        }
        Err(err) => {
            warn!("{:?} failed: {}", kind, err);
            status.set(err.to_string());
        }
    }
}

/// Mirror the share status resource into its text line
pub fn update_share_status_text(
    status: Res<ShareStatus>,
    mut text_query: Query<&mut Text, With<ShareStatusText>>,
) {
    if !status.is_changed() {
        return;
    }
    for mut text in text_query.iter_mut() {
        text.0 = status.message.clone();
    }
}
