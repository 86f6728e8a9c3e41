//! Input handling systems
//!
//! Mouse clicks are ray-cast from the camera onto the plane of the dice front
//! faces to find which die was clicked. `R` restarts the game.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use hongbao_dice_core::{RollRequest, DICE_COUNT};

use crate::dice3d::types::*;

/// Fraction of the die size, around each centre, that counts as a hit
const PICK_SLACK: f32 = 0.6;

/// Find the die under a camera ray, if any.
///
/// The ray is intersected with the plane holding the front faces (`z = DIE_SIZE / 2`).
pub fn pick_die(origin: Vec3, direction: Vec3) -> Option<usize> {
    let plane_z = DIE_SIZE / 2.0;

    if direction.z.abs() < 0.0001 {
        // Parallel to the dice row
        return None;
    }

    let t = (plane_z - origin.z) / direction.z;
    if t < 0.0 {
        return None;
    }

    let hit = origin + direction * t;
    let reach = DIE_SIZE * PICK_SLACK;

    (0..DICE_COUNT).find(|&index| {
        let centre = die_position(index, DICE_COUNT);
        (hit.x - centre.x).abs() <= reach && (hit.y - centre.y).abs() <= reach
    })
}

/// Roll the die under the cursor on left click
pub fn handle_die_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    buttons: Query<&Interaction, With<Button>>,
    mut session: ResMut<DiceSession>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    // Clicks on UI buttons never reach the dice
    if buttons.iter().any(|i| *i != Interaction::None) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };

    let Some(index) = pick_die(ray.origin, *ray.direction) else {
        return;
    };

    match session.roll(index) {
        RollRequest::Started { die } => info!("Rolling die {}", die),
        RollRequest::Ignored(reason) => debug!("Click on die {} ignored: {:?}", index, reason),
    }
}

/// Restart the game from the keyboard
pub fn handle_keyboard_reset(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<DiceSession>,
    mut status: ResMut<ShareStatus>,
    mut resets: MessageWriter<GameReset>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        restart(&mut session, &mut status, &mut resets);
    }
}

/// Reset the session and tell the scene to follow
pub fn restart(
    session: &mut DiceSession,
    status: &mut ShareStatus,
    resets: &mut MessageWriter<GameReset>,
) {
    session.game.reset();
    status.clear();
    resets.write(GameReset);
    info!("New game started");
}
