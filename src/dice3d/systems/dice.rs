//! Dice animation systems
//!
//! The session owns the roll timing. These systems feed it frame time and
//! mirror its output onto the cube transforms and materials.

use bevy::prelude::*;

use hongbao_dice_core::SessionEvent;

use crate::dice3d::types::*;

/// Advance the session by the frame delta and forward what happened
pub fn advance_dice_session(
    time: Res<Time>,
    mut session: ResMut<DiceSession>,
    mut events: MessageWriter<DiceEvent>,
) {
    for event in session.game.advance(time.delta()) {
        events.write(DiceEvent(event));
    }
}

/// Apply session frames and landings to the dice in the scene
pub fn apply_dice_events(
    mut commands: Commands,
    mut events: MessageReader<DiceEvent>,
    dice_materials: Option<Res<DiceMaterials>>,
    mut dice_query: Query<(Entity, &DieCube, &mut Transform, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for DiceEvent(event) in events.read() {
        match event {
            SessionEvent::Frame { die, orientation } => {
                for (_, cube, mut transform, _) in dice_query.iter_mut() {
                    if cube.index == *die {
                        transform.rotation = orientation_to_quat(*orientation);
                    }
                }
            }
            SessionEvent::Landed {
                die,
                value,
                orientation,
            } => {
                for (entity, cube, mut transform, mut material) in dice_query.iter_mut() {
                    if cube.index != *die {
                        continue;
                    }
                    transform.rotation = orientation_to_quat(*orientation);
                    if let Some(mats) = &dice_materials {
                        material.0 = mats.resolved.clone();
                    }
                    commands.entity(entity).insert(Resolved);
                }
                debug!("Die {} showing {}", die, value);
            }
            SessionEvent::Revealed(completion) => {
                debug!("Revealing {}", completion.formatted_total());
            }
        }
    }
}

/// Put every die back in the idle pose after a restart
pub fn reset_dice_visuals(
    mut commands: Commands,
    mut resets: MessageReader<GameReset>,
    session: Res<DiceSession>,
    dice_materials: Option<Res<DiceMaterials>>,
    mut dice_query: Query<(Entity, &mut Transform, &mut MeshMaterial3d<StandardMaterial>), With<DieCube>>,
) {
    if resets.read().count() == 0 {
        return;
    }

    let idle = orientation_to_quat(session.game.idle_pose());
    for (entity, mut transform, mut material) in dice_query.iter_mut() {
        transform.rotation = idle;
        if let Some(mats) = &dice_materials {
            material.0 = mats.idle.clone();
        }
        commands.entity(entity).remove::<Resolved>();
    }
}
