//! Dice-related types and components
//!
//! This module contains the Bevy-side wrappers around the game core: the
//! `DieCube` component, the `DiceSession` resource, dice materials, and the
//! conversion from core orientations to quaternions.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use hongbao_dice_core::{Face, GameConfig, GameSession, Orientation, SessionEvent};

/// Edge length of a die cube
pub const DIE_SIZE: f32 = 1.0;

/// Distance between neighbouring die centres
pub const DIE_SPACING: f32 = 1.6;

/// Component attached to each die cube
#[derive(Component, Debug, Clone, Copy)]
pub struct DieCube {
    /// Position in the row, also the index of its place value
    pub index: usize,
}

/// Marker for a die that has landed on its value this game
#[derive(Component)]
pub struct Resolved;

/// Marker for pip meshes (children of a `DieCube`)
#[derive(Component)]
pub struct Pip;

/// The game session plus the RNG feeding it
#[derive(Resource)]
pub struct DiceSession {
    pub game: GameSession,
    pub rng: StdRng,
}

impl DiceSession {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            game: GameSession::new(config),
            rng,
        }
    }

    /// Forward a click on die `index` to the session
    pub fn roll(&mut self, index: usize) -> hongbao_dice_core::RollRequest {
        let Self { game, rng } = self;
        game.roll(index, rng)
    }
}

/// Materials shared by all dice
#[derive(Resource, Clone)]
pub struct DiceMaterials {
    pub idle: Handle<StandardMaterial>,
    pub resolved: Handle<StandardMaterial>,
    pub pip_black: Handle<StandardMaterial>,
    pub pip_red: Handle<StandardMaterial>,
}

/// Session output forwarded to the rendering and UI systems
#[derive(Message, Debug, Clone)]
pub struct DiceEvent(pub SessionEvent);

/// Sent when the game is restarted
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct GameReset;

/// Convert a screen-space orientation (x then y, degrees, y axis down) into a
/// rotation in Bevy's y-up frame.
pub fn orientation_to_quat(orientation: Orientation) -> Quat {
    Quat::from_rotation_x((-orientation.x).to_radians())
        * Quat::from_rotation_y(orientation.y.to_radians())
}

/// World position of die `index` in the row
pub fn die_position(index: usize, count: usize) -> Vec3 {
    let offset = (count as f32 - 1.0) / 2.0;
    Vec3::new((index as f32 - offset) * DIE_SPACING, 0.0, 0.0)
}

pub fn face_normal(face: Face) -> Vec3 {
    Vec3::from_array(face.normal())
}

/// Right and up directions of a face as seen by a viewer once that face is
/// turned to the front.
pub fn face_axes(face: Face) -> (Vec3, Vec3) {
    let up = match face {
        Face::Top => Vec3::NEG_Z,
        Face::Bottom => Vec3::Z,
        _ => Vec3::Y,
    };
    (up.cross(face_normal(face)), up)
}

/// Traditional dice paint the one and four pips red
pub fn is_red_face(face: Face) -> bool {
    matches!(face.pips(), 1 | 4)
}
