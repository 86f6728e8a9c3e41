//! Rendering utilities for die pips
//!
//! Pips are flat cylinders parented to the cube, laid out on a 3x3 grid per
//! face and pushed just past the surface so they never z-fight.

use bevy::prelude::*;

use hongbao_dice_core::Face;

use crate::dice3d::types::{face_axes, face_normal, DIE_SIZE};

pub const PIP_RADIUS: f32 = 0.09;
pub const PIP_HEIGHT: f32 = 0.02;

/// Spacing between pip grid cells on a face
pub const PIP_SPACING: f32 = 0.25;

/// Local transform of a pip at grid cell (`col`, `row`) on `face`.
///
/// Rows grow downward as seen when the face is turned toward the viewer.
pub fn pip_transform(face: Face, col: i8, row: i8) -> Transform {
    let normal = face_normal(face);
    let (right, up) = face_axes(face);

    let surface = normal * (DIE_SIZE / 2.0 + PIP_HEIGHT / 4.0);
    let offset = right * (col as f32 * PIP_SPACING) - up * (row as f32 * PIP_SPACING);

    Transform::from_translation(surface + offset)
        .with_rotation(Quat::from_rotation_arc(Vec3::Y, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pips_sit_on_their_face() {
        for face in Face::ALL {
            let normal = face_normal(face);
            for &(col, row) in hongbao_dice_core::pip_layout(face.pips()) {
                let t = pip_transform(face, col, row);
                let depth = t.translation.dot(normal);
                assert!(depth > DIE_SIZE / 2.0, "{} pip sunk", face.name());
                assert!((t.rotation * Vec3::Y - normal).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_pips_stay_inside_face_bounds() {
        for face in Face::ALL {
            for &(col, row) in hongbao_dice_core::pip_layout(face.pips()) {
                let t = pip_transform(face, col, row);
                let lateral = t.translation - face_normal(face) * t.translation.dot(face_normal(face));
                assert!(lateral.x.abs() + PIP_RADIUS < DIE_SIZE / 2.0);
                assert!(lateral.y.abs() + PIP_RADIUS < DIE_SIZE / 2.0);
                assert!(lateral.z.abs() + PIP_RADIUS < DIE_SIZE / 2.0);
            }
        }
    }

    #[test]
    fn test_two_pips_run_top_left_to_bottom_right() {
        let (right, up) = face_axes(Face::Right);
        let first = pip_transform(Face::Right, -1, -1).translation;
        assert!(first.dot(right) < 0.0);
        assert!(first.dot(up) > 0.0);
    }
}
