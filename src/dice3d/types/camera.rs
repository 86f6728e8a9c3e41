//! Camera-related types and components
//!
//! This module contains the main camera marker and its fixed framing.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Camera position looking at the row of dice
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.8, 9.0);

/// Where the camera looks; slightly above the dice to leave room for the panel
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, -0.4, 0.0);
