//! Scene setup system
//!
//! This module contains the main setup function that initializes the 3D scene,
//! including camera, lights, the five dice with their pips, and the UI.

use bevy::prelude::*;

use hongbao_dice_core::{Face, DICE_COUNT};

use crate::dice3d::types::*;

use super::rendering::{pip_transform, PIP_HEIGHT, PIP_RADIUS};

/// Main setup system - initializes the entire scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<DiceSession>,
    font: Res<UiFont>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_POSITION).looking_at(CAMERA_TARGET, Vec3::Y),
        MainCamera,
    ));

    // Key light from the upper right, soft fill from the left
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 6.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-6.0, 1.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let dice_materials = DiceMaterials {
        idle: materials.add(StandardMaterial {
            base_color: IVORY,
            perceptual_roughness: 0.35,
            reflectance: 0.4,
            ..default()
        }),
        resolved: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.93, 0.7),
            emissive: LinearRgba::rgb(0.25, 0.18, 0.0),
            perceptual_roughness: 0.3,
            ..default()
        }),
        pip_black: materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.05, 0.05),
            perceptual_roughness: 0.6,
            ..default()
        }),
        pip_red: materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.05, 0.05),
            perceptual_roughness: 0.6,
            ..default()
        }),
    };

    let cube_mesh = meshes.add(Cuboid::new(DIE_SIZE, DIE_SIZE, DIE_SIZE));
    let pip_mesh = meshes.add(Cylinder::new(PIP_RADIUS, PIP_HEIGHT));
    let idle_rotation = orientation_to_quat(session.game.idle_pose());

    for index in 0..DICE_COUNT {
        spawn_die(
            &mut commands,
            index,
            cube_mesh.clone(),
            pip_mesh.clone(),
            &dice_materials,
            idle_rotation,
        );
    }

    commands.insert_resource(dice_materials);

    spawn_ui(&mut commands, &font, &session);
}

/// Spawn one die cube with pips on all six faces
pub fn spawn_die(
    commands: &mut Commands,
    index: usize,
    cube_mesh: Handle<Mesh>,
    pip_mesh: Handle<Mesh>,
    dice_materials: &DiceMaterials,
    rotation: Quat,
) {
    commands
        .spawn((
            Mesh3d(cube_mesh),
            MeshMaterial3d(dice_materials.idle.clone()),
            Transform::from_translation(die_position(index, DICE_COUNT)).with_rotation(rotation),
            DieCube { index },
        ))
        .with_children(|parent| {
            for face in Face::ALL {
                let material = if is_red_face(face) {
                    dice_materials.pip_red.clone()
                } else {
                    dice_materials.pip_black.clone()
                };
                for &(col, row) in hongbao_dice_core::pip_layout(face.pips()) {
                    parent.spawn((
                        Mesh3d(pip_mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        pip_transform(face, col, row),
                        Pip,
                    ));
                }
            }
        });
}

fn spawn_ui(commands: &mut Commands, font: &UiFont, session: &DiceSession) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        })
        .with_children(|root| {
            // Title and hint
            root.spawn(Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|header| {
                header.spawn((
                    Text::new(font.title()),
                    font.text_font(40.0),
                    TextColor(GOLD),
                ));
                header.spawn((
                    Text::new(session.game.hint().to_string()),
                    font.text_font(22.0),
                    TextColor(IVORY),
                    HintText,
                ));
            });

            // Result panel, hidden until every die has landed
            root.spawn((
                Node {
                    display: Display::None,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(16.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.3, 0.0, 0.0, 0.85)),
                ResultPanelRoot,
            ))
            .with_children(|panel| {
                panel.spawn((
                    Text::new(""),
                    font.text_font(48.0),
                    TextColor(GOLD),
                    AmountText,
                ));
                panel.spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(12.0),
                        ..default()
                    },
                    BreakdownRow,
                ));
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(16.0),
                        ..default()
                    })
                    .with_children(|buttons| {
                        spawn_button(buttons, font, ButtonAction::Share);
                        spawn_button(buttons, font, ButtonAction::Download);
                    });
                panel.spawn((
                    Text::new(""),
                    font.text_font(16.0),
                    TextColor(IVORY),
                    ShareStatusText,
                ));
            });

            spawn_button(root, font, ButtonAction::Restart);
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands, font: &UiFont, action: ButtonAction) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_NORMAL),
            action,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(action.label()),
                font.text_font(20.0),
                TextColor(IVORY),
            ));
        });
}
