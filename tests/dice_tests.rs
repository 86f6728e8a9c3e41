//! Tests for the dice scene systems

use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, TaskPool};
use std::path::PathBuf;
use std::time::Duration;

use hongbao_dice::dice3d::systems::rendering::pip_transform;
use hongbao_dice::dice3d::{
    apply_dice_events, die_position, orientation_to_quat, pick_die, poll_save_dialogs,
    reset_dice_visuals, restart, update_hint_text, update_result_panel, AmountText,
    BreakdownRow, DiceEvent, DiceSession, DieCube, ExportKind, GameReset, GameSettings, HintText,
    Resolved, ResultPanelRoot, SaveDialogTask, ShareStatus, SystemClipboard, UiFont,
    CAMERA_POSITION,
};
use hongbao_dice_core::{
    orientation_for, DieValue, Face, GameConfig, Hint, Orientation, SessionEvent, DICE_COUNT,
};

fn test_app() -> App {
    let mut app = App::new();
    app.add_message::<DiceEvent>()
        .add_message::<GameReset>()
        .insert_resource(DiceSession::new(&GameConfig::default()))
        .add_systems(Update, (apply_dice_events, reset_dice_visuals).chain());

    for index in 0..DICE_COUNT {
        app.world_mut().spawn((
            DieCube { index },
            Transform::default(),
            MeshMaterial3d::<StandardMaterial>(Handle::default()),
        ));
    }
    app
}

fn rotation_of(app: &mut App, index: usize) -> Quat {
    let mut query = app.world_mut().query::<(&DieCube, &Transform)>();
    query
        .iter(app.world())
        .find(|(cube, _)| cube.index == index)
        .map(|(_, t)| t.rotation)
        .unwrap()
}

fn resolved_count(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<Resolved>>();
    query.iter(app.world()).count()
}

#[test]
fn test_frame_event_turns_only_its_die() {
    let mut app = test_app();
    let orientation = Orientation::new(45.0, 90.0);
    app.world_mut()
        .resource_mut::<Messages<DiceEvent>>()
        .write(DiceEvent(SessionEvent::Frame { die: 1, orientation }));
    app.update();

    let expected = orientation_to_quat(orientation);
    assert!(rotation_of(&mut app, 1).angle_between(expected) < 1e-4);
    assert!(rotation_of(&mut app, 0).angle_between(Quat::IDENTITY) < 1e-4);
    assert_eq!(resolved_count(&mut app), 0);
}

#[test]
fn test_landed_event_marks_die_resolved() {
    let mut app = test_app();
    let value = DieValue::new(5).unwrap();
    app.world_mut()
        .resource_mut::<Messages<DiceEvent>>()
        .write(DiceEvent(SessionEvent::Landed {
            die: 3,
            value,
            orientation: orientation_for(value),
        }));
    app.update();

    assert_eq!(resolved_count(&mut app), 1);
    let shown = rotation_of(&mut app, 3) * Vec3::from_array(Face::for_value(value).normal());
    assert!((shown - Vec3::Z).length() < 1e-4);
}

#[test]
fn test_reset_returns_dice_to_idle_pose() {
    let mut app = test_app();
    let value = DieValue::new(2).unwrap();
    app.world_mut()
        .resource_mut::<Messages<DiceEvent>>()
        .write(DiceEvent(SessionEvent::Landed {
            die: 0,
            value,
            orientation: orientation_for(value),
        }));
    app.update();
    assert_eq!(resolved_count(&mut app), 1);

    app.world_mut()
        .resource_mut::<Messages<GameReset>>()
        .write(GameReset);
    app.update();

    assert_eq!(resolved_count(&mut app), 0);
    let idle = orientation_to_quat(GameConfig::default().idle_pose);
    for index in 0..DICE_COUNT {
        assert!(rotation_of(&mut app, index).angle_between(idle) < 1e-4);
    }
}

#[test]
fn test_every_die_is_clickable_from_the_camera() {
    for index in 0..DICE_COUNT {
        let target = die_position(index, DICE_COUNT);
        let direction = (target - CAMERA_POSITION).normalize();
        assert_eq!(pick_die(CAMERA_POSITION, direction), Some(index));
    }
}

#[test]
fn test_front_pips_face_the_camera_after_landing() {
    for value in DieValue::all() {
        let face = Face::for_value(value);
        let rotation = orientation_to_quat(orientation_for(value));
        for &(col, row) in hongbao_dice_core::pip_layout(face.pips()) {
            let world = rotation * pip_transform(face, col, row).translation;
            assert!(world.z > 0.5, "value {} pip hidden", value);
        }
    }
}

fn panel_app() -> App {
    let config = GameConfig {
        reveal_delay_ms: 0,
        seed: Some(21),
        ..GameConfig::default()
    };
    let mut app = App::new();
    app.add_message::<DiceEvent>()
        .add_message::<GameReset>()
        .insert_resource(DiceSession::new(&config))
        .insert_resource(ShareStatus::default())
        .insert_resource(UiFont::default())
        .add_systems(Update, (update_result_panel, update_hint_text));

    let world = app.world_mut();
    world.spawn((Text::new("Click any die to start!"), HintText));
    world.spawn((
        Node {
            display: Display::None,
            ..default()
        },
        ResultPanelRoot,
    ));
    world.spawn((Text::new(""), AmountText));
    world.spawn((Node::default(), BreakdownRow));
    app
}

/// Roll all five dice to rest and return the reveal
fn play_full_game(app: &mut App) -> SessionEvent {
    let mut session = app.world_mut().resource_mut::<DiceSession>();
    let mut revealed = None;
    for die in 0..DICE_COUNT {
        assert!(session.roll(die).is_started());
        for event in session.game.advance(Duration::from_secs(5)) {
            if matches!(event, SessionEvent::Revealed(_)) {
                revealed = Some(event);
            }
        }
    }
    revealed.unwrap()
}

fn panel_display(app: &mut App) -> Display {
    let mut query = app
        .world_mut()
        .query_filtered::<&Node, With<ResultPanelRoot>>();
    query.single(app.world()).unwrap().display
}

fn single_text<M: Component>(app: &mut App) -> String {
    let mut query = app.world_mut().query_filtered::<&Text, With<M>>();
    query.single(app.world()).unwrap().0.clone()
}

fn breakdown_len(app: &mut App) -> usize {
    let mut query = app
        .world_mut()
        .query_filtered::<Option<&Children>, With<BreakdownRow>>();
    query
        .single(app.world())
        .unwrap()
        .map_or(0, |children| children.len())
}

#[test]
fn test_reveal_shows_panel_and_reset_clears_it() {
    let mut app = panel_app();
    app.update();
    assert_eq!(panel_display(&mut app), Display::None);

    let revealed = play_full_game(&mut app);
    let SessionEvent::Revealed(completion) = &revealed else {
        unreachable!()
    };
    let amount = completion.formatted_total();
    app.world_mut()
        .resource_mut::<Messages<DiceEvent>>()
        .write(DiceEvent(revealed.clone()));
    app.update();

    assert_eq!(panel_display(&mut app), Display::Flex);
    assert_eq!(single_text::<AmountText>(&mut app), amount);
    assert_eq!(breakdown_len(&mut app), DICE_COUNT);
    assert_eq!(single_text::<HintText>(&mut app), "");

    app.world_mut()
        .run_system_once(
            |mut session: ResMut<DiceSession>,
             mut status: ResMut<ShareStatus>,
             mut resets: MessageWriter<GameReset>| {
                restart(&mut session, &mut status, &mut resets);
            },
        )
        .unwrap();
    app.update();

    assert_eq!(panel_display(&mut app), Display::None);
    assert_eq!(single_text::<AmountText>(&mut app), "");
    assert_eq!(breakdown_len(&mut app), 0);
    assert_eq!(single_text::<HintText>(&mut app), Hint::Start.to_string());
}

fn dialog_app(chosen: Option<PathBuf>) -> App {
    let pool = IoTaskPool::get_or_init(TaskPool::new);
    let task = pool.spawn(async move { chosen });

    let mut app = App::new();
    app.insert_resource(GameSettings::default())
        .insert_resource(DiceSession::new(&GameConfig::default()))
        .insert_resource(SystemClipboard::default())
        .insert_resource(ShareStatus::default())
        .add_systems(Update, poll_save_dialogs);
    app.world_mut().spawn(SaveDialogTask {
        task,
        bytes: vec![0x89, b'P', b'N', b'G'],
        kind: ExportKind::Download,
    });
    app
}

/// Update until the dialog task has been consumed
fn run_until_dialog_closes(app: &mut App) {
    for _ in 0..500 {
        app.update();
        let mut query = app.world_mut().query::<&SaveDialogTask>();
        if query.iter(app.world()).next().is_none() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("save dialog task never finished");
}

#[test]
fn test_save_dialog_choice_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("card.png");
    let mut app = dialog_app(Some(target.clone()));

    run_until_dialog_closes(&mut app);

    assert_eq!(std::fs::read(&target).unwrap(), vec![0x89, b'P', b'N', b'G']);
    let status = app.world().resource::<ShareStatus>().message.clone();
    assert!(status.starts_with("Screenshot saved to"), "{}", status);
}

#[test]
fn test_cancelled_save_dialog_reports_status() {
    let mut app = dialog_app(None);

    run_until_dialog_closes(&mut app);

    assert_eq!(app.world().resource::<ShareStatus>().message, "Save cancelled");
}
