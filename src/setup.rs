// Scene setup and unit spawning module
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::constants::*;
use crate::selection::{SelectionBoxOverlay, SelectionOverlay};
use crate::types::*;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane at y = 0. Oversized relative to the play area so corner
    // rays always have a backing surface to hit.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.4, 0.2),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 50.0, 0.0),
            rotation: Quat::from_rotation_x(-PI / 4.0),
            ..default()
        },
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.4, 0.4, 0.6),
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    // RTS camera
    let focus_point = Vec3::ZERO;
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 70.0, 80.0).looking_at(focus_point, Vec3::Y),
        RtsCamera {
            focus_point,
            yaw: 0.0,
            pitch: -0.7,
            distance: 100.0,
        },
    ));

    // Drag-rectangle overlay node, created once; the selection systems get
    // its handle through the SelectionOverlay resource.
    let overlay = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(SELECTION_BOX_FILL),
            BorderColor(SELECTION_BOX_BORDER),
            Visibility::Hidden,
            SelectionBoxOverlay,
        ))
        .id();
    commands.insert_resource(SelectionOverlay { entity: overlay });

    // Help text
    commands.spawn((
        Text::new("Left-drag: Select | Right-click: Move | Middle-drag: Rotate | Scroll: Zoom"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(0.9, 0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

pub fn spawn_units(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let unit_mesh = meshes.add(Capsule3d::new(0.4, 1.0));
    let unit_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.5, 0.9),
        ..default()
    });

    let half = (UNIT_ROW_WIDTH as f32 - 1.0) / 2.0;
    for i in 0..UNIT_COUNT {
        let col = (i % UNIT_ROW_WIDTH) as f32 - half;
        let row = (i / UNIT_ROW_WIDTH) as f32;
        let jitter = Vec3::new(rng.gen_range(-0.5..0.5), 0.0, rng.gen_range(-0.5..0.5));
        let position =
            Vec3::new(col * UNIT_SPACING, UNIT_HALF_HEIGHT, row * UNIT_SPACING) + jitter;

        commands.spawn((
            Mesh3d(unit_mesh.clone()),
            MeshMaterial3d(unit_material.clone()),
            Transform::from_translation(position),
            Unit {
                move_speed: UNIT_MOVE_SPEED,
                destination: None,
            },
            Selectable {
                radius: UNIT_COLLIDER_RADIUS,
            },
            MovementTracker {
                last_position: position,
                speed: 0.0,
            },
            MoveAnimation {
                normalized_speed: 0.0,
                bob_offset: rng.gen_range(0.0..PI * 2.0),
            },
        ));
    }

    info!("Spawned {} selectable units", UNIT_COUNT);
}
