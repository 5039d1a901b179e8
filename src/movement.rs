// Movement, camera, and animation systems module
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::*;
use crate::math_utils::{ray_ground_intersection, remap01};
use crate::types::*;

/// System: right-click sends selected units toward the ground point under
/// the cursor, spread on a small grid so they do not stack.
pub fn move_command_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    mut selected_units: Query<&mut Unit, With<Selected>>,
) {
    if !mouse_button.just_pressed(MouseButton::Right) {
        return;
    }
    let Ok(window) = window_query.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else { return };
    let Some((_, destination)) = ray_ground_intersection(ray.origin, *ray.direction) else {
        return;
    };

    let count = selected_units.iter().count();
    if count == 0 {
        return;
    }

    // Center the destination grid on the clicked point
    let width = (count as f32).sqrt().ceil() as usize;
    let half = (width as f32 - 1.0) / 2.0;
    for (i, mut unit) in selected_units.iter_mut().enumerate() {
        let col = (i % width) as f32 - half;
        let row = (i / width) as f32 - half;
        unit.destination = Some(
            destination + Vec3::new(col * MOVE_FORMATION_SPACING, 0.0, row * MOVE_FORMATION_SPACING),
        );
    }

    info!(
        "Move command to ({:.1}, {:.1}) for {} units",
        destination.x, destination.z, count
    );
}

/// System: march units toward their destination and track actual speed.
pub fn unit_movement_system(
    time: Res<Time>,
    mut units: Query<(&mut Transform, &mut Unit, &mut MovementTracker)>,
) {
    let delta_time = time.delta_secs();

    for (mut transform, mut unit, mut tracker) in units.iter_mut() {
        if let Some(destination) = unit.destination {
            let to_target = Vec3::new(
                destination.x - transform.translation.x,
                0.0,
                destination.z - transform.translation.z,
            );
            if to_target.length() <= UNIT_ARRIVAL_THRESHOLD {
                unit.destination = None;
            } else {
                let direction = to_target.normalize();
                let step = (unit.move_speed * delta_time).min(to_target.length());
                transform.translation += direction * step;
                // Face movement direction
                transform.rotation = Quat::from_rotation_y(direction.x.atan2(direction.z));
            }
        }

        // Actual horizontal displacement, commanded or not
        if delta_time > 0.0 {
            let moved = transform.translation - tracker.last_position;
            tracker.speed = Vec3::new(moved.x, 0.0, moved.z).length() / delta_time;
        }
        tracker.last_position = transform.translation;
    }
}

/// System: feed the normalized speed scalar to the animation state and bob
/// marching units. The renderer-facing contract is just
/// `MoveAnimation.normalized_speed` in [0, 1].
pub fn update_move_animation(
    time: Res<Time>,
    mut units: Query<(&mut Transform, &mut MoveAnimation, &MovementTracker, &Unit)>,
) {
    let elapsed = time.elapsed_secs();

    for (mut transform, mut animation, tracker, unit) in units.iter_mut() {
        animation.normalized_speed = remap01(tracker.speed, 0.0, unit.move_speed);

        let bob = (elapsed * BOB_FREQUENCY + animation.bob_offset).sin()
            * BOB_AMPLITUDE
            * animation.normalized_speed;
        transform.translation.y = UNIT_HALF_HEIGHT + bob.max(0.0);
    }
}

/// System: RTS camera - WASD pan, wheel zoom, middle-drag rotate.
pub fn rts_camera_movement(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    mut scroll_events: EventReader<MouseWheel>,
    mut mouse_motion_events: EventReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &mut RtsCamera)>,
) {
    let Ok((mut transform, mut camera)) = camera_query.single_mut() else { return };
    let delta_time = time.delta_secs();

    // Mouse drag rotation (middle mouse button - left click is for selection)
    if mouse_button_input.pressed(MouseButton::Middle) {
        for motion in mouse_motion_events.read() {
            camera.yaw -= motion.delta.x * CAMERA_ROTATION_SPEED;
            camera.pitch = (camera.pitch - motion.delta.y * CAMERA_ROTATION_SPEED)
                .clamp(-1.5, -0.1); // Limit pitch to reasonable RTS angles
        }
    } else {
        // Clear mouse motion events if not dragging to prevent accumulation
        mouse_motion_events.clear();
    }

    // WASD movement (relative to camera's view direction)
    let mut movement = Vec3::ZERO;
    if keyboard_input.pressed(KeyCode::KeyW) || keyboard_input.pressed(KeyCode::ArrowUp) {
        movement.z -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) || keyboard_input.pressed(KeyCode::ArrowDown) {
        movement.z += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyA) || keyboard_input.pressed(KeyCode::ArrowLeft) {
        movement.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyD) || keyboard_input.pressed(KeyCode::ArrowRight) {
        movement.x += 1.0;
    }

    if movement.length() > 0.0 {
        movement = movement.normalize() * CAMERA_SPEED * delta_time;
        // Rotate by yaw only so panning stays on the ground plane
        let yaw_rotation = Mat3::from_rotation_y(camera.yaw);
        camera.focus_point += yaw_rotation * movement;
    }

    // Mouse wheel zoom
    for scroll in scroll_events.read() {
        let zoom_delta = match scroll.unit {
            MouseScrollUnit::Line => scroll.y * CAMERA_ZOOM_SPEED,
            MouseScrollUnit::Pixel => scroll.y * CAMERA_ZOOM_SPEED * 0.1,
        };
        camera.distance = (camera.distance - zoom_delta).clamp(CAMERA_MIN_HEIGHT, CAMERA_MAX_HEIGHT);
    }

    // Update camera transform from focus point, yaw, pitch, and distance
    let rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);
    let offset = rotation * Vec3::new(0.0, 0.0, camera.distance);
    transform.translation = camera.focus_point + offset;
    transform.rotation = rotation;
}
