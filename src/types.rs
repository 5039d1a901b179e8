use bevy::prelude::*;

/// A mobile unit that can receive move commands.
#[derive(Component)]
pub struct Unit {
    pub move_speed: f32,
    /// Current destination, cleared on arrival.
    pub destination: Option<Vec3>,
}

/// Capability component: entities carrying this participate in selection.
/// The collider sphere is what corner rays and the selection volume test
/// against.
#[derive(Component)]
pub struct Selectable {
    pub radius: f32,
}

/// Marker for entities currently in the selected state. Inserted and removed
/// only by the selection systems.
#[derive(Component)]
pub struct Selected;

/// Tracks per-frame displacement so animation can react to actual movement
/// rather than commanded movement.
#[derive(Component, Default)]
pub struct MovementTracker {
    pub last_position: Vec3,
    pub speed: f32,
}

/// Normalized speed scalar consumed by the animation glue (0 = idle,
/// 1 = full marching speed).
#[derive(Component, Default)]
pub struct MoveAnimation {
    pub normalized_speed: f32,
    pub bob_offset: f32,
}

#[derive(Component)]
pub struct RtsCamera {
    pub focus_point: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}
