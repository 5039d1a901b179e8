// Battlefield layout
pub const GROUND_SIZE: f32 = 400.0;
pub const UNIT_COUNT: usize = 40;
pub const UNIT_SPACING: f32 = 4.0;
pub const UNIT_ROW_WIDTH: usize = 8;

// Unit settings
pub const UNIT_MOVE_SPEED: f32 = 8.0;
pub const UNIT_COLLIDER_RADIUS: f32 = 0.8;
pub const UNIT_HALF_HEIGHT: f32 = 0.9; // capsule center above the ground
pub const UNIT_ARRIVAL_THRESHOLD: f32 = 0.5;
pub const MOVE_FORMATION_SPACING: f32 = 2.5; // grid spacing around a shared destination

// RTS camera settings
pub const CAMERA_SPEED: f32 = 50.0;
pub const CAMERA_ZOOM_SPEED: f32 = 10.0;
pub const CAMERA_MIN_HEIGHT: f32 = 20.0;
pub const CAMERA_MAX_HEIGHT: f32 = 200.0;
pub const CAMERA_ROTATION_SPEED: f32 = 0.005;

// Selection system settings
/// Thin but non-zero extent along the selection plane's normal so overlap
/// queries behave against zero-thickness geometry.
pub const SELECTION_VOLUME_DEPTH: f32 = 1.0;
pub const SELECTION_RING_INNER_RADIUS: f32 = 1.1;
pub const SELECTION_RING_OUTER_RADIUS: f32 = 1.4;
pub const SELECTION_RING_COLOR: bevy::prelude::Color =
    bevy::prelude::Color::srgba(0.2, 0.9, 1.0, 0.7); // Cyan
pub const SELECTION_BOX_FILL: bevy::prelude::Color =
    bevy::prelude::Color::srgba(0.2, 0.8, 0.3, 0.15);
pub const SELECTION_BOX_BORDER: bevy::prelude::Color =
    bevy::prelude::Color::srgba(0.3, 0.9, 0.4, 0.8);

// Animation settings
pub const BOB_AMPLITUDE: f32 = 0.1;
pub const BOB_FREQUENCY: f32 = 4.0;
