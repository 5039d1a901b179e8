use bevy::prelude::*;

mod constants;
mod math_utils;
mod movement;
mod selection;
mod setup;
mod types;

use selection::{
    register_selectables_system, selection_ring_system, selection_tick_system, SelectableRegistry,
    SelectionChanged, SelectionController,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .init_resource::<SelectionController>()
        .init_resource::<SelectableRegistry>()
        .add_event::<SelectionChanged>()
        .add_systems(Startup, (setup::setup_scene, setup::spawn_units))
        .add_systems(
            Update,
            (
                movement::rts_camera_movement,
                // Registration must see new Selectables before the tick
                (register_selectables_system, selection_tick_system).chain(),
                selection_ring_system,
                movement::move_command_system,
                movement::unit_movement_system,
                movement::update_move_animation,
            ),
        )
        .run();
}
