// Selection ring visuals reacting to the Selected marker
use bevy::prelude::*;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};

use crate::constants::{
    SELECTION_RING_COLOR, SELECTION_RING_INNER_RADIUS, SELECTION_RING_OUTER_RADIUS,
};
use crate::types::Selected;

/// Marker for a ring visual, pointing back at the unit it decorates.
#[derive(Component)]
pub struct SelectionRing {
    pub owner: Entity,
}

/// System: spawn a ground ring under newly selected units and remove rings
/// whose owner was deselected or despawned.
pub fn selection_ring_system(
    mut commands: Commands,
    newly_selected: Query<Entity, Added<Selected>>,
    still_selected: Query<(), With<Selected>>,
    rings: Query<(Entity, &SelectionRing)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (ring_entity, ring) in rings.iter() {
        if still_selected.get(ring.owner).is_err() {
            commands.entity(ring_entity).despawn();
        }
    }

    for owner in newly_selected.iter() {
        let ring = commands
            .spawn((
                Mesh3d(meshes.add(Torus::new(
                    SELECTION_RING_INNER_RADIUS,
                    SELECTION_RING_OUTER_RADIUS,
                ))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: SELECTION_RING_COLOR,
                    emissive: LinearRgba::new(0.1, 0.6, 0.7, 1.0),
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                // Flattened against the ground, relative to the unit origin
                Transform::from_xyz(0.0, -0.85, 0.0).with_scale(Vec3::new(1.0, 0.1, 1.0)),
                NotShadowCaster,
                NotShadowReceiver,
                SelectionRing { owner },
            ))
            .id();
        commands.entity(owner).add_child(ring);
    }
}
