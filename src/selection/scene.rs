// Bevy-side selection providers: corner ray casting and volume overlap
use bevy::prelude::*;

use crate::math_utils::{ray_ground_intersection, ray_sphere_intersection};
use crate::types::Selectable;

use super::controller::{RayHit, ScreenRayCaster, VolumeOverlap};
use super::geometry::SelectionVolume;

/// Query shape shared by both providers: every selectable collider sphere.
pub type SelectableColliders<'w, 's> =
    Query<'w, 's, (Entity, &'static GlobalTransform, &'static Selectable)>;

/// Adapts the active camera and the selectable collider set to the provider
/// traits consumed by the selection controller. Built fresh each frame from
/// borrowed query data.
pub struct ScenePicker<'a, 'w, 's> {
    pub camera: &'a Camera,
    pub camera_transform: &'a GlobalTransform,
    pub colliders: &'a SelectableColliders<'w, 's>,
}

impl ScreenRayCaster for ScenePicker<'_, '_, '_> {
    fn cast(&self, screen_pos: Vec2) -> Option<RayHit> {
        let ray = self
            .camera
            .viewport_to_world(self.camera_transform, screen_pos)
            .ok()?;
        let origin = ray.origin;
        let direction = *ray.direction;

        // Nearest hit among unit collider spheres and the ground plane; the
        // plane doubles as the catch-all surface so corner rays over open
        // terrain still resolve.
        let mut nearest: Option<(f32, RayHit)> = None;
        for (entity, transform, selectable) in self.colliders.iter() {
            if let Some((t, point)) =
                ray_sphere_intersection(origin, direction, transform.translation(), selectable.radius)
            {
                if nearest.as_ref().map_or(true, |(best, _)| t < *best) {
                    nearest = Some((
                        t,
                        RayHit {
                            point,
                            entity: Some(entity),
                        },
                    ));
                }
            }
        }
        if let Some((t, point)) = ray_ground_intersection(origin, direction) {
            if nearest.as_ref().map_or(true, |(best, _)| t < *best) {
                nearest = Some((t, RayHit { point, entity: None }));
            }
        }
        nearest.map(|(_, hit)| hit)
    }
}

impl VolumeOverlap for ScenePicker<'_, '_, '_> {
    fn overlap(&self, volume: &SelectionVolume) -> Vec<Entity> {
        self.colliders
            .iter()
            .filter(|(_, transform, selectable)| {
                volume.overlaps_sphere(transform.translation(), selectable.radius)
            })
            .map(|(entity, _, _)| entity)
            .collect()
    }
}
