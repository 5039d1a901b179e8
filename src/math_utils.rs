use bevy::prelude::*;

/// Ray-sphere intersection test
/// Returns Some((distance, hit_point)) if ray intersects sphere, None otherwise
pub fn ray_sphere_intersection(
    ray_origin: Vec3,
    ray_direction: Vec3,
    sphere_center: Vec3,
    sphere_radius: f32,
) -> Option<(f32, Vec3)> {
    let oc = ray_origin - sphere_center;
    let a = ray_direction.dot(ray_direction);
    let b = 2.0 * oc.dot(ray_direction);
    let c = oc.dot(oc) - sphere_radius * sphere_radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    // Find nearest intersection point (entry point into sphere)
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t > 0.0 {
        let hit_point = ray_origin + ray_direction * t;
        return Some((t, hit_point));
    }

    // Check far intersection (exit point, in case we're inside the sphere)
    let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
    if t2 > 0.0 {
        let hit_point = ray_origin + ray_direction * t2;
        return Some((t2, hit_point));
    }

    None
}

/// Ray intersection with the ground plane at y = 0
/// Returns Some((distance, hit_point)) for rays pointing at the plane
pub fn ray_ground_intersection(ray_origin: Vec3, ray_direction: Vec3) -> Option<(f32, Vec3)> {
    if ray_direction.y.abs() < 1e-4 {
        // Ray parallel to the ground, no intersection
        return None;
    }
    let t = -ray_origin.y / ray_direction.y;
    if t > 0.0 {
        Some((t, ray_origin + ray_direction * t))
    } else {
        // Intersection is behind the ray origin
        None
    }
}

/// Remaps a value within one range to its associated value within another
pub fn remap(val: f32, min: f32, max: f32, new_min: f32, new_max: f32) -> f32 {
    new_min + (val - min) * (new_max - new_min) / (max - min)
}

/// Remaps a value from [min, max] into [0, 1], clamped
pub fn remap01(val: f32, min: f32, max: f32) -> f32 {
    remap(val, min, max, 0.0, 1.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_at_entry_point() {
        let (t, point) =
            ray_sphere_intersection(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!(point.distance(Vec3::new(-1.0, 0.0, 0.0)) < 1e-5);

        assert!(ray_sphere_intersection(
            Vec3::new(-5.0, 3.0, 0.0),
            Vec3::X,
            Vec3::ZERO,
            1.0
        )
        .is_none());
    }

    #[test]
    fn ground_intersection_requires_a_descending_ray() {
        let down = Vec3::new(0.0, -1.0, 0.0);
        let (t, point) = ray_ground_intersection(Vec3::new(3.0, 10.0, -2.0), down).unwrap();
        assert!((t - 10.0).abs() < 1e-5);
        assert!(point.distance(Vec3::new(3.0, 0.0, -2.0)) < 1e-5);

        assert!(ray_ground_intersection(Vec3::new(0.0, 10.0, 0.0), Vec3::Y).is_none());
        assert!(ray_ground_intersection(Vec3::new(0.0, 10.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn remap01_clamps_outside_the_range() {
        assert_eq!(remap01(5.0, 0.0, 10.0), 0.5);
        assert_eq!(remap01(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(remap01(20.0, 0.0, 10.0), 1.0);
    }
}
