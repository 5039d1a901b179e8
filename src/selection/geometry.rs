// Screen-rect to world-space selection volume resolution
use bevy::prelude::*;

use crate::constants::SELECTION_VOLUME_DEPTH;

use super::controller::ScreenRayCaster;

/// Screen-space drag rectangle in window pixels (y grows downward).
/// No ordering constraint between start and end - the user may drag in any
/// of the four diagonal directions.
#[derive(Clone, Copy, Debug)]
pub struct ScreenRect {
    pub start: Vec2,
    pub end: Vec2,
}

impl ScreenRect {
    /// The four screen corners in raw order:
    /// start, (start.x, end.y), (end.x, start.y), end
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.start,
            Vec2::new(self.start.x, self.end.y),
            Vec2::new(self.end.x, self.start.y),
            self.end,
        ]
    }

    pub fn top_left(&self) -> Vec2 {
        self.start.min(self.end)
    }

    pub fn size(&self) -> Vec2 {
        (self.end - self.start).abs()
    }
}

/// Oriented selection box in world space, aligned to the plane spanned by the
/// four projected drag corners. Generally not axis-aligned unless the camera
/// looks straight down.
#[derive(Clone, Copy, Debug)]
pub struct SelectionVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
}

impl SelectionVolume {
    /// OBB vs sphere overlap test: clamp the sphere center (in box-local
    /// space) onto the box and compare the remaining distance to the radius.
    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        let local = self.rotation.inverse() * (center - self.center);
        let clamped = local.clamp(-self.half_extents, self.half_extents);
        local.distance_squared(clamped) <= radius * radius
    }
}

/// Failure modes of volume resolution. Both degrade to an empty selection at
/// the controller level; neither is surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A corner ray found no intersection. The scene is expected to carry a
    /// catch-all surface (oversized ground plane), so this is a fallback.
    NoHit,
    /// Zero-area or collinear drag corners - no valid box basis exists.
    Degenerate,
}

/// Cast the four corner rays into the scene and collect their world-space
/// hit points, in the same raw order as [`ScreenRect::corners`].
pub fn resolve_world_corners(
    rect: &ScreenRect,
    caster: &impl ScreenRayCaster,
) -> Result<[Vec3; 4], ResolveError> {
    let mut world = [Vec3::ZERO; 4];
    for (i, corner) in rect.corners().into_iter().enumerate() {
        world[i] = caster.cast(corner).ok_or(ResolveError::NoHit)?.point;
    }
    Ok(world)
}

/// Reorder raw world corners into a canonical clockwise winding
/// [BottomLeft, TopLeft, TopRight, BottomRight], independent of which
/// diagonal direction the drag went in.
///
/// "Bottom"/"top" are screen-relative with window coordinates (y down):
/// top-left is the corner with minimal x and minimal y. Each branch permutes
/// the same four entries of [`resolve_world_corners`]' output.
pub fn orient_corners(rect: &ScreenRect, corners: [Vec3; 4]) -> [Vec3; 4] {
    let [c0, c1, c2, c3] = corners;
    let rightward = rect.start.x < rect.end.x;
    let downward = rect.start.y < rect.end.y;
    match (rightward, downward) {
        // start is the top-left corner
        (true, true) => [c1, c0, c2, c3],
        // start is the bottom-left corner
        (true, false) => [c0, c1, c3, c2],
        // start is the bottom-right corner
        (false, false) => [c2, c3, c1, c0],
        // start is the top-right corner
        (false, true) => [c3, c2, c0, c1],
    }
}

/// Derive the oriented selection box from canonically ordered corners.
///
/// Width and height are averaged over the two opposing edges rather than
/// taken from a single edge, so slightly non-planar corner sets (uneven
/// terrain hits) still produce a representative size. Depth is a small fixed
/// extent along the plane normal so overlap queries behave against
/// zero-thickness geometry.
pub fn compute_volume(oriented: [Vec3; 4]) -> Result<SelectionVolume, ResolveError> {
    let [bl, tl, tr, br] = oriented;

    let width_vector = ((tr - tl) + (br - bl)) / 2.0;
    let height_vector = ((tl - bl) + (tr - br)) / 2.0;

    let x_axis = (br - bl).normalize_or_zero();
    let y_axis = (tl - bl).normalize_or_zero();
    if x_axis == Vec3::ZERO || y_axis == Vec3::ZERO {
        return Err(ResolveError::Degenerate);
    }
    let z_axis = x_axis.cross(y_axis);
    if z_axis.length_squared() < 1e-6 {
        // x and y collinear: the four corners sit on a line
        return Err(ResolveError::Degenerate);
    }
    let z_axis = z_axis.normalize();
    // Rebuild y from the plane normal so the basis is a proper rotation even
    // when the raw corner hits are not exactly planar.
    let y_axis = z_axis.cross(x_axis);
    let rotation = Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis));

    let center = (bl + tl + tr + br) / 4.0;
    let half_extents = Vec3::new(
        width_vector.length(),
        height_vector.length(),
        SELECTION_VOLUME_DEPTH,
    ) / 2.0;

    Ok(SelectionVolume {
        center,
        half_extents,
        rotation,
    })
}

/// Full pipeline: corner rays, canonical reordering, volume derivation.
pub fn resolve_volume(
    rect: &ScreenRect,
    caster: &impl ScreenRayCaster,
) -> Result<SelectionVolume, ResolveError> {
    let corners = resolve_world_corners(rect, caster)?;
    compute_volume(orient_corners(rect, corners))
}
