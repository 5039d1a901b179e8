// Drag state machine and commit-time selection
use bevy::prelude::*;

use super::geometry::{resolve_volume, ScreenRect, SelectionVolume};
use super::registry::SelectableRegistry;

/// First intersection of a corner ray with the scene.
pub struct RayHit {
    pub point: Vec3,
    pub entity: Option<Entity>,
}

/// Casts a ray from the viewpoint through a screen position into the scene.
/// Ray construction is the provider's concern; the controller only deals in
/// screen points.
pub trait ScreenRayCaster {
    fn cast(&self, screen_pos: Vec2) -> Option<RayHit>;
}

/// Returns all selectable-category entities whose collision geometry
/// overlaps the oriented box. No ordering is guaranteed.
pub trait VolumeOverlap {
    fn overlap(&self, volume: &SelectionVolume) -> Vec<Entity>;
}

/// Drag-rectangle overlay surface. The controller drives it every tick while
/// dragging; it never reads back from it.
pub trait OverlayRect {
    fn set_rect(&mut self, top_left: Vec2, size: Vec2);
    fn set_visible(&mut self, visible: bool);
}

/// Pointer state polled once per frame and handed to [`SelectionController::tick`].
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    /// Cursor position in window pixels, if the cursor is inside the window.
    pub cursor: Option<Vec2>,
    pub just_pressed: bool,
    pub pressed: bool,
    pub just_released: bool,
}

/// Emitted exactly twice per drag interaction: once on drag start (always
/// empty) and once on commit (possibly empty). Carries the current selection
/// in selection order.
#[derive(Event, Clone, Debug)]
pub struct SelectionChanged {
    pub selected: Vec<Entity>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Owns the drag state machine and the ordered set of selected entities.
/// All mutation of either happens inside [`tick`](Self::tick), driven by the
/// host's per-frame schedule; commit is instantaneous, not a resting state.
#[derive(Resource, Default)]
pub struct SelectionController {
    phase: DragPhase,
    start: Vec2,
    end: Vec2,
    selected: Vec<Entity>,
}

impl SelectionController {
    /// Currently selected entities in selection order.
    #[allow(dead_code)]
    pub fn selected(&self) -> &[Entity] {
        &self.selected
    }

    #[allow(dead_code)]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Advance the state machine by one frame of pointer input.
    ///
    /// Returns a [`SelectionChanged`] notification on the two transition
    /// frames (drag start and commit), `None` otherwise.
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        caster: &impl ScreenRayCaster,
        overlap: &impl VolumeOverlap,
        registry: &mut SelectableRegistry,
        overlay: &mut impl OverlayRect,
    ) -> Option<SelectionChanged> {
        match self.phase {
            DragPhase::Idle => {
                let Some(cursor) = input.cursor else {
                    return None;
                };
                if !input.just_pressed {
                    return None;
                }
                // New drag: every previous member gets exactly one deselect
                for &entity in &self.selected {
                    registry.deselect(entity);
                }
                self.selected.clear();
                self.start = cursor;
                self.end = cursor;
                self.phase = DragPhase::Dragging;
                overlay.set_rect(cursor, Vec2::ZERO);
                overlay.set_visible(true);
                Some(SelectionChanged {
                    selected: Vec::new(),
                })
            }
            DragPhase::Dragging => {
                // Keep the last known end position if the cursor left the window
                if let Some(cursor) = input.cursor {
                    self.end = cursor;
                }
                let rect = ScreenRect {
                    start: self.start,
                    end: self.end,
                };
                // A release event can be missed if it happens outside the
                // window; a no-longer-pressed button commits either way
                if !input.just_released && input.pressed {
                    overlay.set_rect(rect.top_left(), rect.size());
                    return None;
                }

                // Commit: resolve the volume and populate the selection
                self.phase = DragPhase::Idle;
                overlay.set_visible(false);
                match resolve_volume(&rect, caster) {
                    Ok(volume) => {
                        for entity in overlap.overlap(&volume) {
                            // Registry filtering doubles as the category
                            // check and the exactly-once guard
                            if registry.select(entity) {
                                self.selected.push(entity);
                            }
                        }
                    }
                    Err(err) => {
                        // Degrades to an empty selection, never surfaced
                        debug!("selection volume unresolved ({err:?}), nothing selected");
                    }
                }
                Some(SelectionChanged {
                    selected: self.selected.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::geometry::ResolveError;

    /// Top-down fake camera, 0.1 world units per pixel, ground at y = 0.
    struct GroundPicker;

    impl ScreenRayCaster for GroundPicker {
        fn cast(&self, screen_pos: Vec2) -> Option<RayHit> {
            let offset = (screen_pos - Vec2::new(200.0, 200.0)) * 0.1;
            Some(RayHit {
                point: Vec3::new(offset.x, 0.0, offset.y),
                entity: None,
            })
        }
    }

    struct VoidPicker;

    impl ScreenRayCaster for VoidPicker {
        fn cast(&self, _screen_pos: Vec2) -> Option<RayHit> {
            None
        }
    }

    /// Overlap provider over a fixed set of sphere colliders.
    struct SphereWorld {
        colliders: Vec<(Entity, Vec3, f32)>,
    }

    impl VolumeOverlap for SphereWorld {
        fn overlap(&self, volume: &SelectionVolume) -> Vec<Entity> {
            self.colliders
                .iter()
                .filter(|(_, center, radius)| volume.overlaps_sphere(*center, *radius))
                .map(|(entity, _, _)| *entity)
                .collect()
        }
    }

    /// Records overlay calls for assertions.
    #[derive(Default)]
    struct RecordingOverlay {
        visible: bool,
        rect: Option<(Vec2, Vec2)>,
    }

    impl OverlayRect for RecordingOverlay {
        fn set_rect(&mut self, top_left: Vec2, size: Vec2) {
            self.rect = Some((top_left, size));
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    fn snapshot(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            cursor: Some(cursor),
            ..default()
        }
    }

    fn press(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            just_pressed: true,
            pressed: true,
            ..snapshot(cursor)
        }
    }

    fn hold(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            pressed: true,
            ..snapshot(cursor)
        }
    }

    fn release(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            just_released: true,
            ..snapshot(cursor)
        }
    }

    fn mint_entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    /// Drives one full drag cycle and returns the emitted notifications.
    fn run_drag(
        controller: &mut SelectionController,
        registry: &mut SelectableRegistry,
        world: &SphereWorld,
        start: Vec2,
        end: Vec2,
    ) -> Vec<SelectionChanged> {
        let mut overlay = RecordingOverlay::default();
        let mid = (start + end) / 2.0;
        [press(start), hold(mid), hold(end), release(end)]
            .iter()
            .filter_map(|input| {
                controller.tick(input, &GroundPicker, world, registry, &mut overlay)
            })
            .collect()
    }

    #[test]
    fn full_drag_emits_empty_then_result() {
        let entities = mint_entities(2);
        let mut registry = SelectableRegistry::default();
        registry.register(entities[0]);
        registry.register(entities[1]);
        let world = SphereWorld {
            colliders: vec![
                (entities[0], Vec3::new(2.0, 0.0, 2.0), 0.8),
                (entities[1], Vec3::new(50.0, 0.0, 50.0), 0.8),
            ],
        };

        let mut controller = SelectionController::default();
        // Screen rect covering world (-10..10) on both ground axes
        let events = run_drag(
            &mut controller,
            &mut registry,
            &world,
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 300.0),
        );

        assert_eq!(events.len(), 2, "one cycle emits exactly two notifications");
        assert!(events[0].selected.is_empty());
        assert_eq!(events[1].selected, vec![entities[0]]);
        assert_eq!(controller.selected(), &[entities[0]]);
        assert!(registry.is_selected(entities[0]));
        assert!(!registry.is_selected(entities[1]));
    }

    #[test]
    fn new_drag_clears_previous_selection_once() {
        let entities = mint_entities(1);
        let mut registry = SelectableRegistry::default();
        registry.register(entities[0]);
        let world = SphereWorld {
            colliders: vec![(entities[0], Vec3::ZERO, 0.8)],
        };

        let mut controller = SelectionController::default();
        run_drag(
            &mut controller,
            &mut registry,
            &world,
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 300.0),
        );
        assert!(registry.is_selected(entities[0]));

        // Second drag over empty ground: start notification clears the set
        let events = run_drag(
            &mut controller,
            &mut registry,
            &world,
            Vec2::new(350.0, 350.0),
            Vec2::new(380.0, 380.0),
        );
        assert_eq!(events.len(), 2);
        assert!(events[0].selected.is_empty());
        assert!(!registry.is_selected(entities[0]));
        // The deselect already happened; a second one would be a violation
        assert!(!registry.deselect(entities[0]));
    }

    #[test]
    fn zero_area_click_selects_nothing() {
        let entities = mint_entities(1);
        let mut registry = SelectableRegistry::default();
        registry.register(entities[0]);
        let world = SphereWorld {
            colliders: vec![(entities[0], Vec3::ZERO, 5.0)],
        };

        let mut controller = SelectionController::default();
        let cursor = Vec2::new(200.0, 200.0);
        let events = run_drag(&mut controller, &mut registry, &world, cursor, cursor);

        assert_eq!(events.len(), 2);
        assert!(events[1].selected.is_empty());
        assert!(!registry.is_selected(entities[0]));
    }

    #[test]
    fn missed_corner_rays_fall_back_to_empty_selection() {
        let entities = mint_entities(1);
        let mut registry = SelectableRegistry::default();
        registry.register(entities[0]);
        let world = SphereWorld {
            colliders: vec![(entities[0], Vec3::ZERO, 5.0)],
        };

        let mut controller = SelectionController::default();
        let mut overlay = RecordingOverlay::default();
        let events: Vec<_> = [
            press(Vec2::new(100.0, 100.0)),
            release(Vec2::new(300.0, 300.0)),
        ]
        .iter()
        .filter_map(|input| {
            controller.tick(input, &VoidPicker, &world, &mut registry, &mut overlay)
        })
        .collect();

        assert_eq!(events.len(), 2);
        assert!(events[1].selected.is_empty());
        assert!(!controller.is_dragging());
        assert!(!overlay.visible);
    }

    #[test]
    fn unregistered_entities_are_filtered_out() {
        let entities = mint_entities(2);
        let mut registry = SelectableRegistry::default();
        registry.register(entities[0]);
        // entities[1] overlaps but never registered as selectable
        let world = SphereWorld {
            colliders: vec![
                (entities[0], Vec3::ZERO, 0.8),
                (entities[1], Vec3::new(1.0, 0.0, 1.0), 0.8),
            ],
        };

        let mut controller = SelectionController::default();
        let events = run_drag(
            &mut controller,
            &mut registry,
            &world,
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 300.0),
        );
        assert_eq!(events[1].selected, vec![entities[0]]);
    }

    #[test]
    fn overlay_tracks_the_drag_rectangle() {
        let mut registry = SelectableRegistry::default();
        let world = SphereWorld { colliders: vec![] };
        let mut controller = SelectionController::default();
        let mut overlay = RecordingOverlay::default();

        controller.tick(
            &press(Vec2::new(300.0, 100.0)),
            &GroundPicker,
            &world,
            &mut registry,
            &mut overlay,
        );
        assert!(overlay.visible);

        // Dragging up-left: overlay rect is normalized to min corner + size
        controller.tick(
            &hold(Vec2::new(100.0, 50.0)),
            &GroundPicker,
            &world,
            &mut registry,
            &mut overlay,
        );
        let (top_left, size) = overlay.rect.unwrap();
        assert_eq!(top_left, Vec2::new(100.0, 50.0));
        assert_eq!(size, Vec2::new(200.0, 50.0));

        controller.tick(
            &release(Vec2::new(100.0, 50.0)),
            &GroundPicker,
            &world,
            &mut registry,
            &mut overlay,
        );
        assert!(!overlay.visible);
    }

    #[test]
    fn resolve_errors_match_taxonomy() {
        // Sanity check the two failure modes reachable from a commit
        let rect = ScreenRect {
            start: Vec2::new(10.0, 10.0),
            end: Vec2::new(10.0, 10.0),
        };
        assert_eq!(
            resolve_volume(&rect, &GroundPicker).unwrap_err(),
            ResolveError::Degenerate
        );
        assert_eq!(
            resolve_volume(&rect, &VoidPicker).unwrap_err(),
            ResolveError::NoHit
        );
    }
}
