// Per-frame selection systems: input polling, controller tick, marker sync
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::types::{RtsCamera, Selectable, Selected};

use super::controller::{InputSnapshot, OverlayRect, SelectionChanged, SelectionController};
use super::registry::SelectableRegistry;
use super::scene::{ScenePicker, SelectableColliders};

/// Handle to the drag-rectangle UI node, created once at startup and handed
/// to the selection systems by resource injection.
#[derive(Resource)]
pub struct SelectionOverlay {
    pub entity: Entity,
}

/// Marker for the drag-rectangle UI node.
#[derive(Component)]
pub struct SelectionBoxOverlay;

/// Adapts the overlay UI node components to the controller-facing trait.
struct UiOverlay<'a> {
    node: Mut<'a, Node>,
    visibility: Mut<'a, Visibility>,
}

impl OverlayRect for UiOverlay<'_> {
    fn set_rect(&mut self, top_left: Vec2, size: Vec2) {
        self.node.left = Val::Px(top_left.x);
        self.node.top = Val::Px(top_left.y);
        self.node.width = Val::Px(size.x);
        self.node.height = Val::Px(size.y);
    }

    fn set_visible(&mut self, visible: bool) {
        *self.visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Mirror `Selectable` component lifecycles into the registry so despawned
/// or stripped entities can never linger in a selection.
pub fn register_selectables_system(
    mut registry: ResMut<SelectableRegistry>,
    added: Query<Entity, Added<Selectable>>,
    mut removed: RemovedComponents<Selectable>,
) {
    for entity in added.iter() {
        registry.register(entity);
    }
    for entity in removed.read() {
        registry.unregister(entity);
    }
}

/// System: poll pointer state, advance the drag state machine, and on a
/// transition frame sync `Selected` markers and publish the notification.
pub fn selection_tick_system(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    colliders: SelectableColliders,
    marked: Query<Entity, With<Selected>>,
    overlay: Res<SelectionOverlay>,
    mut overlay_query: Query<(&mut Node, &mut Visibility), With<SelectionBoxOverlay>>,
    mut controller: ResMut<SelectionController>,
    mut registry: ResMut<SelectableRegistry>,
    mut events: EventWriter<SelectionChanged>,
) {
    let Ok(window) = window_query.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Ok((node, visibility)) = overlay_query.get_mut(overlay.entity) else { return };

    let input = InputSnapshot {
        cursor: window.cursor_position(),
        just_pressed: mouse_button.just_pressed(MouseButton::Left),
        pressed: mouse_button.pressed(MouseButton::Left),
        just_released: mouse_button.just_released(MouseButton::Left),
    };
    let picker = ScenePicker {
        camera,
        camera_transform,
        colliders: &colliders,
    };
    let mut ui_overlay = UiOverlay { node, visibility };

    let Some(event) = controller.tick(&input, &picker, &picker, &mut registry, &mut ui_overlay)
    else {
        return;
    };

    // Apply the selected/deselected state transitions as marker components
    for entity in marked.iter() {
        if !registry.is_selected(entity) {
            commands.entity(entity).remove::<Selected>();
        }
    }
    for &entity in &event.selected {
        commands.entity(entity).insert(Selected);
    }

    if !event.selected.is_empty() {
        info!("Selected {} units", event.selected.len());
    }
    events.write(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_follows_selectable_component_lifecycle() {
        let mut app = App::new();
        app.init_resource::<SelectableRegistry>();
        app.add_systems(Update, register_selectables_system);

        let entity = app
            .world_mut()
            .spawn(Selectable { radius: 1.0 })
            .id();
        app.update();
        assert!(app
            .world()
            .resource::<SelectableRegistry>()
            .is_registered(entity));

        app.world_mut().entity_mut(entity).despawn();
        app.update();
        assert!(!app
            .world()
            .resource::<SelectableRegistry>()
            .is_registered(entity));
    }
}
