// Selectable entity registry - the category filter for overlap results
use bevy::prelude::*;
use std::collections::HashSet;

/// Tracks which entities participate in selection and which of them are
/// currently selected. Entities register when their `Selectable` component
/// is added and unregister when it is removed or the entity despawns;
/// overlap-query results are filtered against this set instead of probing
/// each hit for a capability at selection time.
///
/// `select`/`deselect` enforce the exactly-once invariant: a member never
/// sees a second select without an intervening deselect.
#[derive(Resource, Default)]
pub struct SelectableRegistry {
    registered: HashSet<Entity>,
    selected: HashSet<Entity>,
}

impl SelectableRegistry {
    pub fn register(&mut self, entity: Entity) {
        self.registered.insert(entity);
    }

    pub fn unregister(&mut self, entity: Entity) {
        self.registered.remove(&entity);
        self.selected.remove(&entity);
    }

    #[allow(dead_code)]
    pub fn is_registered(&self, entity: Entity) -> bool {
        self.registered.contains(&entity)
    }

    pub fn is_selected(&self, entity: Entity) -> bool {
        self.selected.contains(&entity)
    }

    /// Mark an entity selected. Returns false (and does nothing) for
    /// unregistered or already-selected entities.
    pub fn select(&mut self, entity: Entity) -> bool {
        self.registered.contains(&entity) && self.selected.insert(entity)
    }

    /// Returns whether the entity had been selected.
    pub fn deselect(&mut self, entity: Entity) -> bool {
        self.selected.remove(&entity)
    }

    #[allow(dead_code)]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}
