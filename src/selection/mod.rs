// Selection module - drag-box unit selection
//
// Submodules:
// - geometry: screen rect -> oriented world-space selection volume
// - controller: drag state machine, commit-time selection, provider traits
// - registry: selectable entity registry (category filter + select state)
// - scene: Bevy camera/collider adapters for the provider traits
// - systems: per-frame input polling, controller tick, marker sync
// - visuals: selection ring feedback

pub mod controller;
pub mod geometry;
mod registry;
mod scene;
mod systems;
mod visuals;

// Re-export main types for external use
pub use controller::{InputSnapshot, SelectionChanged, SelectionController};
pub use geometry::{ResolveError, ScreenRect, SelectionVolume};
pub use registry::SelectableRegistry;

// Re-export systems for main.rs
pub use systems::{
    register_selectables_system, selection_tick_system, SelectionBoxOverlay, SelectionOverlay,
};
pub use visuals::selection_ring_system;
