//! Built-in actor kinds
//!
//! The data-only kinds every world can assume: the player, the gameplay
//! grid, a directional light, static level meshes, and level-transition
//! triggers. Gameplay behavior beyond these fields belongs to the hosting
//! game, not the engine core.

pub mod directional_light;
pub mod entrance_trigger;
pub mod grid;
pub mod mesh_actor;
pub mod player;

pub use directional_light::DirectionalLightActor;
pub use entrance_trigger::EntranceTrigger;
pub use grid::Grid;
pub use mesh_actor::MeshActor;
pub use player::Player;

use crate::world::system_cache::{LayerListing, SystemCacheBuilder};

/// Register every built-in actor kind on a cache builder
///
/// Entrance triggers and static meshes register layer-hidden: world-list
/// tooling skips them.
pub fn register_builtin_actor_kinds(builder: SystemCacheBuilder) -> SystemCacheBuilder {
    builder
        .register_actor_kind::<Player>("Player", LayerListing::Listed)
        .register_actor_kind::<Grid>("Grid", LayerListing::Listed)
        .register_actor_kind::<DirectionalLightActor>("DirectionalLightActor", LayerListing::Listed)
        .register_actor_kind::<MeshActor>("MeshActor", LayerListing::Hidden)
        .register_actor_kind::<EntranceTrigger>("EntranceTrigger", LayerListing::Hidden)
}
