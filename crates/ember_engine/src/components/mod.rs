//! Built-in component kinds

pub mod camera_component;
pub mod mesh_component;

pub use camera_component::CameraComponent;
pub use mesh_component::MeshComponent;

use crate::world::system_cache::SystemCacheBuilder;

/// Register every built-in component kind on a cache builder
pub fn register_builtin_component_kinds(builder: SystemCacheBuilder) -> SystemCacheBuilder {
    builder
        .register_component_kind::<MeshComponent>("MeshComponent")
        .register_component_kind::<CameraComponent>("CameraComponent")
}
