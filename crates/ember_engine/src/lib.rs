//! # Ember Engine
//!
//! The actor/component/world lifecycle core of a 3D game engine: the
//! registry of live game objects, the per-frame update cascade over their
//! per-kind subsystems, and the load/start/cleanup flow that keeps render,
//! audio, physics, and UI collaborators consistent across world
//! transitions.
//!
//! Rendering, physics integration, audio mixing, and asset I/O are outside
//! this crate; each sits behind a trait seam in
//! [`world::collaborators`] that the hosting application wires up.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ember_engine::foundation::logging::init();
//!
//!     let builder = ember_engine::actors::register_builtin_actor_kinds(SystemCache::builder());
//!     let cache = ember_engine::components::register_builtin_component_kinds(builder).build();
//!
//!     let mut engine = Engine::new(EngineConfig::default(), Collaborators::default());
//!     engine.init(&cache)?;
//!     engine.start()?;
//!     loop {
//!         engine.frame()?;
//!     }
//! }
//! ```

pub mod actor;
pub mod actors;
pub mod component;
pub mod components;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod world;

/// Commonly used types, importable in one line
pub mod prelude {
    pub use crate::actor::{Actor, ActorCore, ActorError, ActorHandle, LifecycleStage, Uid};
    pub use crate::component::{Component, ComponentCore, ComponentHandle};
    pub use crate::config::{Config, EngineConfig};
    pub use crate::engine::{Engine, EngineError};
    pub use crate::world::collaborators::Collaborators;
    pub use crate::world::system_cache::{LayerListing, SystemCache};
    pub use crate::world::{World, WorldError};
}
