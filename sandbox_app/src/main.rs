//! Headless sandbox for the ember world lifecycle
//!
//! Builds the system cache, wires a RON-file persistence collaborator,
//! loads (or creates) a world, runs a handful of frames, saves, and tears
//! everything down. No window, no renderer: the null collaborators stand
//! in for every device-facing subsystem.

mod persistence;

use ember_engine::prelude::*;
use ember_engine::world::collaborators::LogProfiler;
use ember_engine::{actors, components, foundation};

use persistence::RonWorldSource;

const FRAMES_TO_RUN: u32 = 120;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    foundation::logging::init();

    let builder = actors::register_builtin_actor_kinds(SystemCache::builder());
    let cache = components::register_builtin_component_kinds(builder).build();

    let config = match EngineConfig::load_from_file("engine.toml") {
        Ok(config) => config,
        Err(err) => {
            log::info!("no engine.toml ({err}); using defaults");
            EngineConfig::default()
        }
    };

    let mut collaborators = Collaborators::default();
    collaborators.persistence = Box::new(RonWorldSource::default());
    collaborators.profiler = Box::new(LogProfiler::default());

    let mut engine = Engine::new(config, collaborators);
    engine.init(&cache)?;

    if engine.world.all_actors().is_empty() {
        log::info!("starting map was empty; spawning default map actors");
        engine.world.create_default_map_actors()?;
    }

    engine.start()?;

    for _ in 0..FRAMES_TO_RUN {
        engine.frame()?;
    }

    engine.save()?;
    engine.cleanup();

    log::info!("sandbox finished cleanly");
    Ok(())
}
