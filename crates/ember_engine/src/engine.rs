//! Core engine implementation
//!
//! The [`Engine`] owns the world and the frame clock and is the engine
//! main loop's side of the world contract: it is the only caller of the
//! per-frame tick sweeps and of the world's lifecycle cascades.

use thiserror::Error;

use crate::config::EngineConfig;
use crate::foundation::time::Timer;
use crate::world::collaborators::Collaborators;
use crate::world::system_cache::SystemCache;
use crate::world::{World, WorldError};

/// Main engine struct
///
/// Coordinates the world against the host's frame loop: init once, start
/// once, then one `frame` call per simulation step until teardown.
pub struct Engine {
    /// The live world and its registries
    pub world: World,
    timer: Timer,
    started: bool,
}

impl Engine {
    /// Create an engine with the given configuration and collaborators
    pub fn new(config: EngineConfig, collaborators: Collaborators) -> Self {
        log::info!("initialising engine");
        let mut world = World::new(config);
        world.collaborators = collaborators;
        Self {
            world,
            timer: Timer::new(),
            started: false,
        }
    }

    /// Populate the world's system lists and load the starting map
    pub fn init(&mut self, cache: &SystemCache) -> Result<(), EngineError> {
        self.world.init(cache)?;
        Ok(())
    }

    /// Bring the loaded world up and begin gameplay if configured
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.world.start()?;
        self.started = true;
        self.timer.reset();
        log::info!("engine started");
        Ok(())
    }

    /// Run one simulation frame
    ///
    /// Updates the frame clock, then sweeps all actor systems and all
    /// component systems with the measured delta time.
    pub fn frame(&mut self) -> Result<(), EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }

        self.timer.update();
        let delta_time = self.timer.delta_time();

        self.world.tick_all_actor_systems(delta_time)?;
        self.world.tick_all_component_systems(delta_time)?;
        Ok(())
    }

    /// Persist the current world state as an in-game save
    pub fn save(&mut self) -> Result<(), EngineError> {
        self.world.save_world_state()?;
        Ok(())
    }

    /// Replace the current world contents with another world file
    pub fn load(&mut self, world_name: &str) -> Result<(), EngineError> {
        self.world.end_all_actors();
        self.world.cleanup();
        self.world.load_world(world_name)?;
        self.world.start()?;
        Ok(())
    }

    /// Tear the world down: end every actor, then clean up in order
    pub fn cleanup(&mut self) {
        self.world.end_all_actors();
        self.world.cleanup();
        self.started = false;
        log::info!("engine cleaned up");
    }

    /// Frame clock shared with the host loop
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A world operation failed
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// `frame` was called before `start` completed
    #[error("engine frame requested before start")]
    NotStarted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorCore};
    use crate::world::system_cache::LayerListing;

    #[derive(Default)]
    struct Pawn {
        core: ActorCore,
        ticks: u32,
    }

    impl Actor for Pawn {
        fn core(&self) -> &ActorCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ActorCore {
            &mut self.core
        }
        fn tick(&mut self, _delta_time: f32) {
            self.ticks += 1;
        }
    }

    fn pawn_cache() -> SystemCache {
        SystemCache::builder()
            .register_actor_kind::<Pawn>("Pawn", LayerListing::Listed)
            .build()
    }

    #[test]
    fn test_frame_before_start_is_rejected() {
        let mut engine = Engine::new(EngineConfig::default(), Collaborators::default());
        engine.init(&pawn_cache()).unwrap();
        assert!(matches!(engine.frame(), Err(EngineError::NotStarted)));
    }

    #[test]
    fn test_frames_tick_the_world() {
        let mut engine = Engine::new(EngineConfig::default(), Collaborators::default());
        engine.init(&pawn_cache()).unwrap();
        engine.start().unwrap();

        let pawn = engine.world.spawn::<Pawn>(Some("pawn")).unwrap();
        engine.frame().unwrap();
        engine.frame().unwrap();
        assert_eq!(pawn.borrow().ticks, 2);
        assert_eq!(engine.timer().frame_count(), 2);
    }

    #[test]
    fn test_cleanup_empties_the_world() {
        let mut engine = Engine::new(EngineConfig::default(), Collaborators::default());
        engine.init(&pawn_cache()).unwrap();
        engine.start().unwrap();
        engine.world.spawn::<Pawn>(Some("pawn")).unwrap();

        engine.cleanup();

        assert!(engine.world.all_actors().is_empty());
        assert!(!engine.world.actor_exists_by_name("pawn"));
        assert!(matches!(engine.frame(), Err(EngineError::NotStarted)));
    }
}
