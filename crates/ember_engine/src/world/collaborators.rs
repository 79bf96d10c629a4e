//! # External Collaborator Interfaces
//!
//! The world core never renders, mixes audio, or touches disk itself. Each
//! of those concerns lives behind one of the trait seams here; the engine's
//! host wires concrete implementations in, and null defaults keep headless
//! and test setups trivial.

use std::time::Instant;

use thiserror::Error;

use super::World;

/// Failure from the persistence collaborator
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// IO failure reading or writing a world file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// World file contents could not be parsed
    #[error("Parse error in `{path}`: {message}")]
    Parse {
        /// File that failed to parse
        path: String,
        /// Parser diagnostic
        message: String,
    },

    /// World file references an actor kind no subsystem owns
    #[error("unknown actor kind `{0}` in world file")]
    UnknownKind(String),

    /// Anything else the collaborator wants to surface
    #[error("{0}")]
    Other(String),
}

/// Loads and saves world state
///
/// `load_world` populates the identity registry and per-kind subsystems of
/// the given world; `serialise_all_systems` persists the current live
/// state. Long-running I/O is entirely this collaborator's business.
pub trait Persistence {
    /// Populate the world from the named world file
    fn load_world(&mut self, path: &str, world: &mut World) -> Result<(), PersistenceError>;

    /// Persist the world's current live state under the given path
    fn serialise_all_systems(&mut self, world: &World, path: &str)
        -> Result<(), PersistenceError>;
}

/// Device-resource owner notified around world transitions
///
/// Textures and materials each sit behind one of these: `create_all` runs
/// once after world load before gameplay starts, `cleanup` during world
/// teardown.
pub trait RenderResourceStore {
    /// Allocate device resources for everything the loaded world references
    fn create_all(&mut self);

    /// Release all device resources
    fn cleanup(&mut self);
}

/// Observational timing hooks around each per-frame tick sweep
pub trait Profiler {
    /// A named scope begins
    fn begin(&mut self, label: &'static str);

    /// The most recent scope with this label ends
    fn end(&mut self, label: &'static str);
}

/// One-way notifications to an attached editor
pub trait EditorLink {
    /// Actors were spawned outside the normal load flow
    fn update_world_list(&mut self);
}

/// Stateful collaborator that can be reset during world teardown
pub trait Resettable {
    /// Drop all state tied to the outgoing world
    fn reset(&mut self);
}

/// Persistence that loads nothing and saves nowhere
///
/// Default wiring for tests and tooling that build worlds in memory.
#[derive(Default)]
pub struct NullPersistence;

impl Persistence for NullPersistence {
    fn load_world(&mut self, path: &str, _world: &mut World) -> Result<(), PersistenceError> {
        log::debug!("null persistence: skipping load of `{path}`");
        Ok(())
    }

    fn serialise_all_systems(
        &mut self,
        _world: &World,
        path: &str,
    ) -> Result<(), PersistenceError> {
        log::debug!("null persistence: skipping save to `{path}`");
        Ok(())
    }
}

/// Render-resource store with no device behind it
#[derive(Default)]
pub struct NullResourceStore;

impl RenderResourceStore for NullResourceStore {
    fn create_all(&mut self) {}
    fn cleanup(&mut self) {}
}

/// Profiler that ignores every scope
#[derive(Default)]
pub struct NullProfiler;

impl Profiler for NullProfiler {
    fn begin(&mut self, _label: &'static str) {}
    fn end(&mut self, _label: &'static str) {}
}

/// Profiler that traces scope durations through the logging system
#[derive(Default)]
pub struct LogProfiler {
    open_scopes: Vec<(&'static str, Instant)>,
}

impl Profiler for LogProfiler {
    fn begin(&mut self, label: &'static str) {
        self.open_scopes.push((label, Instant::now()));
    }

    fn end(&mut self, label: &'static str) {
        let position = self
            .open_scopes
            .iter()
            .rposition(|(open, _)| *open == label);
        match position {
            Some(index) => {
                let (_, started) = self.open_scopes.remove(index);
                log::trace!("{label}: {:?}", started.elapsed());
            }
            None => log::warn!("profiler scope `{label}` ended without a begin"),
        }
    }
}

/// Editor link with nobody listening
#[derive(Default)]
pub struct NullEditor;

impl EditorLink for NullEditor {
    fn update_world_list(&mut self) {}
}

/// Resettable collaborator with no state
#[derive(Default)]
pub struct NullResettable;

impl Resettable for NullResettable {
    fn reset(&mut self) {}
}

/// Every collaborator the world synchronizes against, in one bundle
///
/// Field order here is incidental; the teardown order that matters is
/// fixed inside `World::cleanup`.
pub struct Collaborators {
    /// World file load/save
    pub persistence: Box<dyn Persistence>,
    /// Texture device resources
    pub textures: Box<dyn RenderResourceStore>,
    /// Material device resources
    pub materials: Box<dyn RenderResourceStore>,
    /// Tick-sweep timing observer
    pub profiler: Box<dyn Profiler>,
    /// Attached editor, if any
    pub editor: Box<dyn EditorLink>,
    /// Scheduled-timer state
    pub timers: Box<dyn Resettable>,
    /// Physics simulation state
    pub physics: Box<dyn Resettable>,
    /// Loaded audio and playing channels
    pub audio: Box<dyn Resettable>,
    /// Sprite batches
    pub sprites: Box<dyn Resettable>,
    /// UI widget state
    pub ui: Box<dyn Resettable>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            persistence: Box::new(NullPersistence),
            textures: Box::new(NullResourceStore),
            materials: Box::new(NullResourceStore),
            profiler: Box::new(NullProfiler),
            editor: Box::new(NullEditor),
            timers: Box::new(NullResettable),
            physics: Box::new(NullResettable),
            audio: Box::new(NullResettable),
            sprites: Box::new(NullResettable),
            ui: Box::new(NullResettable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_profiler_balances_scopes() {
        let mut profiler = LogProfiler::default();
        profiler.begin("actors");
        profiler.begin("components");
        profiler.end("components");
        profiler.end("actors");
        assert!(profiler.open_scopes.is_empty());
    }

    #[test]
    fn test_log_profiler_tolerates_unmatched_end() {
        let mut profiler = LogProfiler::default();
        profiler.end("never-opened");
        assert!(profiler.open_scopes.is_empty());
    }
}
