//! RON-file persistence for world state

use std::io::ErrorKind;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use ember_engine::world::collaborators::{Persistence, PersistenceError};
use ember_engine::world::{World, WorldError};

/// One actor as stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct ActorRecord {
    kind: String,
    name: String,
    position: [f32; 3],
    active: bool,
}

/// A world file: the flat list of actors to respawn
#[derive(Debug, Default, Serialize, Deserialize)]
struct WorldFile {
    actors: Vec<ActorRecord>,
}

/// Loads and saves worlds as RON files
///
/// A missing world file is not an error: the sandbox treats it as an empty
/// map and lets the caller decide whether to spawn defaults.
#[derive(Default)]
pub struct RonWorldSource;

impl Persistence for RonWorldSource {
    fn load_world(&mut self, path: &str, world: &mut World) -> Result<(), PersistenceError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("world file `{path}` does not exist; loading empty world");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let file: WorldFile = ron::from_str(&contents).map_err(|err| PersistenceError::Parse {
            path: path.to_string(),
            message: err.to_string(),
        })?;

        for record in file.actors {
            let actor = match world.spawn_by_kind(&record.kind, Some(&record.name)) {
                Ok(actor) => actor,
                Err(WorldError::UnknownKind(kind)) => {
                    return Err(PersistenceError::UnknownKind(kind));
                }
                Err(err) => return Err(PersistenceError::Other(err.to_string())),
            };
            let mut actor = actor.borrow_mut();
            actor.core_mut().active = record.active;
            actor.core_mut().transform.position = Vector3::from(record.position);
        }
        Ok(())
    }

    fn serialise_all_systems(
        &mut self,
        world: &World,
        path: &str,
    ) -> Result<(), PersistenceError> {
        let file = WorldFile {
            actors: world
                .all_actors()
                .iter()
                .map(|handle| {
                    let actor = handle.borrow();
                    let core = actor.core();
                    ActorRecord {
                        kind: core.kind().to_string(),
                        name: core.name().to_string(),
                        position: core.transform.position.into(),
                        active: core.active,
                    }
                })
                .collect(),
        };

        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())
            .map_err(|err| PersistenceError::Other(err.to_string()))?;
        std::fs::write(path, text)?;
        log::info!("serialised {} actors to `{path}`", file.actors.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_engine::actors::register_builtin_actor_kinds;
    use ember_engine::prelude::*;

    fn builtin_world() -> World {
        let cache = register_builtin_actor_kinds(SystemCache::builder()).build();
        let mut world = World::new(EngineConfig::default());
        world.init(&cache).unwrap();
        world
    }

    #[test]
    fn test_load_round_trips_through_ron_text() {
        let text = r#"(
            actors: [
                (kind: "Player", name: "hero", position: (1.0, 0.0, 2.0), active: true),
                (kind: "Grid", name: "board", position: (0.0, 0.0, 0.0), active: false),
            ],
        )"#;
        let file: WorldFile = ron::from_str(text).unwrap();

        let mut world = builtin_world();
        for record in file.actors {
            let actor = world
                .spawn_by_kind(&record.kind, Some(&record.name))
                .unwrap();
            actor.borrow_mut().core_mut().active = record.active;
        }

        assert!(world.actor_exists_by_name("hero"));
        let board = world.actor_by_name("board").unwrap();
        assert!(!board.borrow().core().active);
    }

    #[test]
    fn test_unknown_kind_surfaces_as_persistence_error() {
        let mut world = builtin_world();
        let mut source = RonWorldSource;

        let dir = std::env::temp_dir().join("ember_sandbox_unknown_kind");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ron");
        std::fs::write(
            &path,
            r#"(actors: [(kind: "Dragon", name: "d", position: (0.0, 0.0, 0.0), active: true)])"#,
        )
        .unwrap();

        let err = source
            .load_world(path.to_str().unwrap(), &mut world)
            .unwrap_err();
        assert!(matches!(err, PersistenceError::UnknownKind(_)));
    }
}
