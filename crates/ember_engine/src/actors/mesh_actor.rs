//! Static mesh actor

use crate::actor::{Actor, ActorCore};

/// Level geometry placed directly in the world
///
/// Static meshes register layer-hidden: they make up the level itself and
/// would drown out the interesting actors in world-list tooling.
#[derive(Default)]
pub struct MeshActor {
    core: ActorCore,
    /// Mesh asset this actor renders, resolved by the asset collaborator
    pub mesh_filename: String,
}

impl Actor for MeshActor {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }
}
