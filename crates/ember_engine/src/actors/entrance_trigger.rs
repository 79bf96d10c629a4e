//! Level-transition trigger actor

use crate::actor::{Actor, ActorCore};

/// Trigger volume that moves the player to another map
///
/// A save may legitimately reference no matching trigger (the player saved
/// mid-level); callers resolve triggers through the allow-null lookup path.
#[derive(Default)]
pub struct EntranceTrigger {
    core: ActorCore,
    /// Map file this entrance leads to
    pub destination_map: String,
    /// Whether the trigger currently accepts the player
    pub open: bool,
}

impl Actor for EntranceTrigger {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }
}
