//! The gameplay grid actor

use crate::actor::{Actor, ActorCore, ActorError};

/// Walkable grid the world is played on
#[derive(Default)]
pub struct Grid {
    core: ActorCore,
    /// Number of cells along X
    pub size_x: u32,
    /// Number of cells along Y
    pub size_y: u32,
}

impl Actor for Grid {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn awake(&mut self) -> Result<(), ActorError> {
        if self.size_x == 0 || self.size_y == 0 {
            return Err(ActorError::new(format!(
                "grid `{}` has a zero dimension ({}x{})",
                self.core.name(),
                self.size_x,
                self.size_y
            )));
        }
        Ok(())
    }
}

impl Grid {
    /// Total cell count
    pub fn cell_count(&self) -> u32 {
        self.size_x * self.size_y
    }
}
