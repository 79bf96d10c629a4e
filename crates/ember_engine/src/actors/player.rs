//! The player actor

use crate::actor::{Actor, ActorCore, ActorError};

/// Player pawn; one per world during gameplay
#[derive(Default)]
pub struct Player {
    core: ActorCore,
    /// Action points available this turn
    pub action_points: u32,
    /// Maximum action points restored at turn start
    pub max_action_points: u32,
}

impl Actor for Player {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn start(&mut self) -> Result<(), ActorError> {
        if self.max_action_points == 0 {
            self.max_action_points = 10;
        }
        self.action_points = self.max_action_points;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_refills_action_points() {
        let mut player = Player::default();
        player.start().unwrap();
        assert_eq!(player.action_points, 10);
        assert_eq!(player.max_action_points, 10);
    }
}
