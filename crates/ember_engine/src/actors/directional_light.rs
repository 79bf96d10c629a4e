//! Directional (sun) light actor

use nalgebra::{UnitQuaternion, Vector3};

use crate::actor::{Actor, ActorCore};

/// Infinite-distance light; direction comes from the actor's rotation
#[derive(Default)]
pub struct DirectionalLightActor {
    core: ActorCore,
    /// Light color as linear RGB
    pub color: [f32; 3],
    /// Scalar brightness multiplier
    pub intensity: f32,
}

impl Actor for DirectionalLightActor {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }
}

impl DirectionalLightActor {
    /// Rotate the light to shine straight down
    pub fn point_down(&mut self) {
        let down = -Vector3::y();
        self.core.transform.rotation = UnitQuaternion::rotation_between(&Vector3::z(), &down)
            .unwrap_or_else(UnitQuaternion::identity);
    }

    /// Unit vector the light travels along
    pub fn direction(&self) -> Vector3<f32> {
        self.core.transform.rotation * Vector3::z()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_down_aims_along_negative_y() {
        let mut light = DirectionalLightActor::default();
        light.point_down();
        let direction = light.direction();
        assert_relative_eq!(direction.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(direction.x, 0.0, epsilon = 1e-5);
    }
}
