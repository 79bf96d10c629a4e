//! Camera component

use crate::component::{Component, ComponentCore};

/// Camera attached to an actor
///
/// The field of view eases toward `next_fov` each frame so zoom changes
/// (for example focusing on a dialogue target) land smoothly.
pub struct CameraComponent {
    core: ComponentCore,
    /// Current vertical field of view in degrees
    pub fov: f32,
    /// Field of view the camera is easing toward
    pub next_fov: f32,
    /// Degrees per second of FOV change
    pub zoom_speed: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            core: ComponentCore::default(),
            fov: 60.0,
            next_fov: 60.0,
            zoom_speed: 90.0,
        }
    }
}

impl Component for CameraComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn tick(&mut self, delta_time: f32) {
        if self.fov == self.next_fov {
            return;
        }
        let step = self.zoom_speed * delta_time;
        if (self.next_fov - self.fov).abs() <= step {
            self.fov = self.next_fov;
        } else if self.next_fov > self.fov {
            self.fov += step;
        } else {
            self.fov -= step;
        }
    }
}

impl CameraComponent {
    /// Start easing toward a new field of view
    pub fn zoom_to(&mut self, fov: f32) {
        self.next_fov = fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_eases_toward_target() {
        let mut camera = CameraComponent::default();
        camera.zoom_to(30.0);

        camera.tick(0.1); // 9 degrees of travel
        assert_relative_eq!(camera.fov, 51.0, epsilon = 1e-4);

        for _ in 0..10 {
            camera.tick(0.5);
        }
        assert_relative_eq!(camera.fov, 30.0);
    }

    #[test]
    fn test_zoom_does_not_overshoot() {
        let mut camera = CameraComponent::default();
        camera.zoom_to(59.0);
        camera.tick(1.0);
        assert_relative_eq!(camera.fov, 59.0);
    }
}
