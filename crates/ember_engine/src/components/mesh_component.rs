//! Mesh component

use crate::actor::ActorError;
use crate::component::{Component, ComponentCore};

/// Renderable mesh attached to an actor
#[derive(Default)]
pub struct MeshComponent {
    core: ComponentCore,
    /// Mesh asset to render
    pub mesh_filename: String,
    /// Whether the renderer should draw this mesh
    pub visible: bool,
    started: bool,
}

impl Component for MeshComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn start(&mut self) -> Result<(), ActorError> {
        if self.mesh_filename.is_empty() {
            return Err(ActorError::new("mesh component started without a mesh"));
        }
        self.visible = true;
        self.started = true;
        Ok(())
    }

    fn end(&mut self) {
        self.visible = false;
    }
}

impl MeshComponent {
    /// Build a component for the given mesh asset
    pub fn with_mesh(mesh_filename: impl Into<String>) -> Self {
        Self {
            mesh_filename: mesh_filename.into(),
            ..Self::default()
        }
    }

    /// Whether `start` has completed
    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requires_mesh() {
        let mut empty = MeshComponent::default();
        assert!(empty.start().is_err());

        let mut mesh = MeshComponent::with_mesh("node.fbx");
        mesh.start().unwrap();
        assert!(mesh.visible);
        assert!(mesh.is_started());
    }

    #[test]
    fn test_end_hides_mesh() {
        let mut mesh = MeshComponent::with_mesh("node.fbx");
        mesh.start().unwrap();
        mesh.end();
        assert!(!mesh.visible);
    }
}
