//! # Component Model
//!
//! Components are sub-objects attached to actors, each providing one
//! capability (a mesh, a camera, ...). A component is owned by its parent
//! actor (its lifetime never outlasts the actor's) and is separately
//! indexed by its own per-kind subsystem for batch ticking.

pub mod system;

use std::cell::RefCell;
use std::rc::Rc;

use super::actor::{ActorError, Uid};

/// Shared, mutable handle to a type-erased component
pub type ComponentHandle = Rc<RefCell<dyn Component>>;

/// Ownership and activity state embedded in every component kind
#[derive(Debug, Clone)]
pub struct ComponentCore {
    owner: Uid,
    /// Whether the component participates in per-frame ticking
    pub active: bool,
}

impl Default for ComponentCore {
    fn default() -> Self {
        Self {
            owner: Uid(0),
            active: true,
        }
    }
}

impl ComponentCore {
    /// Uid of the actor that owns this component
    pub fn owner(&self) -> Uid {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Uid) {
        self.owner = owner;
    }
}

/// Lifecycle interface every component kind implements
///
/// Mirrors the actor hooks with a single `start` phase: all components are
/// started in one sweep before the actor wake cascade runs.
pub trait Component: 'static {
    /// Immutable access to the embedded core
    fn core(&self) -> &ComponentCore;

    /// Mutable access to the embedded core
    fn core_mut(&mut self) -> &mut ComponentCore;

    /// One-time setup after world load, before any actor wakes
    fn start(&mut self) -> Result<(), ActorError> {
        Ok(())
    }

    /// Per-frame update, called while the component is active
    fn tick(&mut self, _delta_time: f32) {}

    /// Teardown hook
    fn end(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        core: ComponentCore,
    }

    impl Component for Probe {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ComponentCore {
            &mut self.core
        }
    }

    #[test]
    fn test_core_defaults() {
        let probe = Probe::default();
        assert!(probe.core().active);
        assert_eq!(probe.core().owner(), Uid(0));
    }

    #[test]
    fn test_owner_assignment() {
        let mut probe = Probe::default();
        probe.core_mut().set_owner(Uid(42));
        assert_eq!(probe.core().owner(), Uid(42));
    }
}
