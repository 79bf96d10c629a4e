//! # System Cache
//!
//! Process-wide registry of every actor-kind and component-kind subsystem,
//! populated exactly once at startup and read-only afterward. The world
//! orchestrator copies references into its own active lists at `init`.
//!
//! Registration order is insertion order and must be treated as arbitrary
//! by dependents; the only guaranteed separation is actor kinds versus
//! component kinds.

use std::cell::RefCell;
use std::rc::Rc;

use crate::actor::system::{ActorSystem, AnyActorSystem};
use crate::actor::Actor;
use crate::component::system::{AnyComponentSystem, ComponentSystem};
use crate::component::Component;

/// Shared handle to a type-erased actor-kind subsystem
pub type ActorSystemRef = Rc<RefCell<dyn AnyActorSystem>>;

/// Shared handle to a type-erased component-kind subsystem
pub type ComponentSystemRef = Rc<RefCell<dyn AnyComponentSystem>>;

/// Whether a kind appears in world-layer listings
///
/// Replaces a hand-maintained exclusion list at the query site: each kind
/// states its participation once, at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerListing {
    /// Shown by editor and world-list tooling
    Listed,
    /// Hidden from layer listings (triggers, static level meshes)
    Hidden,
}

/// Sealed registry of all per-kind subsystems
pub struct SystemCache {
    actor_systems: Vec<ActorSystemRef>,
    component_systems: Vec<ComponentSystemRef>,
}

impl SystemCache {
    /// Start registering kinds
    pub fn builder() -> SystemCacheBuilder {
        SystemCacheBuilder {
            actor_systems: Vec::new(),
            component_systems: Vec::new(),
        }
    }

    /// All registered actor-kind subsystems, in registration order
    pub fn actor_systems(&self) -> &[ActorSystemRef] {
        &self.actor_systems
    }

    /// All registered component-kind subsystems, in registration order
    pub fn component_systems(&self) -> &[ComponentSystemRef] {
        &self.component_systems
    }
}

/// One-shot builder for the [`SystemCache`]
///
/// Consuming `build` is what makes the cache populate-once: there is no way
/// to add a kind after sealing.
pub struct SystemCacheBuilder {
    actor_systems: Vec<ActorSystemRef>,
    component_systems: Vec<ComponentSystemRef>,
}

impl SystemCacheBuilder {
    /// Register one actor kind with its layer-listing attribute
    pub fn register_actor_kind<A: Actor + Default>(
        mut self,
        name: &'static str,
        listing: LayerListing,
    ) -> Self {
        let listed = listing == LayerListing::Listed;
        self.actor_systems
            .push(Rc::new(RefCell::new(ActorSystem::<A>::new(name, listed))));
        self
    }

    /// Register one component kind
    pub fn register_component_kind<C: Component + Default>(mut self, name: &'static str) -> Self {
        self.component_systems
            .push(Rc::new(RefCell::new(ComponentSystem::<C>::new(name))));
        self
    }

    /// Seal the cache
    pub fn build(self) -> SystemCache {
        log::info!(
            "system cache sealed: {} actor kinds, {} component kinds",
            self.actor_systems.len(),
            self.component_systems.len()
        );
        SystemCache {
            actor_systems: self.actor_systems,
            component_systems: self.component_systems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorCore;
    use crate::component::ComponentCore;

    #[derive(Default)]
    struct Crate {
        core: ActorCore,
    }
    impl Actor for Crate {
        fn core(&self) -> &ActorCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ActorCore {
            &mut self.core
        }
    }

    #[derive(Default)]
    struct Tag {
        core: ComponentCore,
    }
    impl Component for Tag {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ComponentCore {
            &mut self.core
        }
    }

    #[test]
    fn test_registration_order_preserved() {
        let cache = SystemCache::builder()
            .register_actor_kind::<Crate>("CrateA", LayerListing::Listed)
            .register_actor_kind::<Crate>("CrateB", LayerListing::Hidden)
            .register_component_kind::<Tag>("Tag")
            .build();

        let names: Vec<&str> = cache
            .actor_systems()
            .iter()
            .map(|system| system.borrow().name())
            .collect();
        assert_eq!(names, vec!["CrateA", "CrateB"]);
        assert_eq!(cache.component_systems().len(), 1);
    }

    #[test]
    fn test_layer_listing_attribute() {
        let cache = SystemCache::builder()
            .register_actor_kind::<Crate>("Shown", LayerListing::Listed)
            .register_actor_kind::<Crate>("Hidden", LayerListing::Hidden)
            .build();

        assert!(cache.actor_systems()[0].borrow().layer_listed());
        assert!(!cache.actor_systems()[1].borrow().layer_listed());
    }
}
