//! # Per-Kind Component Subsystems
//!
//! One [`ComponentSystem`] per component kind, holding the storage that
//! backs every live instance for batch ticking. Matches the actor-side
//! subsystem contract: snapshots are freshly materialized, never live
//! views.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{DefaultKey, SlotMap};

use super::{Component, ComponentHandle};
use crate::actor::Uid;

/// Capability set shared by every component-kind subsystem
pub trait AnyComponentSystem: Any {
    /// The kind tag this subsystem owns storage for
    fn name(&self) -> &'static str;

    /// One-time subsystem initialization at world start
    fn init(&mut self);

    /// Update every live, active instance of this kind
    fn tick(&mut self, delta_time: f32);

    /// Drop all storage for this kind
    fn cleanup(&mut self);

    /// Number of live instances
    fn len(&self) -> usize;

    /// Whether no instances are live
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fresh snapshot of all live instances as base-typed handles
    fn components_as_base(&self) -> Vec<ComponentHandle>;

    /// Remove every component owned by the given actor
    ///
    /// Called by the world when the actor is destroyed; this is what bounds
    /// component lifetime by owner lifetime.
    fn remove_owned_by(&mut self, owner: Uid) -> usize;

    /// Downcast support for typed access
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support for typed access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Owner of all live instances of one component kind
pub struct ComponentSystem<C: Component + Default> {
    kind_name: &'static str,
    components: SlotMap<DefaultKey, Rc<RefCell<C>>>,
}

impl<C: Component + Default> ComponentSystem<C> {
    /// Create an empty subsystem for the given kind tag
    pub fn new(kind_name: &'static str) -> Self {
        Self {
            kind_name,
            components: SlotMap::new(),
        }
    }

    /// Attach a new default-constructed component to the given actor
    pub fn attach(&mut self, owner: Uid) -> Rc<RefCell<C>> {
        self.attach_with(owner, C::default())
    }

    /// Attach a pre-built component to the given actor
    pub fn attach_with(&mut self, owner: Uid, mut component: C) -> Rc<RefCell<C>> {
        component.core_mut().set_owner(owner);
        let handle = Rc::new(RefCell::new(component));
        self.components.insert(Rc::clone(&handle));
        handle
    }
}

impl<C: Component + Default> AnyComponentSystem for ComponentSystem<C> {
    fn name(&self) -> &'static str {
        self.kind_name
    }

    fn init(&mut self) {
        log::debug!("component system `{}` initialised", self.kind_name);
    }

    fn tick(&mut self, delta_time: f32) {
        let snapshot: Vec<Rc<RefCell<C>>> = self.components.values().cloned().collect();

        for component in snapshot {
            let mut component = component.borrow_mut();
            if !component.core().active {
                continue;
            }
            component.tick(delta_time);
        }
    }

    fn cleanup(&mut self) {
        self.components.clear();
        log::debug!("component system `{}` cleaned up", self.kind_name);
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn components_as_base(&self) -> Vec<ComponentHandle> {
        self.components
            .values()
            .map(|component| Rc::clone(component) as ComponentHandle)
            .collect()
    }

    fn remove_owned_by(&mut self, owner: Uid) -> usize {
        let doomed: Vec<DefaultKey> = self
            .components
            .iter()
            .filter(|(_, component)| component.borrow().core().owner() == owner)
            .map(|(key, _)| key)
            .collect();

        for key in &doomed {
            if let Some(component) = self.components.remove(*key) {
                component.borrow_mut().end();
            }
        }
        doomed.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentCore;

    #[derive(Default)]
    struct Probe {
        core: ComponentCore,
        ticks: u32,
        ended: bool,
    }

    impl Component for Probe {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ComponentCore {
            &mut self.core
        }
        fn tick(&mut self, _delta_time: f32) {
            self.ticks += 1;
        }
        fn end(&mut self) {
            self.ended = true;
        }
    }

    #[test]
    fn test_attach_and_tick() {
        let mut system = ComponentSystem::<Probe>::new("Probe");
        let probe = system.attach(Uid(1));
        system.tick(0.016);
        assert_eq!(probe.borrow().ticks, 1);
        assert_eq!(probe.borrow().core().owner(), Uid(1));
    }

    #[test]
    fn test_remove_owned_by_is_selective() {
        let mut system = ComponentSystem::<Probe>::new("Probe");
        let mine = system.attach(Uid(1));
        let _mine_too = system.attach(Uid(1));
        let theirs = system.attach(Uid(2));

        assert_eq!(system.remove_owned_by(Uid(1)), 2);
        assert_eq!(system.len(), 1);
        assert!(mine.borrow().ended);
        assert!(!theirs.borrow().ended);
    }
}
