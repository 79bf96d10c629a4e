//! # Per-Kind Actor Subsystems
//!
//! One [`ActorSystem`] exists per concrete actor kind and owns the storage
//! backing every live instance of that kind. The world orchestrator talks
//! to subsystems through the object-safe [`AnyActorSystem`] trait so it can
//! hold an open set of heterogeneous kinds in one active list.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::{DefaultKey, SlotMap};

use super::{Actor, ActorHandle, LifecycleStage, Uid};

/// Capability set shared by every actor-kind subsystem
///
/// `actors_as_base` materializes a fresh snapshot of base-typed handles;
/// not a live view. Callers may add or remove actors while iterating a
/// previously taken snapshot, but must re-fetch to observe new instances.
pub trait AnyActorSystem: Any {
    /// The kind tag this subsystem owns storage for
    fn name(&self) -> &'static str;

    /// Whether this kind appears in world-layer listings
    ///
    /// Set at registration time; trigger and static-mesh kinds opt out.
    fn layer_listed(&self) -> bool;

    /// One-time subsystem initialization at world start
    fn init(&mut self);

    /// Update every active instance of this kind that has reached the
    /// `Active` stage
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
    fn actors_as_base(&self) -> Vec<ActorHandle>;

    /// Allocate storage for a default-constructed instance
    ///
    /// The identity (uid, name, kind tag) is stamped onto the new actor's
    /// core before the handle is returned. Registration with the identity
    /// registry is the caller's responsibility; on a registry rejection the
    /// caller rolls this allocation back via [`AnyActorSystem::remove`].
    fn spawn_default(&mut self, uid: Uid, name: String) -> ActorHandle;

    /// Remove one instance's storage; returns false if the uid is not here
    fn remove(&mut self, uid: Uid) -> bool;

    /// Downcast support for typed access
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support for typed access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Owner of all live instances of one actor kind
pub struct ActorSystem<A: Actor + Default> {
    kind_name: &'static str,
    layer_listed: bool,
    actors: SlotMap<DefaultKey, Rc<RefCell<A>>>,
    uid_to_key: HashMap<Uid, DefaultKey>,
}

impl<A: Actor + Default> ActorSystem<A> {
    /// Create an empty subsystem for the given kind tag
    pub fn new(kind_name: &'static str, layer_listed: bool) -> Self {
        Self {
            kind_name,
            layer_listed,
            actors: SlotMap::new(),
            uid_to_key: HashMap::new(),
        }
    }

    /// Allocate a default-constructed instance and return a typed handle
    pub fn spawn(&mut self, uid: Uid, name: String) -> Rc<RefCell<A>> {
        let mut actor = A::default();
        actor.core_mut().assign_identity(uid, name, self.kind_name);

        let handle = Rc::new(RefCell::new(actor));
        let key = self.actors.insert(Rc::clone(&handle));
        self.uid_to_key.insert(uid, key);
        handle
    }

    /// Typed handle to an arbitrary live instance, if any
    ///
    /// Useful for singleton kinds like the player.
    pub fn first(&self) -> Option<Rc<RefCell<A>>> {
        self.actors.values().next().cloned()
    }

    /// Typed handle to the instance with the given uid
    pub fn get(&self, uid: Uid) -> Option<Rc<RefCell<A>>> {
        let key = self.uid_to_key.get(&uid)?;
        self.actors.get(*key).cloned()
    }
}

impl<A: Actor + Default> AnyActorSystem for ActorSystem<A> {
    fn name(&self) -> &'static str {
        self.kind_name
    }

    fn layer_listed(&self) -> bool {
        self.layer_listed
    }

    fn init(&mut self) {
        log::debug!("actor system `{}` initialised", self.kind_name);
    }

    fn tick(&mut self, delta_time: f32) {
        // Snapshot first: a handle taken here stays valid even if storage
        // changes between sweeps. Instance order follows storage order and
        // is not stable across additions/removals.
        let snapshot: Vec<Rc<RefCell<A>>> = self.actors.values().cloned().collect();

        for actor in snapshot {
            let mut actor = actor.borrow_mut();
            let core = actor.core();
            // Only fully woken actors tick; anything still mid-cascade or
            // already ended sits the sweep out.
            if !core.active || core.stage() != LifecycleStage::Active {
                continue;
            }
            actor.tick(delta_time);
        }
    }

    fn cleanup(&mut self) {
        for actor in self.actors.values() {
            actor.borrow_mut().core_mut().set_stage(LifecycleStage::Removed);
        }
        self.actors.clear();
        self.uid_to_key.clear();
        log::debug!("actor system `{}` cleaned up", self.kind_name);
    }

    fn len(&self) -> usize {
        self.actors.len()
    }

    fn actors_as_base(&self) -> Vec<ActorHandle> {
        self.actors
            .values()
            .map(|actor| Rc::clone(actor) as ActorHandle)
            .collect()
    }

    fn spawn_default(&mut self, uid: Uid, name: String) -> ActorHandle {
        self.spawn(uid, name)
    }

    fn remove(&mut self, uid: Uid) -> bool {
        match self.uid_to_key.remove(&uid) {
            Some(key) => {
                if let Some(actor) = self.actors.remove(key) {
                    actor.borrow_mut().core_mut().set_stage(LifecycleStage::Removed);
                }
                true
            }
            None => false,
        }
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
    use crate::actor::ActorCore;

    #[derive(Default)]
    struct Counter {
        core: ActorCore,
        ticks: u32,
    }

    impl Actor for Counter {
        fn core(&self) -> &ActorCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ActorCore {
            &mut self.core
        }
        fn tick(&mut self, _delta_time: f32) {
            self.ticks += 1;
        }
    }

    #[test]
    fn test_spawn_and_remove() {
        let mut system = ActorSystem::<Counter>::new("Counter", true);
        let actor = system.spawn(Uid(1), "Counter1".to_string());
        assert_eq!(system.len(), 1);
        assert_eq!(actor.borrow().core().kind(), "Counter");

        assert!(system.remove(Uid(1)));
        assert!(system.is_empty());
        assert_eq!(actor.borrow().core().stage(), LifecycleStage::Removed);
        assert!(!system.remove(Uid(1)));
    }

    #[test]
    fn test_tick_skips_inactive() {
        let mut system = ActorSystem::<Counter>::new("Counter", true);
        let running = system.spawn(Uid(1), "Counter1".to_string());
        let paused = system.spawn(Uid(2), "Counter2".to_string());
        running.borrow_mut().core_mut().set_stage(LifecycleStage::Active);
        paused.borrow_mut().core_mut().set_stage(LifecycleStage::Active);
        paused.borrow_mut().core_mut().active = false;

        system.tick(0.016);
        system.tick(0.016);

        assert_eq!(running.borrow().ticks, 2);
        assert_eq!(paused.borrow().ticks, 0);
    }

    #[test]
    fn test_tick_skips_actors_still_mid_cascade() {
        let mut system = ActorSystem::<Counter>::new("Counter", true);
        let unwoken = system.spawn(Uid(1), "Counter1".to_string());

        system.tick(0.016);
        assert_eq!(unwoken.borrow().ticks, 0);

        unwoken.borrow_mut().core_mut().set_stage(LifecycleStage::Active);
        system.tick(0.016);
        assert_eq!(unwoken.borrow().ticks, 1);
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let mut system = ActorSystem::<Counter>::new("Counter", true);
        system.spawn(Uid(1), "Counter1".to_string());

        let snapshot = system.actors_as_base();
        system.spawn(Uid(2), "Counter2".to_string());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(system.actors_as_base().len(), 2);
    }
}
