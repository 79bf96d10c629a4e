//! # Identity Registry
//!
//! Two non-owning lookup indices over the live actor population: UID to
//! actor and name to actor. The per-kind subsystems own actor storage; this
//! registry holds [`Weak`] handles only, and the world keeps both sides in
//! step so that an actor is findable exactly while it is live.

use std::collections::HashMap;
use std::rc::Weak;

use crate::actor::{Actor, ActorHandle, Uid};

use super::WorldError;

type WeakActor = Weak<std::cell::RefCell<dyn Actor>>;

/// Non-owning UID and name indices over all registered actors
#[derive(Default)]
pub struct IdentityRegistry {
    uid_index: HashMap<Uid, WeakActor>,
    name_index: HashMap<String, WeakActor>,
}

impl IdentityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor under its uid and name
    ///
    /// Fails with [`WorldError::DuplicateIdentity`] if either key is
    /// already present; on rejection neither index is mutated.
    pub fn add(&mut self, actor: &ActorHandle) -> Result<(), WorldError> {
        let (uid, name) = {
            let actor = actor.borrow();
            (actor.core().uid(), actor.core().name().to_string())
        };

        if self.uid_index.contains_key(&uid) || self.name_index.contains_key(&name) {
            return Err(WorldError::DuplicateIdentity { uid, name });
        }

        self.uid_index.insert(uid, std::rc::Rc::downgrade(actor));
        self.name_index.insert(name, std::rc::Rc::downgrade(actor));
        Ok(())
    }

    /// Remove both index entries for the given actor
    pub fn remove(&mut self, actor: &ActorHandle) {
        let actor = actor.borrow();
        self.uid_index.remove(&actor.core().uid());
        self.name_index.remove(actor.core().name());
    }

    /// Remove both index entries for the actor with the given uid
    ///
    /// Returns the removed actor, or `None` (leaving both indices
    /// untouched) if no actor is registered under that uid.
    pub fn remove_by_uid(&mut self, uid: Uid) -> Option<ActorHandle> {
        let actor = self.actor_by_uid_opt(uid)?;
        self.name_index.remove(actor.borrow().core().name());
        self.uid_index.remove(&uid);
        Some(actor)
    }

    /// Remove both index entries for the actor with the given name
    pub fn remove_by_name(&mut self, name: &str) -> Option<ActorHandle> {
        let actor = self.actor_by_name_opt(name)?;
        self.uid_index.remove(&actor.borrow().core().uid());
        self.name_index.remove(name);
        Some(actor)
    }

    /// Look up an actor by uid; absence is a caller precondition failure
    pub fn actor_by_uid(&self, uid: Uid) -> Result<ActorHandle, WorldError> {
        self.uid_index
            .get(&uid)
            .map(Self::upgrade)
            .ok_or_else(|| WorldError::NotFound {
                query: format!("uid {uid}"),
            })
    }

    /// Look up an actor by name; absence is a caller precondition failure
    pub fn actor_by_name(&self, name: &str) -> Result<ActorHandle, WorldError> {
        self.name_index
            .get(name)
            .map(Self::upgrade)
            .ok_or_else(|| WorldError::NotFound {
                query: format!("name `{name}`"),
            })
    }

    /// Look up an actor by uid where absence is a normal outcome
    ///
    /// Logs a diagnostic on a miss and returns `None`.
    pub fn actor_by_uid_opt(&self, uid: Uid) -> Option<ActorHandle> {
        let found = self.uid_index.get(&uid).map(Self::upgrade);
        if found.is_none() {
            log::warn!("actor with uid {uid} not found");
        }
        found
    }

    /// Look up an actor by name where absence is a normal outcome
    pub fn actor_by_name_opt(&self, name: &str) -> Option<ActorHandle> {
        let found = self.name_index.get(name).map(Self::upgrade);
        if found.is_none() {
            log::warn!("actor `{name}` not found");
        }
        found
    }

    /// Whether an actor is registered under the given uid; never mutates
    pub fn contains_uid(&self, uid: Uid) -> bool {
        self.uid_index.contains_key(&uid)
    }

    /// Whether an actor is registered under the given name; never mutates
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Number of registered actors
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.uid_index.len(), self.name_index.len());
        self.uid_index.len()
    }

    /// Whether no actors are registered
    pub fn is_empty(&self) -> bool {
        self.uid_index.is_empty()
    }

    /// Empty both indices without touching actor storage
    ///
    /// Only valid during subsystem-driven teardown, where the subsystems
    /// themselves deallocate the instances afterward.
    pub fn clear(&mut self) {
        self.uid_index.clear();
        self.name_index.clear();
    }

    // A dead weak reference means subsystem storage and the identity
    // indices diverged: a logic bug, not recoverable runtime state.
    fn upgrade(weak: &WeakActor) -> ActorHandle {
        weak.upgrade()
            .expect("identity registry entry points at freed actor storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorCore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Plain {
        core: ActorCore,
    }

    impl Actor for Plain {
        fn core(&self) -> &ActorCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ActorCore {
            &mut self.core
        }
    }

    fn plain(uid: u64, name: &str) -> ActorHandle {
        let mut actor = Plain::default();
        actor
            .core_mut()
            .assign_identity(Uid(uid), name.to_string(), "Plain");
        Rc::new(RefCell::new(actor))
    }

    #[test]
    fn test_indices_stay_in_step() {
        let mut registry = IdentityRegistry::new();
        let a = plain(1, "p");
        let b = plain(2, "q");

        registry.add(&a).unwrap();
        registry.add(&b).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains_uid(Uid(1)) && registry.contains_name("p"));
        assert!(registry.contains_uid(Uid(2)) && registry.contains_name("q"));

        registry.remove(&a);
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_uid(Uid(1)) && !registry.contains_name("p"));
        assert!(registry.contains_uid(Uid(2)) && registry.contains_name("q"));
    }

    #[test]
    fn test_duplicate_add_rejected_atomically() {
        let mut registry = IdentityRegistry::new();
        let first = plain(1, "p");
        registry.add(&first).unwrap();

        // Colliding uid with a fresh name: neither index may change.
        let uid_clash = plain(1, "r");
        let err = registry.add(&uid_clash).unwrap_err();
        assert!(matches!(err, WorldError::DuplicateIdentity { .. }));
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_name("r"));

        // Colliding name with a fresh uid.
        let name_clash = plain(3, "p");
        assert!(registry.add(&name_clash).is_err());
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_uid(Uid(3)));

        assert_eq!(registry.actor_by_uid(Uid(1)).unwrap().borrow().core().name(), "p");
    }

    #[test]
    fn test_fail_fast_and_nullable_lookups() {
        let mut registry = IdentityRegistry::new();
        // The registry holds weak references; the test keeps the actor
        // alive the way an owning subsystem would.
        let actor = plain(1, "p");
        registry.add(&actor).unwrap();

        assert!(registry.actor_by_uid(Uid(1)).is_ok());
        assert!(matches!(
            registry.actor_by_uid(Uid(9)),
            Err(WorldError::NotFound { .. })
        ));
        assert!(matches!(
            registry.actor_by_name("ghost"),
            Err(WorldError::NotFound { .. })
        ));

        assert!(registry.actor_by_uid_opt(Uid(9)).is_none());
        assert!(registry.actor_by_name_opt("ghost").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_missing_leaves_indices_unchanged() {
        let mut registry = IdentityRegistry::new();
        let actor = plain(1, "p");
        registry.add(&actor).unwrap();

        assert!(registry.remove_by_uid(Uid(9)).is_none());
        assert!(registry.remove_by_name("ghost").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_by_either_key_clears_both() {
        let mut registry = IdentityRegistry::new();
        let a = plain(1, "p");
        let b = plain(2, "q");
        registry.add(&a).unwrap();
        registry.add(&b).unwrap();

        let removed = registry.remove_by_name("p").unwrap();
        assert_eq!(removed.borrow().core().uid(), Uid(1));
        assert!(!registry.contains_uid(Uid(1)));

        let removed = registry.remove_by_uid(Uid(2)).unwrap();
        assert_eq!(removed.borrow().core().name(), "q");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_empties_both_indices() {
        let mut registry = IdentityRegistry::new();
        let actor = plain(1, "p");
        registry.add(&actor).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.contains_uid(Uid(1)));
        assert!(!registry.contains_name("p"));
    }
}
