//! # World Orchestration
//!
//! The [`World`] composes the identity registry and the per-kind actor and
//! component subsystems into the load/start/tick/cleanup cascades every
//! other engine subsystem synchronizes against. All registries are instance
//! state: independent worlds (one per test, say) coexist freely.
//!
//! The global invariant this module exists to protect: every actor present
//! in the identity registry is owned by exactly one per-kind subsystem, and
//! vice versa. Spawn registers storage and identity as one step from the
//! caller's point of view, and destroy removes both together: an actor is
//! never findable without being live, nor live without being findable.

pub mod collaborators;
pub mod identity;
pub mod system_cache;

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Vector3;
use thiserror::Error;

use crate::actor::system::{ActorSystem, AnyActorSystem};
use crate::actor::{Actor, ActorError, ActorHandle, LifecycleStage, Uid};
use crate::component::system::ComponentSystem;
use crate::component::{Component, ComponentHandle};
use crate::config::EngineConfig;

use collaborators::{Collaborators, NullPersistence, Persistence, PersistenceError};
use identity::IdentityRegistry;
use system_cache::{ActorSystemRef, ComponentSystemRef, SystemCache};

/// Errors surfaced by world orchestration
#[derive(Error, Debug)]
pub enum WorldError {
    /// An actor with this uid or name is already registered
    #[error("duplicate identity: uid {uid} or name `{name}` already registered")]
    DuplicateIdentity {
        /// Colliding uid
        uid: Uid,
        /// Colliding name
        name: String,
    },

    /// A lookup whose caller asserted presence found nothing
    #[error("no actor found for {query}")]
    NotFound {
        /// Human-readable description of the failed lookup
        query: String,
    },

    /// `init` was called on an already-initialised world
    #[error("world is already initialised")]
    DoubleInit,

    /// An operation ran before the world finished `init`
    #[error("`{0}` requires a completed world init")]
    MissingCollaboratorState(&'static str),

    /// No subsystem owns the requested kind
    #[error("unknown actor or component kind `{0}`")]
    UnknownKind(String),

    /// The persistence collaborator failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Orchestrator for one loaded game level/session
pub struct World {
    identity: IdentityRegistry,
    actor_systems: Vec<ActorSystemRef>,
    component_systems: Vec<ComponentSystemRef>,
    world_filename: String,
    next_uid: u64,
    initialised: bool,
    started: bool,
    config: EngineConfig,
    /// External collaborator seams; hosts swap in concrete implementations
    pub collaborators: Collaborators,
}

impl World {
    /// Create an empty, uninitialised world with null collaborators
    pub fn new(config: EngineConfig) -> Self {
        Self {
            identity: IdentityRegistry::new(),
            actor_systems: Vec::new(),
            component_systems: Vec::new(),
            world_filename: String::new(),
            next_uid: 0,
            initialised: false,
            started: false,
            config,
            collaborators: Collaborators::default(),
        }
    }

    /// Populate the active-system lists and load the starting world
    ///
    /// One-time: a second call fails with [`WorldError::DoubleInit`].
    pub fn init(&mut self, cache: &SystemCache) -> Result<(), WorldError> {
        if self.initialised {
            return Err(WorldError::DoubleInit);
        }

        self.actor_systems = cache.actor_systems().to_vec();
        self.component_systems = cache.component_systems().to_vec();
        self.initialised = true;
        log::info!(
            "world init: {} actor systems, {} component systems active",
            self.actor_systems.len(),
            self.component_systems.len()
        );

        let starting_map = self.config.starting_map.clone();
        self.load_world(&starting_map)
    }

    /// Bring the loaded world up: device resources, subsystem init, and,
    /// when gameplay is on, the component start sweep and actor wake cascade
    pub fn start(&mut self) -> Result<(), WorldError> {
        self.require_init("start")?;

        self.collaborators.materials.create_all();
        self.collaborators.textures.create_all();

        for system in &self.actor_systems {
            system.borrow_mut().init();
        }
        for system in &self.component_systems {
            system.borrow_mut().init();
        }

        if self.config.gameplay_on {
            self.start_all_components();
            self.wake_and_start_all_actors();
        }
        self.started = true;
        Ok(())
    }

    /// Run the three-phase wake cascade over a snapshot of all actors
    ///
    /// Strict barriers: every actor's `awake` completes before any actor's
    /// `start` begins, and every `start` before any `late_start`. A hook
    /// failure is isolated (logged, the actor left in its prior stage and
    /// skipped by later phases) and the cascade continues.
    pub fn wake_and_start_all_actors(&mut self) {
        Self::run_cascade(&self.all_actors());
    }

    fn run_cascade(actors: &[ActorHandle]) {
        Self::run_phase(
            actors,
            "awake",
            LifecycleStage::Registered,
            LifecycleStage::Awake,
            |actor| actor.awake(),
        );
        Self::run_phase(
            actors,
            "start",
            LifecycleStage::Awake,
            LifecycleStage::Started,
            |actor| actor.start(),
        );
        Self::run_phase(
            actors,
            "late_start",
            LifecycleStage::Started,
            LifecycleStage::LateStarted,
            |actor| actor.late_start(),
        );

        for handle in actors {
            let mut actor = handle.borrow_mut();
            if actor.core().stage() == LifecycleStage::LateStarted {
                actor.core_mut().set_stage(LifecycleStage::Active);
            }
        }
    }

    fn run_phase(
        actors: &[ActorHandle],
        phase: &str,
        expected: LifecycleStage,
        next: LifecycleStage,
        hook: fn(&mut dyn Actor) -> Result<(), ActorError>,
    ) {
        for handle in actors {
            let mut actor = handle.borrow_mut();
            if actor.core().stage() != expected {
                continue;
            }
            match hook(&mut *actor) {
                Ok(()) => actor.core_mut().set_stage(next),
                Err(err) => {
                    log::error!("actor `{}` failed {phase}: {err}", actor.core().name());
                }
            }
        }
    }

    /// An actor created after `start` missed the bulk cascade; with gameplay
    /// running it gets the same stage-gated phases at spawn, so it joins the
    /// frame loop as `Active`. Hook failures follow the isolation policy.
    fn wake_spawned_actor(&self, handle: &ActorHandle) {
        if self.started && self.config.gameplay_on {
            Self::run_cascade(std::slice::from_ref(handle));
        }
    }

    /// Start every registered component, once, before the actor cascade
    ///
    /// A failed component is logged and deactivated rather than ticked in
    /// a half-initialised state.
    pub fn start_all_components(&mut self) {
        for handle in self.all_components() {
            let mut component = handle.borrow_mut();
            if let Err(err) = component.start() {
                log::error!(
                    "component of actor uid {} failed start: {err}",
                    component.core().owner()
                );
                component.core_mut().active = false;
            }
        }
    }

    /// Invoke `end` on every registered actor during world teardown
    pub fn end_all_actors(&mut self) {
        for handle in self.all_actors() {
            let mut actor = handle.borrow_mut();
            actor.end();
            actor.core_mut().set_stage(LifecycleStage::Ended);
        }
    }

    /// Tick every active actor subsystem in fixed active-list order
    pub fn tick_all_actor_systems(&mut self, delta_time: f32) -> Result<(), WorldError> {
        self.require_init("tick_all_actor_systems")?;

        self.collaborators.profiler.begin("actor systems");
        let systems = self.actor_systems.clone();
        for system in systems {
            system.borrow_mut().tick(delta_time);
        }
        self.collaborators.profiler.end("actor systems");
        Ok(())
    }

    /// Tick every active component subsystem in fixed active-list order
    pub fn tick_all_component_systems(&mut self, delta_time: f32) -> Result<(), WorldError> {
        self.require_init("tick_all_component_systems")?;

        self.collaborators.profiler.begin("component systems");
        let systems = self.component_systems.clone();
        for system in systems {
            system.borrow_mut().tick(delta_time);
        }
        self.collaborators.profiler.end("component systems");
        Ok(())
    }

    /// Fresh snapshot of every actor across all subsystems
    ///
    /// Ordering within a subsystem follows its storage; across subsystems
    /// it follows active-list order. No guarantee beyond that.
    pub fn all_actors(&self) -> Vec<ActorHandle> {
        let mut actors = Vec::new();
        for system in &self.actor_systems {
            actors.extend(system.borrow().actors_as_base());
        }
        actors
    }

    /// Fresh snapshot of every component across all subsystems
    pub fn all_components(&self) -> Vec<ComponentHandle> {
        let mut components = Vec::new();
        for system in &self.component_systems {
            components.extend(system.borrow().components_as_base());
        }
        components
    }

    /// Active actor subsystems that participate in world-layer listings
    pub fn layer_actor_systems(&self) -> Vec<ActorSystemRef> {
        self.actor_systems
            .iter()
            .filter(|system| system.borrow().layer_listed())
            .cloned()
            .collect()
    }

    /// All active actor subsystems in list order
    pub fn actor_systems(&self) -> &[ActorSystemRef] {
        &self.actor_systems
    }

    /// All active component subsystems in list order
    pub fn component_systems(&self) -> &[ComponentSystemRef] {
        &self.component_systems
    }

    /// Active actor subsystem owning the given kind tag
    pub fn actor_system_by_name(&self, kind: &str) -> Option<ActorSystemRef> {
        self.actor_systems
            .iter()
            .find(|system| system.borrow().name() == kind)
            .cloned()
    }

    /// Spawn a default-constructed actor of a statically known kind
    ///
    /// With no name given the actor is auto-named `Kind{uid}`. Storage and
    /// identity registration are atomic from the caller's point of view:
    /// a [`WorldError::DuplicateIdentity`] rejection rolls the storage
    /// allocation back. While gameplay is running the new actor also gets
    /// the wake cascade immediately, so it ticks from the next frame on.
    pub fn spawn<A: Actor + Default>(
        &mut self,
        name: Option<&str>,
    ) -> Result<Rc<RefCell<A>>, WorldError> {
        let system_ref = self
            .actor_systems
            .iter()
            .find(|system| system.borrow().as_any().is::<ActorSystem<A>>())
            .cloned()
            .ok_or_else(|| WorldError::UnknownKind(std::any::type_name::<A>().to_string()))?;

        let uid = self.allocate_uid();
        let mut guard = system_ref.borrow_mut();
        let name = name.map_or_else(|| format!("{}{uid}", guard.name()), ToString::to_string);

        let system = guard
            .as_any_mut()
            .downcast_mut::<ActorSystem<A>>()
            .expect("system found by type id above");
        let handle = system.spawn(uid, name);

        let base: ActorHandle = handle.clone();
        if let Err(err) = self.identity.add(&base) {
            system.remove(uid);
            return Err(err);
        }
        drop(guard);
        self.wake_spawned_actor(&base);
        Ok(handle)
    }

    /// Spawn a default-constructed actor of a kind named at runtime
    ///
    /// The persistence collaborator uses this while loading world files.
    pub fn spawn_by_kind(
        &mut self,
        kind: &str,
        name: Option<&str>,
    ) -> Result<ActorHandle, WorldError> {
        let system_ref = self
            .actor_system_by_name(kind)
            .ok_or_else(|| WorldError::UnknownKind(kind.to_string()))?;

        let uid = self.allocate_uid();
        let mut guard = system_ref.borrow_mut();
        let name = name.map_or_else(|| format!("{kind}{uid}"), ToString::to_string);

        let handle = guard.spawn_default(uid, name);
        if let Err(err) = self.identity.add(&handle) {
            guard.remove(uid);
            return Err(err);
        }
        drop(guard);
        self.wake_spawned_actor(&handle);
        Ok(handle)
    }

    /// Attach a component to a registered actor
    pub fn attach_component<C: Component + Default>(
        &mut self,
        owner: Uid,
        component: C,
    ) -> Result<Rc<RefCell<C>>, WorldError> {
        if !self.identity.contains_uid(owner) {
            return Err(WorldError::NotFound {
                query: format!("uid {owner}"),
            });
        }

        let system_ref = self
            .component_systems
            .iter()
            .find(|system| system.borrow().as_any().is::<ComponentSystem<C>>())
            .cloned()
            .ok_or_else(|| WorldError::UnknownKind(std::any::type_name::<C>().to_string()))?;

        let mut guard = system_ref.borrow_mut();
        let system = guard
            .as_any_mut()
            .downcast_mut::<ComponentSystem<C>>()
            .expect("system found by type id above");
        Ok(system.attach_with(owner, component))
    }

    /// Register an externally constructed actor's identity
    ///
    /// Thin pass-through to the identity registry; used by persistence
    /// implementations that build actors through typed subsystem access.
    pub fn add_actor_to_world(&mut self, actor: &ActorHandle) -> Result<(), WorldError> {
        self.identity.add(actor)
    }

    /// Remove an actor: identity, owned components, and storage together
    pub fn remove_actor_from_world(&mut self, actor: &ActorHandle) {
        self.identity.remove(actor);
        self.drop_actor_storage(actor);
    }

    /// Remove by uid; false (and no change) if the uid is not registered
    pub fn remove_actor_by_uid(&mut self, uid: Uid) -> bool {
        match self.identity.remove_by_uid(uid) {
            Some(actor) => {
                self.drop_actor_storage(&actor);
                true
            }
            None => false,
        }
    }

    /// Remove by name; false (and no change) if the name is not registered
    pub fn remove_actor_by_name(&mut self, name: &str) -> bool {
        match self.identity.remove_by_name(name) {
            Some(actor) => {
                self.drop_actor_storage(&actor);
                true
            }
            None => false,
        }
    }

    /// Look up a registered actor by uid (absence is a precondition bug)
    pub fn actor_by_uid(&self, uid: Uid) -> Result<ActorHandle, WorldError> {
        self.identity.actor_by_uid(uid)
    }

    /// Look up a registered actor by name (absence is a precondition bug)
    pub fn actor_by_name(&self, name: &str) -> Result<ActorHandle, WorldError> {
        self.identity.actor_by_name(name)
    }

    /// Look up by uid where absence is normal; logs a diagnostic on miss
    pub fn actor_by_uid_opt(&self, uid: Uid) -> Option<ActorHandle> {
        self.identity.actor_by_uid_opt(uid)
    }

    /// Look up by name where absence is normal; logs a diagnostic on miss
    pub fn actor_by_name_opt(&self, name: &str) -> Option<ActorHandle> {
        self.identity.actor_by_name_opt(name)
    }

    /// Existence query by uid; never mutates
    pub fn actor_exists_by_uid(&self, uid: Uid) -> bool {
        self.identity.contains_uid(uid)
    }

    /// Existence query by name; never mutates
    pub fn actor_exists_by_name(&self, name: &str) -> bool {
        self.identity.contains_name(name)
    }

    /// Number of registered actors
    pub fn actor_count(&self) -> usize {
        self.identity.len()
    }

    /// File the current world was loaded from (or last saved to)
    pub fn world_filename(&self) -> &str {
        &self.world_filename
    }

    /// Load a world file through the persistence collaborator
    pub fn load_world(&mut self, world_name: &str) -> Result<(), WorldError> {
        self.require_init("load_world")?;

        let path = self.config.world_path(world_name);
        self.world_filename = world_name.to_string();
        log::info!("loading world `{path}`");

        self.with_persistence(|persistence, world| persistence.load_world(&path, world))?;
        Ok(())
    }

    /// Persist live state as an in-game save
    ///
    /// The authored map file stays the pristine editor state; saving swaps
    /// the world filename's extension to the save extension so subsequent
    /// loads during gameplay pick up the save instead.
    pub fn save_world_state(&mut self) -> Result<(), WorldError> {
        self.require_init("save_world_state")?;

        let save_name = {
            let stem = self
                .world_filename
                .split('.')
                .next()
                .unwrap_or(self.world_filename.as_str());
            format!("{stem}.{}", self.config.save_extension)
        };
        self.world_filename = save_name.clone();
        let path = format!("{}/{}", self.config.save_dir, save_name);
        log::info!("saving world state to `{path}`");

        self.with_persistence(|persistence, world| persistence.serialise_all_systems(world, &path))?;
        Ok(())
    }

    /// Spawn the actors every fresh, empty map gets
    ///
    /// A player, a downward-pointing sun light, a 5x5 grid, and a ground
    /// plane to work off; the editor is notified afterward since this
    /// bypasses the normal load flow.
    pub fn create_default_map_actors(&mut self) -> Result<(), WorldError> {
        use crate::actors::{DirectionalLightActor, Grid, MeshActor, Player};

        self.spawn::<Player>(None)?;

        let light = self.spawn::<DirectionalLightActor>(None)?;
        {
            let mut light = light.borrow_mut();
            light.core_mut().transform.position = Vector3::new(0.0, 5.0, 0.0);
            light.intensity = 1.0;
            light.point_down();
        }

        let grid = self.spawn::<Grid>(None)?;
        {
            let mut grid = grid.borrow_mut();
            grid.size_x = 5;
            grid.size_y = 5;
        }

        let mesh = self.spawn::<MeshActor>(None)?;
        {
            let mut mesh = mesh.borrow_mut();
            mesh.mesh_filename = "node.fbx".to_string();
            mesh.core_mut().transform.position = Vector3::new(2.0, -0.5, 2.0);
            mesh.core_mut().transform.scale = Vector3::new(5.0, 1.0, 5.0);
        }

        self.collaborators.editor.update_world_list();
        Ok(())
    }

    /// Tear the world down in reverse dependency order
    ///
    /// Identity indices first, then collaborators that may hold
    /// back-references into actors or components, then the component
    /// subsystems, then the actor subsystems that own the storage.
    pub fn cleanup(&mut self) {
        self.identity.clear();

        self.collaborators.timers.reset();
        self.collaborators.physics.reset();
        self.collaborators.audio.reset();
        self.collaborators.textures.cleanup();
        self.collaborators.materials.cleanup();
        self.collaborators.sprites.reset();
        self.collaborators.ui.reset();

        for system in &self.component_systems {
            system.borrow_mut().cleanup();
        }
        for system in &self.actor_systems {
            system.borrow_mut().cleanup();
        }
        self.started = false;
        log::info!("world cleaned up");
    }

    fn drop_actor_storage(&mut self, actor: &ActorHandle) {
        let (uid, kind) = {
            let actor = actor.borrow();
            (actor.core().uid(), actor.core().kind())
        };

        for system in &self.component_systems {
            system.borrow_mut().remove_owned_by(uid);
        }

        // A findable actor without an owning subsystem means the registry
        // and storage diverged; that is a logic bug.
        let system = self
            .actor_system_by_name(kind)
            .expect("registered actor has no owning subsystem");
        system.borrow_mut().remove(uid);
    }

    fn allocate_uid(&mut self) -> Uid {
        self.next_uid += 1;
        Uid(self.next_uid)
    }

    fn require_init(&self, operation: &'static str) -> Result<(), WorldError> {
        if self.initialised {
            Ok(())
        } else {
            Err(WorldError::MissingCollaboratorState(operation))
        }
    }

    // The persistence collaborator needs the world mutably while it is
    // itself owned by the world; swap it out for the duration of the call.
    fn with_persistence<R>(
        &mut self,
        operation: impl FnOnce(&mut dyn Persistence, &mut Self) -> R,
    ) -> R {
        let mut persistence = std::mem::replace(
            &mut self.collaborators.persistence,
            Box::new(NullPersistence),
        );
        let result = operation(persistence.as_mut(), self);
        self.collaborators.persistence = persistence;
        result
    }
}
