//! # Actor Model
//!
//! Actors are the top-level game objects a world orchestrates. Every actor
//! carries an [`ActorCore`]: its process-unique [`Uid`], unique display
//! name, kind tag, active flag, lifecycle stage, and transform. Concrete
//! kinds embed the core and implement the [`Actor`] trait's lifecycle hooks.
//!
//! Lifecycle transitions are driven only by the world orchestrator, never
//! by the actor itself (see [`LifecycleStage`]).

pub mod system;

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process-wide unique actor identifier, assigned by the world at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid(pub u64);

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared, mutable handle to a type-erased actor
///
/// The per-kind subsystem owns the storage behind these handles; everything
/// else (identity registry, lifecycle cascades, callers of the lookup API)
/// holds clones or [`std::rc::Weak`] references.
pub type ActorHandle = Rc<RefCell<dyn Actor>>;

/// Stage of an actor's lifecycle
///
/// Advanced only by the world orchestrator:
/// `Unborn → Registered → Awake → Started → LateStarted → Active → Ended → Removed`.
/// Actors are never resurrected; a removed UID is gone for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleStage {
    /// Constructed but not yet registered with a world
    Unborn,
    /// Owned by a subsystem and findable in the identity registry
    Registered,
    /// `awake` hook has run
    Awake,
    /// `start` hook has run
    Started,
    /// `late_start` hook has run
    LateStarted,
    /// Ticking every frame while the active flag is set
    Active,
    /// `end` hook has run during world teardown
    Ended,
    /// Taken out of registry and subsystem storage
    Removed,
}

/// Spatial transform carried by every actor
#[derive(Debug, Clone)]
pub struct Transform {
    /// World-space position
    pub position: Vector3<f32>,
    /// World-space orientation
    pub rotation: UnitQuaternion<f32>,
    /// Per-axis scale
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Identity and lifecycle state embedded in every actor kind
#[derive(Debug, Clone)]
pub struct ActorCore {
    uid: Uid,
    name: String,
    kind: &'static str,
    /// Whether the actor participates in per-frame ticking
    pub active: bool,
    stage: LifecycleStage,
    /// Spatial state
    pub transform: Transform,
}

impl Default for ActorCore {
    fn default() -> Self {
        Self {
            uid: Uid(0),
            name: String::new(),
            kind: "",
            active: true,
            stage: LifecycleStage::Unborn,
            transform: Transform::default(),
        }
    }
}

impl ActorCore {
    /// The actor's process-unique identifier
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// The actor's unique display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The actor's kind tag, matching its subsystem's registered name
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Current lifecycle stage
    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    pub(crate) fn assign_identity(&mut self, uid: Uid, name: String, kind: &'static str) {
        self.uid = uid;
        self.name = name;
        self.kind = kind;
        self.stage = LifecycleStage::Registered;
    }

    pub(crate) fn set_stage(&mut self, stage: LifecycleStage) {
        self.stage = stage;
    }
}

/// Error raised from an actor or component lifecycle hook
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ActorError {
    /// Human-readable failure description
    pub message: String,
}

impl ActorError {
    /// Build an error from any displayable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Lifecycle interface every actor kind implements
///
/// The hooks default to no-ops; kinds override only what they need. The
/// wake cascade calls `awake`, `start`, and `late_start` with a strict
/// barrier between phases: every actor finishes `awake` before any actor's
/// `start` begins, and likewise for `late_start`.
pub trait Actor: 'static {
    /// Immutable access to the embedded core
    fn core(&self) -> &ActorCore;

    /// Mutable access to the embedded core
    fn core_mut(&mut self) -> &mut ActorCore;

    /// Self-initialization; must not assume sibling actors exist yet
    fn awake(&mut self) -> Result<(), ActorError> {
        Ok(())
    }

    /// May rely on every sibling having completed `awake`
    fn start(&mut self) -> Result<(), ActorError> {
        Ok(())
    }

    /// May rely on every sibling having completed `start`
    fn late_start(&mut self) -> Result<(), ActorError> {
        Ok(())
    }

    /// Per-frame update, called while the actor is active
    fn tick(&mut self, _delta_time: f32) {}

    /// Teardown hook, called once before the world is cleaned up
    fn end(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        core: ActorCore,
    }

    impl Actor for Dummy {
        fn core(&self) -> &ActorCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut ActorCore {
            &mut self.core
        }
    }

    #[test]
    fn test_core_starts_unborn() {
        let dummy = Dummy::default();
        assert_eq!(dummy.core().stage(), LifecycleStage::Unborn);
        assert!(dummy.core().active);
    }

    #[test]
    fn test_identity_assignment_registers() {
        let mut dummy = Dummy::default();
        dummy
            .core_mut()
            .assign_identity(Uid(7), "Dummy0".to_string(), "Dummy");
        assert_eq!(dummy.core().uid(), Uid(7));
        assert_eq!(dummy.core().name(), "Dummy0");
        assert_eq!(dummy.core().kind(), "Dummy");
        assert_eq!(dummy.core().stage(), LifecycleStage::Registered);
    }

    #[test]
    fn test_default_hooks_succeed() {
        let mut dummy = Dummy::default();
        assert!(dummy.awake().is_ok());
        assert!(dummy.start().is_ok());
        assert!(dummy.late_start().is_ok());
    }
}
