//! Authoritative store boundary
//!
//! The runtime engine owns the ground truth for entity existence, hierarchy,
//! component attachment, and per-field component state. This module defines
//! the contract the managed cache layer consumes: a synchronous, in-process
//! primitive set keyed by [`EntityId`] and [`ComponentKind`].
//!
//! The cache layer never invents identities and never buffers or reorders
//! store calls. Invalid identities degrade to sentinel results rather than
//! errors; nothing at this boundary is fatal.

pub mod memory;

pub use memory::MemoryStore;

use crate::foundation::math::Vec3;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque, stable, non-reusable 64-bit entity handle
///
/// Assigned and owned exclusively by the authoritative store. The managed
/// layer only observes identities; it never mints them. A destroyed identity
/// is never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Sentinel "no entity" identity
    ///
    /// Returned by resolution and parent queries when nothing matches. Never
    /// assigned to a live entity.
    pub const NONE: EntityId = EntityId(0);

    /// Construct an identity from its raw handle value
    ///
    /// Only stores assign meaning to raw values; client code should treat
    /// identities as opaque.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw 64-bit handle value
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the sentinel "no entity" identity
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Whether this refers to some entity (which may still have been destroyed)
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "entity(none)")
        } else {
            write!(f, "entity({})", self.0)
        }
    }
}

/// Tag identifying a category of attachable behavior or data
///
/// The kind set is closed: extending it means adding a variant here and a
/// wrapper type in [`crate::scene::components`]. The store understands kinds
/// only as tags; field-level state is addressed per kind through dedicated
/// accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Display name / identity tag (present on every entity)
    Tag,
    /// Spatial transform (present on every entity)
    Transform,
    /// Flat-colored renderable
    Renderable,
    /// Textured renderable
    TexturedRenderable,
    /// Model-based renderable
    RenderableModel,
    /// Directional light source
    DirectionalLight,
    /// Point light source
    PointLight,
    /// Spot light source
    SpotLight,
    /// Simulated physics body
    PhysicsBody,
    /// Managed script behavior
    Script,
    /// Native script behavior
    NativeScript,
}

impl ComponentKind {
    /// Whether the store guarantees this kind on every live entity
    ///
    /// Baseline kinds are wrapped at entity construction and refuse removal.
    pub fn is_baseline(self) -> bool {
        matches!(self, Self::Tag | Self::Transform)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tag => "Tag",
            Self::Transform => "Transform",
            Self::Renderable => "Renderable",
            Self::TexturedRenderable => "TexturedRenderable",
            Self::RenderableModel => "RenderableModel",
            Self::DirectionalLight => "DirectionalLight",
            Self::PointLight => "PointLight",
            Self::SpotLight => "SpotLight",
            Self::PhysicsBody => "PhysicsBody",
            Self::Script => "Script",
            Self::NativeScript => "NativeScript",
        };
        f.write_str(name)
    }
}

/// Simulation mode of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhysicsBodyType {
    /// Immovable; the transform drives the body
    #[default]
    Static,
    /// Moved by the application, pushes dynamic bodies
    Kinematic,
    /// Fully simulated
    Dynamic,
}

/// Contract the cache layer requires from the authoritative runtime
///
/// All operations are synchronous and authoritative: the store answers from
/// ground truth at call time. Operations targeting an identity the store no
/// longer recognizes must degrade to sentinel/default results (and mutations
/// to no-ops) rather than fail.
///
/// Field accessors exist only for kinds that carry state on the runtime side
/// (tag, transform, physics body); the remaining kinds are pure attachment
/// tags.
pub trait EngineStore {
    /// Create a new entity and return its identity
    ///
    /// The store attaches the baseline kinds (tag, transform) before
    /// returning.
    fn create_entity(&mut self, name: &str) -> EntityId;

    /// Destroy an entity; a no-op for unknown or already-destroyed identities
    fn destroy_entity(&mut self, id: EntityId);

    /// Whether the store currently recognizes this identity
    fn is_valid(&self, id: EntityId) -> bool;

    /// Parent of an entity, [`EntityId::NONE`] when rootless or invalid
    fn parent_of(&self, id: EntityId) -> EntityId;

    /// Reparent an entity; no-op when either identity is invalid
    fn set_parent(&mut self, id: EntityId, parent: EntityId);

    /// Resolve a display name to an identity, [`EntityId::NONE`] when absent
    fn resolve_name(&self, name: &str) -> EntityId;

    /// Display name of an entity, empty when invalid
    fn name_of(&self, id: EntityId) -> String;

    /// Rename an entity; no-op when invalid
    fn set_name(&mut self, id: EntityId, name: &str);

    /// Whether the entity currently carries the given kind
    fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool;

    /// Attach a kind to an entity; a no-op when already attached or invalid
    fn add_component(&mut self, id: EntityId, kind: ComponentKind);

    /// Detach a kind from an entity
    ///
    /// Returns true only when the kind was present and has been removed.
    /// Baseline kinds refuse removal.
    fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool;

    /// Transform position
    fn position(&self, id: EntityId) -> Vec3;
    /// Set transform position
    fn set_position(&mut self, id: EntityId, value: Vec3);
    /// Transform scale
    fn scale(&self, id: EntityId) -> Vec3;
    /// Set transform scale
    fn set_scale(&mut self, id: EntityId, value: Vec3);
    /// Transform rotation (Euler angles, radians)
    fn rotation(&self, id: EntityId) -> Vec3;
    /// Set transform rotation (Euler angles, radians)
    fn set_rotation(&mut self, id: EntityId, value: Vec3);

    /// Physics body simulation mode
    fn body_type(&self, id: EntityId) -> PhysicsBodyType;
    /// Set physics body simulation mode
    fn set_body_type(&mut self, id: EntityId, value: PhysicsBodyType);
    /// Physics body position
    fn body_position(&self, id: EntityId) -> Vec3;
    /// Set physics body position
    fn set_body_position(&mut self, id: EntityId, value: Vec3);
    /// Physics body rotation (Euler angles, radians)
    fn body_rotation(&self, id: EntityId) -> Vec3;
    /// Set physics body rotation (Euler angles, radians)
    fn set_body_rotation(&mut self, id: EntityId, value: Vec3);
    /// Physics body mass
    fn body_mass(&self, id: EntityId) -> f32;
    /// Set physics body mass
    fn set_body_mass(&mut self, id: EntityId, value: f32);
    /// Apply a force at the body's center of mass
    fn apply_force(&mut self, id: EntityId, force: Vec3);
    /// Apply a force at a world-space point
    fn apply_force_at(&mut self, id: EntityId, force: Vec3, point: Vec3);
    /// Apply a torque to the body
    fn apply_torque(&mut self, id: EntityId, torque: Vec3);
}

/// Shared handle to an authoritative store
///
/// The registry and every wrapper it hands out address the same store through
/// this handle. Single-threaded by design; all scene operations run on one
/// logical thread per scene.
pub type StoreHandle = Rc<RefCell<dyn EngineStore>>;

/// Wrap a concrete store into a shared [`StoreHandle`]
pub fn store_handle<S: EngineStore + 'static>(store: S) -> StoreHandle {
    Rc::new(RefCell::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel() {
        assert!(EntityId::NONE.is_none());
        assert!(!EntityId::NONE.is_some());
        assert_eq!(EntityId::NONE.raw(), 0);
        assert!(EntityId::from_raw(7).is_some());
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(EntityId::NONE.to_string(), "entity(none)");
        assert_eq!(EntityId::from_raw(42).to_string(), "entity(42)");
        assert_eq!(ComponentKind::PhysicsBody.to_string(), "PhysicsBody");
    }

    #[test]
    fn test_baseline_kinds() {
        assert!(ComponentKind::Tag.is_baseline());
        assert!(ComponentKind::Transform.is_baseline());
        assert!(!ComponentKind::PhysicsBody.is_baseline());
        assert!(!ComponentKind::Script.is_baseline());
    }
}
