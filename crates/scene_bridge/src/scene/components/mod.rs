//! Component wrappers
//!
//! A component wrapper is a stateless accessor for one component kind on one
//! entity: it holds nothing but a non-owning back-reference to its owner, and
//! every field access is a live round-trip to the authoritative store keyed
//! by (identity, kind, field). The managed layer caches *which* wrappers have
//! been constructed, never their field values, so the cache and the store can
//! never disagree about state.
//!
//! The kind set is closed; adding a kind means a new
//! [`ComponentKind`](crate::store::ComponentKind) variant plus a wrapper type
//! here.

pub mod lighting;
pub mod physics;
pub mod renderable;
pub mod script;
pub mod tag;
pub mod transform;

pub use lighting::{DirectionalLight, PointLight, SpotLight};
pub use physics::PhysicsBody;
pub use renderable::{Renderable, RenderableModel, TexturedRenderable};
pub use script::{NativeScript, Script};
pub use tag::Tag;
pub use transform::Transform;

use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;
use std::any::Any;

/// A managed-side wrapper for one component kind
///
/// Implementors are constructed by their owning [`Entity`](crate::scene::Entity)
/// through the component cache and stay alive for the entity wrapper's
/// lifetime. A wrapper that outlives its owner degrades to default reads and
/// no-op writes; the store rejects operations on removed kinds, so wrappers
/// are never proactively invalidated.
pub trait Component: Any {
    /// The kind tag this wrapper represents
    const KIND: ComponentKind;

    /// Bind a wrapper to its owning entity
    ///
    /// Pure wrapper construction; attaching the kind in the store is the
    /// entity's job.
    fn attach(owner: EntityHandle) -> Self;

    /// Back-reference to the owning entity
    fn owner(&self) -> &EntityHandle;
}
