//! Managed-side scene layer
//!
//! Mirrors entities and their attached components living inside the
//! authoritative runtime. The registry owns the identity caches, entities own
//! their component wrappers, and everything upward is a non-owning
//! back-reference, keeping the ownership graph acyclic.

pub mod components;
pub mod entity;
pub mod registry;

pub use components::{
    Component, DirectionalLight, NativeScript, PhysicsBody, PointLight, Renderable,
    RenderableModel, Script, SpotLight, Tag, TexturedRenderable, Transform,
};
pub use entity::{DestroyedListener, Entity, EntityHandle};
pub use registry::Scene;
