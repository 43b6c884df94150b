//! # Scene Bridge
//!
//! A managed-side object-identity cache mirroring entities and their attached
//! components inside an authoritative simulation runtime.
//!
//! Client code holds stable, reusable wrapper objects; the bridge guarantees
//! they never silently diverge from the runtime's notion of what exists:
//!
//! - **Scene registry**: one wrapper per live identity, with an advisory
//!   name-hash index; every cache hit is revalidated against the store.
//! - **Entity wrapper**: identity, parent navigation with lazy revalidation,
//!   and the component lifecycle.
//! - **Component wrappers**: stateless accessors whose every field access is
//!   a live store round-trip — the cache remembers which wrappers exist,
//!   never their field values.
//! - **Authoritative store contract**: the synchronous primitive set the
//!   bridge requires from the runtime, plus an in-memory reference store.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_bridge::prelude::*;
//!
//! let scene = Scene::new(store_handle(MemoryStore::new()));
//!
//! let player = scene.create_entity_named("Player");
//! player.transform().set_position(Vec3::new(0.0, 2.0, 0.0));
//!
//! let body = player.create_component::<PhysicsBody>();
//! body.set_body_type(PhysicsBodyType::Dynamic);
//!
//! let found = scene.entity_by_name("Player").expect("just created");
//! assert_eq!(found, player);
//!
//! scene.destroy_entity(&player);
//! assert!(scene.entity_by_name("Player").is_none());
//! ```
//!
//! All operations are single-threaded and synchronous: one logical thread per
//! scene, no internal locking, no reordering.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod scene;
pub mod store;

pub use config::{Config, ConfigError, SceneConfig};
pub use scene::{Component, DestroyedListener, Entity, EntityHandle, Scene};
pub use store::{store_handle, ComponentKind, EngineStore, EntityId, MemoryStore, StoreHandle};

/// Common imports for bridge users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig},
        foundation::math::Vec3,
        scene::{
            Component, DestroyedListener, DirectionalLight, Entity, EntityHandle, NativeScript,
            PhysicsBody, PointLight, Renderable, RenderableModel, Scene, Script, SpotLight, Tag,
            TexturedRenderable, Transform,
        },
        store::{
            store_handle, ComponentKind, EngineStore, EntityId, MemoryStore, PhysicsBodyType,
            StoreHandle,
        },
    };
}
