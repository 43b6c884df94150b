//! Scene registry
//!
//! The managed side's single source of truth for which wrapper represents
//! which identity. The registry owns a primary identity index and an advisory
//! name-hash index, revalidates every cache hit against the authoritative
//! store, and listens to each wrapper's destruction notification so the
//! indices never outlive the entities they mirror.

use crate::config::SceneConfig;
use crate::scene::entity::{DestroyedListener, Entity};
use crate::store::{EntityId, StoreHandle};
use log::debug;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Intra-session hash for the advisory name index
///
/// Stable within one process run only; nothing derived from it may be
/// persisted.
pub(crate) fn name_hash(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Index state shared with the destruction-notification path
struct SceneShared {
    store: StoreHandle,
    config: SceneConfig,
    entities: RefCell<HashMap<EntityId, Entity>>,
    by_name: RefCell<HashMap<u64, Entity>>,
}

impl DestroyedListener for SceneShared {
    fn entity_destroyed(&self, entity: &Entity) {
        // Evict from whichever index holds the wrapper: primary by identity,
        // then secondary by name hash. The identity guard keeps a hash
        // collision from evicting somebody else's entry.
        if self.entities.borrow_mut().remove(&entity.id()).is_some() {
            return;
        }
        let hash = name_hash(&entity.name());
        let mut by_name = self.by_name.borrow_mut();
        if by_name
            .get(&hash)
            .is_some_and(|cached| cached.id() == entity.id())
        {
            by_name.remove(&hash);
        }
    }
}

/// Managed-side registry for one scene
///
/// All operations are single-threaded and synchronous; every lookup
/// revalidates cache hits against the store, so a wrapper handed out here is
/// live at the moment it is returned.
///
/// # Name lookup limitation
///
/// The name index keys on a 64-bit hash of the display name. Two *live*
/// entities whose names collide can make [`entity_by_name`](Scene::entity_by_name)
/// return the wrong one; revalidation only guarantees a destroyed entity is
/// never returned. Scenes are expected not to give two live entities
/// colliding names — this is an accepted limitation, not defended against.
pub struct Scene {
    shared: Rc<SceneShared>,
}

impl Scene {
    /// Create a registry over a store with default configuration
    pub fn new(store: StoreHandle) -> Self {
        Self::with_config(store, SceneConfig::default())
    }

    /// Create a registry over a store with explicit configuration
    pub fn with_config(store: StoreHandle, config: SceneConfig) -> Self {
        let capacity = config.expected_entities;
        Self {
            shared: Rc::new(SceneShared {
                store,
                config,
                entities: RefCell::new(HashMap::with_capacity(capacity)),
                by_name: RefCell::new(HashMap::with_capacity(capacity)),
            }),
        }
    }

    /// The store this registry mirrors
    pub fn store(&self) -> StoreHandle {
        self.shared.store.clone()
    }

    /// Create an entity with the configured default name
    pub fn create_entity(&self) -> Entity {
        let name = self.shared.config.default_entity_name.clone();
        self.create_entity_named(&name)
    }

    /// Create an entity and cache its wrapper
    ///
    /// Never consults the cache: a freshly minted identity cannot already be
    /// cached.
    pub fn create_entity_named(&self, name: &str) -> Entity {
        let id = self.shared.store.borrow_mut().create_entity(name);
        let entity = Entity::new(self.shared.store.clone(), id);
        entity.subscribe_destroyed(&self.listener());
        self.shared.entities.borrow_mut().insert(id, entity.clone());
        debug!("scene: created {id} ({name:?})");
        entity
    }

    /// Destroy an entity
    ///
    /// A no-op when the identity is already invalid in the store, so double
    /// destruction (including through a second wrapper instance for the same
    /// identity) is safe. Removes the wrapper from the primary index, falling
    /// back to its current name hash for wrappers known only to the name
    /// index, destroys the identity in the store, and finally fires the
    /// wrapper's destruction notification.
    pub fn destroy_entity(&self, entity: &Entity) {
        let id = entity.id();
        if !self.shared.store.borrow().is_valid(id) {
            return;
        }
        if self.shared.entities.borrow_mut().remove(&id).is_none() {
            let hash = name_hash(&entity.name());
            self.shared.by_name.borrow_mut().remove(&hash);
        }
        self.shared.store.borrow_mut().destroy_entity(id);
        debug!("scene: destroyed {id}");
        entity.destroy();
    }

    /// Look up an entity by identity
    ///
    /// A cached wrapper is revalidated against the store before being
    /// returned; a wrapper whose identity has gone invalid is evicted and the
    /// lookup reports not-found. Unknown but valid identities get a wrapper
    /// constructed, cached, and subscribed on the spot.
    pub fn entity_by_id(&self, id: EntityId) -> Option<Entity> {
        let cached = self.shared.entities.borrow().get(&id).cloned();
        if let Some(entity) = cached {
            if self.shared.store.borrow().is_valid(id) {
                return Some(entity);
            }
            debug!("scene: evicting stale {id}");
            self.shared.entities.borrow_mut().remove(&id);
            return None;
        }
        if !self.shared.store.borrow().is_valid(id) {
            return None;
        }
        let entity = Entity::new(self.shared.store.clone(), id);
        entity.subscribe_destroyed(&self.listener());
        self.shared.entities.borrow_mut().insert(id, entity.clone());
        Some(entity)
    }

    /// Look up an entity by display name
    ///
    /// The name index is advisory: hits are revalidated against the store and
    /// evicted when stale. On a miss the store resolves the name; the primary
    /// index is consulted before constructing so both lookup paths hand out
    /// the same wrapper instance for one identity. See the type-level note on
    /// hash collisions.
    pub fn entity_by_name(&self, name: &str) -> Option<Entity> {
        let hash = name_hash(name);
        let cached = self.shared.by_name.borrow().get(&hash).cloned();
        if let Some(entity) = cached {
            if self.shared.store.borrow().is_valid(entity.id()) {
                return Some(entity);
            }
            debug!("scene: evicting stale name entry {name:?}");
            self.shared.by_name.borrow_mut().remove(&hash);
            self.shared.entities.borrow_mut().remove(&entity.id());
        }

        let id = self.shared.store.borrow().resolve_name(name);
        if id.is_none() {
            return None;
        }
        let existing = self.shared.entities.borrow().get(&id).cloned();
        let entity = match existing {
            Some(entity) => entity,
            None => {
                let fresh = Entity::new(self.shared.store.clone(), id);
                fresh.subscribe_destroyed(&self.listener());
                self.shared
                    .entities
                    .borrow_mut()
                    .insert(id, fresh.clone());
                fresh
            }
        };
        self.shared.by_name.borrow_mut().insert(hash, entity.clone());
        Some(entity)
    }

    /// Snapshot of every cached wrapper
    ///
    /// Returns a stable copy, never a live view: destroying entities while
    /// processing the snapshot cannot invalidate the iteration.
    pub fn entities(&self) -> Vec<Entity> {
        self.shared.entities.borrow().values().cloned().collect()
    }

    /// Number of wrappers in the primary index
    pub fn entity_count(&self) -> usize {
        self.shared.entities.borrow().len()
    }

    /// Whether the primary index is empty
    pub fn is_empty(&self) -> bool {
        self.shared.entities.borrow().is_empty()
    }

    /// Tear down the registry's caches
    ///
    /// Unsubscribes from every cached wrapper first — teardown must not
    /// trigger per-entity eviction against a registry that no longer cares —
    /// then drops both indices. Iterates a stable copy of the index contents,
    /// never the live maps. Store-side entities are untouched.
    pub fn clear(&self) {
        let listener = self.listener();
        let mut wrappers: Vec<Entity> =
            self.shared.entities.borrow().values().cloned().collect();
        wrappers.extend(self.shared.by_name.borrow().values().cloned());
        for entity in &wrappers {
            entity.unsubscribe_destroyed(&listener);
        }
        self.shared.entities.borrow_mut().clear();
        self.shared.by_name.borrow_mut().clear();
        debug!("scene: cleared {} cached wrappers", wrappers.len());
    }

    fn listener(&self) -> Rc<dyn DestroyedListener> {
        Rc::clone(&self.shared) as Rc<dyn DestroyedListener>
    }

    #[cfg(test)]
    fn name_index_contains(&self, name: &str) -> bool {
        self.shared.by_name.borrow().contains_key(&name_hash(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::components::PhysicsBody;
    use crate::store::{store_handle, MemoryStore};

    fn scene() -> Scene {
        Scene::new(store_handle(MemoryStore::new()))
    }

    #[test]
    fn test_create_caches_wrapper() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        assert_eq!(scene.entity_count(), 1);
        let looked_up = scene.entity_by_id(entity.id()).unwrap();
        assert!(entity.ptr_eq(&looked_up));
    }

    #[test]
    fn test_cache_coherence_by_id() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        let first = scene.entity_by_id(entity.id()).unwrap();
        let second = scene.entity_by_id(entity.id()).unwrap();
        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn test_cache_coherence_across_lookup_paths() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        let by_name = scene.entity_by_name("Box").unwrap();
        let by_id = scene.entity_by_id(entity.id()).unwrap();
        assert!(by_name.ptr_eq(&by_id));
        assert!(by_name.ptr_eq(&entity));

        // Repeated name lookups keep returning the cached instance.
        let again = scene.entity_by_name("Box").unwrap();
        assert!(again.ptr_eq(&by_name));
    }

    #[test]
    fn test_name_lookup_of_externally_created_entity() {
        let store = store_handle(MemoryStore::new());
        let id = store.borrow_mut().create_entity("Rogue");
        let scene = Scene::new(store);

        // The registry has never seen this identity.
        let found = scene.entity_by_name("Rogue").unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(scene.entity_count(), 1);

        let by_id = scene.entity_by_id(id).unwrap();
        assert!(found.ptr_eq(&by_id));
    }

    #[test]
    fn test_unknown_lookups_report_not_found() {
        let scene = scene();
        assert!(scene.entity_by_name("Ghost").is_none());
        assert!(scene.entity_by_id(EntityId::from_raw(999)).is_none());
        assert!(scene.entity_by_id(EntityId::NONE).is_none());
    }

    #[test]
    fn test_destroy_scenario() {
        let scene = scene();
        let created = scene.create_entity_named("Box");

        let found = scene.entity_by_name("Box").unwrap();
        assert_eq!(found.id(), created.id());

        scene.destroy_entity(&found);
        assert!(scene.entity_by_name("Box").is_none());
        assert!(!scene.name_index_contains("Box"));
        assert_eq!(scene.entity_count(), 0);
        assert!(!found.is_valid());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        scene.destroy_entity(&entity);
        scene.destroy_entity(&entity);
        assert_eq!(scene.entity_count(), 0);

        // A second wrapper instance sharing the identity is just as dead.
        let twin = Entity::new(scene.store(), entity.id());
        scene.destroy_entity(&twin);
    }

    #[test]
    fn test_lazy_invalidation_by_id() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        // Destroyed behind the registry's back.
        scene.store().borrow_mut().destroy_entity(entity.id());

        assert!(scene.entity_by_id(entity.id()).is_none());
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_lazy_invalidation_by_name() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");
        scene.entity_by_name("Box").unwrap();

        scene.store().borrow_mut().destroy_entity(entity.id());

        assert!(scene.entity_by_name("Box").is_none());
        assert!(!scene.name_index_contains("Box"));
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_direct_wrapper_destroy_evicts_index() {
        let scene = scene();
        let entity = scene.create_entity_named("Box");

        // Firing the notification without going through the registry still
        // evicts the cache entry; the store entity stays alive.
        entity.destroy();
        assert_eq!(scene.entity_count(), 0);
        assert!(scene.store().borrow().is_valid(entity.id()));

        // The next lookup re-caches a fresh wrapper.
        let fresh = scene.entity_by_id(entity.id()).unwrap();
        assert_eq!(fresh, entity);
        assert!(!fresh.ptr_eq(&entity));
    }

    #[test]
    fn test_rename_moves_name_lookup() {
        let scene = scene();
        let entity = scene.create_entity_named("Old");
        scene.entity_by_name("Old").unwrap();

        entity.set_name("New");

        assert!(scene.entity_by_name("New").is_some());

        // The index is advisory: revalidation is existence-only, so the
        // stale hash entry still answers for the old name while the entity
        // lives. Documented limitation of the name accelerator.
        assert_eq!(scene.entity_by_name("Old").unwrap().id(), entity.id());
    }

    #[test]
    fn test_clear_unsubscribes_and_empties() {
        let scene = scene();
        let a = scene.create_entity_named("A");
        let b = scene.create_entity_named("B");
        scene.entity_by_name("A").unwrap();

        scene.clear();
        assert!(scene.is_empty());
        assert!(!scene.name_index_contains("A"));

        // Store entities survive teardown, and firing a destruction
        // notification afterwards must not reach the cleared registry.
        assert!(scene.store().borrow().is_valid(a.id()));
        a.destroy();
        b.destroy();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_snapshot_iteration_survives_destruction() {
        let scene = scene();
        for index in 0..4 {
            scene.create_entity_named(&format!("entity-{index}"));
        }

        // Destroying while walking the snapshot must not disturb it.
        let snapshot = scene.entities();
        assert_eq!(snapshot.len(), 4);
        for entity in &snapshot {
            scene.destroy_entity(entity);
        }
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_create_entity_uses_configured_default_name() {
        let store = store_handle(MemoryStore::new());
        let config = SceneConfig {
            default_entity_name: "[thing]".to_owned(),
            ..SceneConfig::default()
        };
        let scene = Scene::with_config(store, config);

        let entity = scene.create_entity();
        assert_eq!(entity.name(), "[thing]");
    }
}
