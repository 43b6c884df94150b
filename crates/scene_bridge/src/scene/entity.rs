//! Entity wrapper
//!
//! One managed wrapper per live identity. The wrapper mediates the entity's
//! component set, revalidates its parent on every read, and raises an
//! explicit destruction notification. It never caches field state; existence
//! and state questions always go back to the authoritative store.

use crate::scene::components::{Component, Transform};
use crate::store::{ComponentKind, EngineStore, EntityId, StoreHandle};
use log::{trace, warn};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Observer of entity destruction
///
/// Registration is explicit: subscribers are held weakly and the
/// notification list is drained before dispatch, so a listener fires at most
/// once per entity and dead listeners are dropped silently.
pub trait DestroyedListener {
    /// Called when the entity's destruction notification fires
    fn entity_destroyed(&self, entity: &Entity);
}

/// Shared state behind every handle to one wrapper instance
pub(crate) struct EntityCore {
    id: EntityId,
    store: StoreHandle,
    parent: RefCell<Option<Entity>>,
    components: RefCell<HashMap<ComponentKind, Rc<dyn Any>>>,
    destroyed: RefCell<Vec<Weak<dyn DestroyedListener>>>,
}

/// Managed wrapper representing one live identity
///
/// Cheap to clone: clones share the same wrapper instance (compare with
/// [`Entity::ptr_eq`]). Equality and hashing use the identity alone, so two
/// wrapper instances produced independently for the same identity are
/// interchangeable.
#[derive(Clone)]
pub struct Entity {
    core: Rc<EntityCore>,
}

impl Entity {
    /// Construct a wrapper for an identity
    ///
    /// The baseline transform wrapper is materialized into the component
    /// cache immediately; the store already provides the kind for every
    /// entity, so nothing is created on the store side.
    ///
    /// Prefer obtaining wrappers through a [`Scene`](crate::scene::Scene) —
    /// direct construction bypasses the registry's identity cache.
    pub fn new(store: StoreHandle, id: EntityId) -> Self {
        let entity = Self {
            core: Rc::new(EntityCore {
                id,
                store,
                parent: RefCell::new(None),
                components: RefCell::new(HashMap::new()),
                destroyed: RefCell::new(Vec::new()),
            }),
        };
        let transform: Rc<dyn Any> = Rc::new(Transform::attach(entity.handle()));
        entity
            .core
            .components
            .borrow_mut()
            .insert(ComponentKind::Transform, transform);
        entity
    }

    /// The identity this wrapper represents
    pub fn id(&self) -> EntityId {
        self.core.id
    }

    /// Whether the store still recognizes this identity
    pub fn is_valid(&self) -> bool {
        self.core.store.borrow().is_valid(self.core.id)
    }

    /// Display name, empty once the identity is invalid
    pub fn name(&self) -> String {
        self.core.store.borrow().name_of(self.core.id)
    }

    /// Rename the entity in the store
    pub fn set_name(&self, name: &str) {
        self.core.store.borrow_mut().set_name(self.core.id, name);
    }

    /// Non-owning back-reference handle to this wrapper instance
    pub fn handle(&self) -> EntityHandle {
        EntityHandle {
            id: self.core.id,
            core: Rc::downgrade(&self.core),
        }
    }

    /// Whether two handles refer to the same wrapper instance
    ///
    /// Identity equality (`==`) treats independently constructed wrappers for
    /// one identity as equal; this distinguishes the cached instance itself.
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Parent wrapper, revalidated against the store on every read
    ///
    /// The cached parent wrapper is replaced whenever its identity disagrees
    /// with the store's current answer; a freshly queried parent that is no
    /// longer valid caches as `None`. No parent-changed events exist — this
    /// lazy re-derivation is the synchronization mechanism.
    pub fn parent(&self) -> Option<Entity> {
        let queried = self.core.store.borrow().parent_of(self.core.id);
        let mut cached = self.core.parent.borrow_mut();
        if cached.as_ref().map(Entity::id) != Some(queried) {
            *cached = if self.core.store.borrow().is_valid(queried) {
                Some(Entity::new(self.core.store.clone(), queried))
            } else {
                None
            };
        }
        cached.clone()
    }

    /// Reparent the entity
    ///
    /// Writes through to the store without touching the local parent cache;
    /// the next [`parent`](Entity::parent) read re-derives it.
    pub fn set_parent(&self, parent: &Entity) {
        self.core
            .store
            .borrow_mut()
            .set_parent(self.core.id, parent.id());
    }

    /// Detach the entity from its parent
    pub fn clear_parent(&self) {
        self.core
            .store
            .borrow_mut()
            .set_parent(self.core.id, EntityId::NONE);
    }

    /// The always-present transform wrapper
    pub fn transform(&self) -> Rc<Transform> {
        self.cached_or_attach::<Transform>()
    }

    /// Attach a component kind, or return the cached wrapper
    ///
    /// Idempotent: a second call for the same kind returns the same wrapper
    /// instance and leaves the store untouched beyond its own idempotent
    /// attach.
    pub fn create_component<C: Component>(&self) -> Rc<C> {
        if let Some(existing) = self.cached::<C>() {
            return existing;
        }
        self.core
            .store
            .borrow_mut()
            .add_component(self.core.id, C::KIND);
        trace!("attached {} to {}", C::KIND, self.core.id);
        self.cached_or_attach::<C>()
    }

    /// Whether the store currently reports the kind attached
    ///
    /// Delegates to the store; the local cache only remembers which wrappers
    /// exist, not which kinds are present.
    pub fn has_component<C: Component>(&self) -> bool {
        self.core
            .store
            .borrow()
            .has_component(self.core.id, C::KIND)
    }

    /// Cached or newly bound wrapper for an attached kind
    ///
    /// Returns `None` with a diagnostic when the store reports the kind
    /// absent; never attaches the kind (contrast
    /// [`create_component`](Entity::create_component)). A kind attached
    /// through the store by another path is bound and cached on first access
    /// here.
    pub fn get_component<C: Component>(&self) -> Option<Rc<C>> {
        if !self.has_component::<C>() {
            warn!(
                "entity {:?} does not have component {}",
                self.name(),
                C::KIND
            );
            return None;
        }
        Some(self.cached_or_attach::<C>())
    }

    /// Detach a component kind
    ///
    /// The cached wrapper is evicted only when the store confirms removal;
    /// asking to remove an absent kind returns false and changes nothing.
    pub fn remove_component<C: Component>(&self) -> bool {
        let removed = self
            .core
            .store
            .borrow_mut()
            .remove_component(self.core.id, C::KIND);
        if removed {
            self.core.components.borrow_mut().remove(&C::KIND);
            trace!("detached {} from {}", C::KIND, self.core.id);
        }
        removed
    }

    /// Register a destruction listener
    ///
    /// Held weakly; subscribing the same listener twice is a no-op.
    pub fn subscribe_destroyed(&self, listener: &Rc<dyn DestroyedListener>) {
        let weak = Rc::downgrade(listener);
        let mut listeners = self.core.destroyed.borrow_mut();
        if !listeners.iter().any(|entry| entry.ptr_eq(&weak)) {
            listeners.push(weak);
        }
    }

    /// Remove a destruction listener
    pub fn unsubscribe_destroyed(&self, listener: &Rc<dyn DestroyedListener>) {
        let weak = Rc::downgrade(listener);
        self.core
            .destroyed
            .borrow_mut()
            .retain(|entry| !entry.ptr_eq(&weak));
    }

    /// Fire the destruction notification
    ///
    /// The subscriber list is drained before dispatch, so firing twice
    /// notifies nobody the second time. Destroying the identity in the store
    /// is the registry's responsibility, never this wrapper's.
    pub fn destroy(&self) {
        let listeners: Vec<_> = self.core.destroyed.borrow_mut().drain(..).collect();
        for listener in listeners {
            if let Some(listener) = listener.upgrade() {
                listener.entity_destroyed(self);
            }
        }
    }

    fn cached<C: Component>(&self) -> Option<Rc<C>> {
        let components = self.core.components.borrow();
        components.get(&C::KIND).cloned()?.downcast::<C>().ok()
    }

    fn cached_or_attach<C: Component>(&self) -> Rc<C> {
        if let Some(existing) = self.cached::<C>() {
            return existing;
        }
        let component = Rc::new(C::attach(self.handle()));
        self.core
            .components
            .borrow_mut()
            .insert(C::KIND, component.clone() as Rc<dyn Any>);
        component
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.core.id == other.core.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.core.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.core.id)
            .finish_non_exhaustive()
    }
}

/// Non-owning back-reference to an entity wrapper
///
/// Held by component wrappers (and anything else that must not keep the
/// entity alive). Once every strong handle is gone, reads degrade to defaults
/// and writes become no-ops.
#[derive(Clone)]
pub struct EntityHandle {
    id: EntityId,
    core: Weak<EntityCore>,
}

impl EntityHandle {
    /// The identity of the referenced entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Upgrade to a strong wrapper handle, if the wrapper is still alive
    pub fn entity(&self) -> Option<Entity> {
        self.core.upgrade().map(|core| Entity { core })
    }

    /// Read through to the store, or the given default when the owning
    /// wrapper is gone
    pub(crate) fn read<R>(
        &self,
        default: R,
        access: impl FnOnce(&dyn EngineStore, EntityId) -> R,
    ) -> R {
        match self.core.upgrade() {
            Some(core) => access(&*core.store.borrow(), self.id),
            None => default,
        }
    }

    /// Write through to the store; a no-op when the owning wrapper is gone
    pub(crate) fn write(&self, access: impl FnOnce(&mut dyn EngineStore, EntityId)) {
        if let Some(core) = self.core.upgrade() {
            access(&mut *core.store.borrow_mut(), self.id);
        }
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityHandle")
            .field("id", &self.id)
            .field("attached", &(self.core.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::components::{PhysicsBody, Renderable, Tag};
    use crate::store::{store_handle, MemoryStore};
    use approx::assert_relative_eq;
    use std::cell::Cell;

    struct CountingListener {
        calls: Cell<usize>,
        last_id: Cell<EntityId>,
    }

    impl CountingListener {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                calls: Cell::new(0),
                last_id: Cell::new(EntityId::NONE),
            })
        }
    }

    impl DestroyedListener for CountingListener {
        fn entity_destroyed(&self, entity: &Entity) {
            self.calls.set(self.calls.get() + 1);
            self.last_id.set(entity.id());
        }
    }

    fn spawn(name: &str) -> (StoreHandle, Entity) {
        let store = store_handle(MemoryStore::new());
        let id = store.borrow_mut().create_entity(name);
        let entity = Entity::new(store.clone(), id);
        (store, entity)
    }

    #[test]
    fn test_equality_by_identity() {
        let (store, entity) = spawn("twin");
        let other = Entity::new(store.clone(), entity.id());

        assert_eq!(entity, other);
        assert!(!entity.ptr_eq(&other));

        let different_id = store.borrow_mut().create_entity("other");
        let different = Entity::new(store, different_id);
        assert_ne!(entity, different);
    }

    #[test]
    fn test_clone_shares_instance() {
        let (_store, entity) = spawn("shared");
        let clone = entity.clone();
        assert!(entity.ptr_eq(&clone));
    }

    #[test]
    fn test_transform_materialized_at_construction() {
        let (_store, entity) = spawn("spatial");

        let transform = entity.transform();
        let again = entity.transform();
        assert!(Rc::ptr_eq(&transform, &again));

        transform.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(again.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_create_component_is_idempotent() {
        let (store, entity) = spawn("body");

        let first = entity.create_component::<PhysicsBody>();
        let second = entity.create_component::<PhysicsBody>();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(store
            .borrow()
            .has_component(entity.id(), ComponentKind::PhysicsBody));
    }

    #[test]
    fn test_get_component_missing_returns_none() {
        let (_store, entity) = spawn("bare");

        assert!(!entity.has_component::<PhysicsBody>());
        assert!(entity.get_component::<PhysicsBody>().is_none());
        // get never attaches
        assert!(!entity.has_component::<PhysicsBody>());
    }

    #[test]
    fn test_get_component_binds_out_of_band_attachment() {
        let (store, entity) = spawn("external");

        // Kind attached through the store without the wrapper observing it.
        store
            .borrow_mut()
            .add_component(entity.id(), ComponentKind::Renderable);

        assert!(entity.has_component::<Renderable>());
        let bound = entity.get_component::<Renderable>();
        assert!(bound.is_some());

        let cached = entity.get_component::<Renderable>().unwrap();
        assert!(Rc::ptr_eq(&bound.unwrap(), &cached));
    }

    #[test]
    fn test_remove_component_lifecycle() {
        let (_store, entity) = spawn("body");
        entity.create_component::<PhysicsBody>();

        assert!(entity.has_component::<PhysicsBody>());
        assert!(entity.remove_component::<PhysicsBody>());
        assert!(entity.get_component::<PhysicsBody>().is_none());
        assert!(!entity.remove_component::<PhysicsBody>());
    }

    #[test]
    fn test_parent_revalidates_on_read() {
        let store = store_handle(MemoryStore::new());
        let child_id = store.borrow_mut().create_entity("A");
        let parent_id = store.borrow_mut().create_entity("B");
        let child = Entity::new(store.clone(), child_id);
        let parent = Entity::new(store.clone(), parent_id);

        assert!(child.parent().is_none());

        child.set_parent(&parent);
        let first_read = child.parent().unwrap();
        let second_read = child.parent().unwrap();
        assert_eq!(first_read, second_read);
        assert_eq!(first_read.id(), parent_id);

        store.borrow_mut().destroy_entity(parent_id);
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_parent_cache_replaced_on_reparent() {
        let store = store_handle(MemoryStore::new());
        let child_id = store.borrow_mut().create_entity("child");
        let first_id = store.borrow_mut().create_entity("first");
        let second_id = store.borrow_mut().create_entity("second");
        let child = Entity::new(store.clone(), child_id);

        child.set_parent(&Entity::new(store.clone(), first_id));
        assert_eq!(child.parent().unwrap().id(), first_id);

        child.set_parent(&Entity::new(store.clone(), second_id));
        assert_eq!(child.parent().unwrap().id(), second_id);

        child.clear_parent();
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_destroy_notifies_once() {
        let (_store, entity) = spawn("doomed");
        let listener = CountingListener::new();
        let as_dyn: Rc<dyn DestroyedListener> = listener.clone();

        entity.subscribe_destroyed(&as_dyn);
        entity.subscribe_destroyed(&as_dyn); // duplicate ignored

        entity.destroy();
        assert_eq!(listener.calls.get(), 1);
        assert_eq!(listener.last_id.get(), entity.id());

        // Subscriber list was drained; a second destroy notifies nobody.
        entity.destroy();
        assert_eq!(listener.calls.get(), 1);
    }

    #[test]
    fn test_unsubscribed_listener_not_notified() {
        let (_store, entity) = spawn("quiet");
        let listener = CountingListener::new();
        let as_dyn: Rc<dyn DestroyedListener> = listener.clone();

        entity.subscribe_destroyed(&as_dyn);
        entity.unsubscribe_destroyed(&as_dyn);
        entity.destroy();
        assert_eq!(listener.calls.get(), 0);
    }

    #[test]
    fn test_dropped_listener_is_skipped() {
        let (_store, entity) = spawn("orphaned");
        {
            let listener = CountingListener::new();
            let as_dyn: Rc<dyn DestroyedListener> = listener;
            entity.subscribe_destroyed(&as_dyn);
        }
        // Listener dropped; destroy must not panic.
        entity.destroy();
    }

    #[test]
    fn test_component_outliving_entity_degrades() {
        let (_store, entity) = spawn("transient");
        let transform = entity.transform();
        drop(entity);

        // The back-reference is dead; reads default, writes no-op.
        assert_relative_eq!(transform.position(), Vec3::zeros());
        transform.set_position(Vec3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(transform.position(), Vec3::zeros());
    }

    #[test]
    fn test_tag_renames_through_store() {
        let (store, entity) = spawn("before");
        let tag = entity.create_component::<Tag>();

        assert_eq!(tag.name(), "before");
        tag.set_name("after");
        assert_eq!(entity.name(), "after");
        assert_eq!(store.borrow().resolve_name("after"), entity.id());
    }
}
