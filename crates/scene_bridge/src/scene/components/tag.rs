//! Identity tag component
//!
//! Carries the entity's display name. Present on every entity; the store
//! refuses to remove it.

use super::Component;
use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;

/// Display name accessor for an entity
pub struct Tag {
    owner: EntityHandle,
}

impl Component for Tag {
    const KIND: ComponentKind = ComponentKind::Tag;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

impl Tag {
    /// Current display name, empty when the entity no longer exists
    pub fn name(&self) -> String {
        self.owner.read(String::new(), |store, id| store.name_of(id))
    }

    /// Rename the entity
    ///
    /// Name-based registry lookups performed after a rename resolve against
    /// the new name.
    pub fn set_name(&self, name: &str) {
        self.owner.write(|store, id| store.set_name(id, name));
    }
}
