//! Transform component
//!
//! Spatial state accessor. Present on every entity and wrapped eagerly at
//! entity construction.
//!
//! A kinematic or dynamic physics body overrides position and rotation
//! written through the transform; with a static body the transform wins.

use super::Component;
use crate::foundation::math::Vec3;
use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;

/// Spatial transform accessor for an entity
pub struct Transform {
    owner: EntityHandle,
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

impl Transform {
    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.owner.read(Vec3::zeros(), |store, id| store.position(id))
    }

    /// Set world-space position
    pub fn set_position(&self, value: Vec3) {
        self.owner.write(|store, id| store.set_position(id, value));
    }

    /// World-space scale
    pub fn scale(&self) -> Vec3 {
        self.owner.read(Vec3::zeros(), |store, id| store.scale(id))
    }

    /// Set world-space scale
    pub fn set_scale(&self, value: Vec3) {
        self.owner.write(|store, id| store.set_scale(id, value));
    }

    /// World-space rotation (Euler angles, radians)
    pub fn rotation(&self) -> Vec3 {
        self.owner.read(Vec3::zeros(), |store, id| store.rotation(id))
    }

    /// Set world-space rotation (Euler angles, radians)
    pub fn set_rotation(&self, value: Vec3) {
        self.owner.write(|store, id| store.set_rotation(id, value));
    }
}
