//! Physics body component

use super::Component;
use crate::foundation::math::Vec3;
use crate::scene::entity::EntityHandle;
use crate::store::{ComponentKind, PhysicsBodyType};

/// Simulated body accessor for an entity
///
/// Reads and writes go to the solver's state, which is distinct from the
/// transform: a kinematic or dynamic body drives the entity's transform each
/// step, while a static body follows it.
pub struct PhysicsBody {
    owner: EntityHandle,
}

impl Component for PhysicsBody {
    const KIND: ComponentKind = ComponentKind::PhysicsBody;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

impl PhysicsBody {
    /// Simulation mode of the body
    pub fn body_type(&self) -> PhysicsBodyType {
        self.owner
            .read(PhysicsBodyType::Static, |store, id| store.body_type(id))
    }

    /// Set the simulation mode of the body
    pub fn set_body_type(&self, value: PhysicsBodyType) {
        self.owner.write(|store, id| store.set_body_type(id, value));
    }

    /// Body position in the solver
    pub fn position(&self) -> Vec3 {
        self.owner.read(Vec3::zeros(), |store, id| store.body_position(id))
    }

    /// Set the body position in the solver
    pub fn set_position(&self, value: Vec3) {
        self.owner.write(|store, id| store.set_body_position(id, value));
    }

    /// Body rotation in the solver (Euler angles, radians)
    pub fn rotation(&self) -> Vec3 {
        self.owner.read(Vec3::zeros(), |store, id| store.body_rotation(id))
    }

    /// Set the body rotation in the solver (Euler angles, radians)
    pub fn set_rotation(&self, value: Vec3) {
        self.owner.write(|store, id| store.set_body_rotation(id, value));
    }

    /// Body mass
    pub fn mass(&self) -> f32 {
        self.owner.read(0.0, |store, id| store.body_mass(id))
    }

    /// Set the body mass
    pub fn set_mass(&self, value: f32) {
        self.owner.write(|store, id| store.set_body_mass(id, value));
    }

    /// Apply a force at the body's center of mass
    pub fn apply_force(&self, force: Vec3) {
        self.owner.write(|store, id| store.apply_force(id, force));
    }

    /// Apply a force at a world-space point
    pub fn apply_force_at(&self, force: Vec3, point: Vec3) {
        self.owner
            .write(|store, id| store.apply_force_at(id, force, point));
    }

    /// Apply a torque to the body
    pub fn apply_torque(&self, torque: Vec3) {
        self.owner.write(|store, id| store.apply_torque(id, torque));
    }
}
