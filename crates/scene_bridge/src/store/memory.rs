//! In-memory reference store
//!
//! A complete, self-contained [`EngineStore`] used by the sandbox and the
//! test suite. It mirrors the behavior the contract demands of a production
//! runtime: identities are never reused, baseline kinds exist from birth,
//! and every operation on an unknown identity degrades to a no-op or a
//! sentinel result.

use super::{ComponentKind, EngineStore, EntityId, PhysicsBodyType};
use crate::foundation::math::Vec3;
use log::trace;
use slotmap::{DefaultKey, SlotMap};
use std::collections::{HashMap, HashSet};

/// Transform state held on the store side
#[derive(Debug, Clone, PartialEq)]
struct TransformState {
    position: Vec3,
    scale: Vec3,
    rotation: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
        }
    }
}

/// Physics body state held on the store side
#[derive(Debug, Clone, PartialEq)]
struct PhysicsState {
    body_type: PhysicsBodyType,
    position: Vec3,
    rotation: Vec3,
    mass: f32,
    accumulated_force: Vec3,
    accumulated_torque: Vec3,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            body_type: PhysicsBodyType::Static,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            mass: 1.0,
            accumulated_force: Vec3::zeros(),
            accumulated_torque: Vec3::zeros(),
        }
    }
}

/// Ground-truth record for one live entity
#[derive(Debug)]
struct EntityRecord {
    name: String,
    parent: EntityId,
    kinds: HashSet<ComponentKind>,
    transform: TransformState,
    physics: PhysicsState,
}

impl EntityRecord {
    fn new(name: &str) -> Self {
        // Every entity carries the baseline kinds from birth.
        let kinds = [ComponentKind::Tag, ComponentKind::Transform]
            .into_iter()
            .collect();
        Self {
            name: name.to_owned(),
            parent: EntityId::NONE,
            kinds,
            transform: TransformState::default(),
            physics: PhysicsState::default(),
        }
    }
}

/// In-memory authoritative store
///
/// Records live in a slotmap for dense storage; a handle map provides the
/// stable [`EntityId`] addressing. Identities come from a monotonically
/// increasing counter and are never reused, so a stale identity held by the
/// managed layer can never alias a newer entity.
#[derive(Default)]
pub struct MemoryStore {
    records: SlotMap<DefaultKey, EntityRecord>,
    handles: HashMap<EntityId, DefaultKey>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: SlotMap::new(),
            handles: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.handles.get(&id).and_then(|key| self.records.get(*key))
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        let key = *self.handles.get(&id)?;
        self.records.get_mut(key)
    }
}

impl EngineStore for MemoryStore {
    fn create_entity(&mut self, name: &str) -> EntityId {
        self.next_id += 1;
        let id = EntityId::from_raw(self.next_id);
        let key = self.records.insert(EntityRecord::new(name));
        self.handles.insert(id, key);
        trace!("store: created {id} ({name:?})");
        id
    }

    fn destroy_entity(&mut self, id: EntityId) {
        if let Some(key) = self.handles.remove(&id) {
            self.records.remove(key);
            trace!("store: destroyed {id}");
            // Children keep their parent link; parent_of revalidates it away.
        }
    }

    fn is_valid(&self, id: EntityId) -> bool {
        id.is_some() && self.handles.contains_key(&id)
    }

    fn parent_of(&self, id: EntityId) -> EntityId {
        match self.record(id) {
            Some(record) if self.is_valid(record.parent) => record.parent,
            _ => EntityId::NONE,
        }
    }

    fn set_parent(&mut self, id: EntityId, parent: EntityId) {
        if !self.is_valid(id) || (parent.is_some() && !self.is_valid(parent)) {
            return;
        }
        if let Some(record) = self.record_mut(id) {
            record.parent = parent;
        }
    }

    fn resolve_name(&self, name: &str) -> EntityId {
        self.handles
            .iter()
            .find(|(_, key)| {
                self.records
                    .get(**key)
                    .is_some_and(|record| record.name == name)
            })
            .map_or(EntityId::NONE, |(id, _)| *id)
    }

    fn name_of(&self, id: EntityId) -> String {
        self.record(id).map_or_else(String::new, |r| r.name.clone())
    }

    fn set_name(&mut self, id: EntityId, name: &str) {
        if let Some(record) = self.record_mut(id) {
            record.name = name.to_owned();
        }
    }

    fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.record(id).is_some_and(|r| r.kinds.contains(&kind))
    }

    fn add_component(&mut self, id: EntityId, kind: ComponentKind) {
        if let Some(record) = self.record_mut(id) {
            record.kinds.insert(kind);
        }
    }

    fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        if kind.is_baseline() {
            return false;
        }
        self.record_mut(id)
            .is_some_and(|record| record.kinds.remove(&kind))
    }

    fn position(&self, id: EntityId) -> Vec3 {
        self.record(id).map_or_else(Vec3::zeros, |r| r.transform.position)
    }

    fn set_position(&mut self, id: EntityId, value: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.transform.position = value;
        }
    }

    fn scale(&self, id: EntityId) -> Vec3 {
        self.record(id).map_or_else(Vec3::zeros, |r| r.transform.scale)
    }

    fn set_scale(&mut self, id: EntityId, value: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.transform.scale = value;
        }
    }

    fn rotation(&self, id: EntityId) -> Vec3 {
        self.record(id).map_or_else(Vec3::zeros, |r| r.transform.rotation)
    }

    fn set_rotation(&mut self, id: EntityId, value: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.transform.rotation = value;
        }
    }

    fn body_type(&self, id: EntityId) -> PhysicsBodyType {
        self.record(id)
            .map_or(PhysicsBodyType::Static, |r| r.physics.body_type)
    }

    fn set_body_type(&mut self, id: EntityId, value: PhysicsBodyType) {
        if let Some(record) = self.record_mut(id) {
            record.physics.body_type = value;
        }
    }

    fn body_position(&self, id: EntityId) -> Vec3 {
        self.record(id).map_or_else(Vec3::zeros, |r| r.physics.position)
    }

    fn set_body_position(&mut self, id: EntityId, value: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.physics.position = value;
        }
    }

    fn body_rotation(&self, id: EntityId) -> Vec3 {
        self.record(id).map_or_else(Vec3::zeros, |r| r.physics.rotation)
    }

    fn set_body_rotation(&mut self, id: EntityId, value: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.physics.rotation = value;
        }
    }

    fn body_mass(&self, id: EntityId) -> f32 {
        self.record(id).map_or(0.0, |r| r.physics.mass)
    }

    fn set_body_mass(&mut self, id: EntityId, value: f32) {
        if let Some(record) = self.record_mut(id) {
            record.physics.mass = value;
        }
    }

    fn apply_force(&mut self, id: EntityId, force: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.physics.accumulated_force += force;
        }
    }

    fn apply_force_at(&mut self, id: EntityId, force: Vec3, _point: Vec3) {
        // The reference store has no inertia model; the offset only matters
        // to a real solver.
        self.apply_force(id, force);
    }

    fn apply_torque(&mut self, id: EntityId, torque: Vec3) {
        if let Some(record) = self.record_mut(id) {
            record.physics.accumulated_torque += torque;
        }
    }
}
