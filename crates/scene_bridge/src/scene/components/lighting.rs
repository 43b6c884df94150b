//! Light source component markers
//!
//! Attachment tags for the runtime's lighting pass. Field state (color,
//! intensity, falloff) lives on the runtime side and is outside this layer's
//! surface.

use super::Component;
use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;

/// Directional light marker
pub struct DirectionalLight {
    owner: EntityHandle,
}

impl Component for DirectionalLight {
    const KIND: ComponentKind = ComponentKind::DirectionalLight;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

/// Point light marker
pub struct PointLight {
    owner: EntityHandle,
}

impl Component for PointLight {
    const KIND: ComponentKind = ComponentKind::PointLight;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

/// Spot light marker
pub struct SpotLight {
    owner: EntityHandle,
}

impl Component for SpotLight {
    const KIND: ComponentKind = ComponentKind::SpotLight;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}
