//! Renderable component markers
//!
//! Attachment tags consumed by the runtime's renderer. They carry no
//! managed-side field surface; attaching the kind is the whole contract.

use super::Component;
use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;

/// Flat-colored renderable marker
pub struct Renderable {
    owner: EntityHandle,
}

impl Component for Renderable {
    const KIND: ComponentKind = ComponentKind::Renderable;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

/// Textured renderable marker
pub struct TexturedRenderable {
    owner: EntityHandle,
}

impl Component for TexturedRenderable {
    const KIND: ComponentKind = ComponentKind::TexturedRenderable;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

/// Model-based renderable marker
pub struct RenderableModel {
    owner: EntityHandle,
}

impl Component for RenderableModel {
    const KIND: ComponentKind = ComponentKind::RenderableModel;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}
