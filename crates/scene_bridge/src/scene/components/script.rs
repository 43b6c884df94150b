//! Script component markers
//!
//! Attachment tags binding runtime-side script instances to an entity. The
//! script instances themselves belong to the runtime's scripting host.

use super::Component;
use crate::scene::entity::EntityHandle;
use crate::store::ComponentKind;

/// Managed script behavior marker
pub struct Script {
    owner: EntityHandle,
}

impl Component for Script {
    const KIND: ComponentKind = ComponentKind::Script;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}

/// Native script behavior marker
pub struct NativeScript {
    owner: EntityHandle,
}

impl Component for NativeScript {
    const KIND: ComponentKind = ComponentKind::NativeScript;

    fn attach(owner: EntityHandle) -> Self {
        Self { owner }
    }

    fn owner(&self) -> &EntityHandle {
        &self.owner
    }
}
