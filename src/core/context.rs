//=========================================================================
// Game Context
//=========================================================================
//
// Shared state container passed by reference through the bootstrapper,
// the navigator, and the lifecycle loader.
//
// Everything that would otherwise live as process-wide singleton state
// is owned here explicitly: render host, mount point, key dispatcher,
// metadata store, dependency registry, and the navigator handle. There
// are no module-level globals — two `Game` values own two fully
// independent contexts.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::input::KeyDispatcher;
use super::mediator::Navigator;
use super::metadata::MetadataStore;
use super::registry::DependencyRegistry;
use super::render::{MountPoint, RenderHost};

//=== GameContext =========================================================

/// Explicitly constructed shared state, owned by the `Game` facade.
pub struct GameContext {
    /// Owner of the single live engine handle.
    pub host: RenderHost,

    /// The single well-known surface container.
    pub mount: MountPoint,

    /// Keyboard dispatch bound to the current scene.
    pub input: KeyDispatcher,

    /// Declarative scene/module configuration and write-once values.
    pub metadata: MetadataStore,

    /// Module-wide provider bindings.
    pub providers: DependencyRegistry,

    /// Handle for emitting navigation events.
    pub(crate) navigator: Navigator,
}

impl GameContext {
    /// The navigation handle scenes and embedders share.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }
}
