//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagecraft::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game facade
pub use crate::engine::{Game, GameModule};

// Context and errors
pub use crate::core::context::GameContext;
pub use crate::core::error::{ManifestError, RenderError, SceneError, StageError, StageResult};

// Scene system
pub use crate::core::scene::{
    DirectionHandlers, FrameDriven, GameLoopFn, ModuleContent, Scene, SceneContent,
    SceneDescriptor, SceneServices, SelfDriven, DEFAULT_STATE_FUNCTION,
};

// Navigation
pub use crate::core::mediator::{NavigationMediator, Navigator};

// Render host boundary
pub use crate::core::render::{
    EngineHandle, HeadlessBackend, MountPoint, RenderBackend, RenderConfig, RenderHost, Surface,
    Ticker, TickerFrame, STANDARD_FPS, SURFACE_ELEMENT_ID,
};

// Registries and metadata
pub use crate::core::metadata::{MetadataStore, ModuleRecord};
pub use crate::core::registry::{DependencyRegistry, ProviderDescriptor};

// Input
pub use crate::core::input::{Direction, DirectionBindings, KeyCode, KeyDispatcher};

// Manifests
pub use crate::core::manifest::{
    build_sprites, manifest_from_json, ManifestEntry, SceneManifest, Sprite, SpriteSheetDoc,
};

// Animation helpers
pub use crate::core::animation::FadeAnimation;
