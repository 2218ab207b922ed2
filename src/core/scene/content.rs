//=========================================================================
// Declarative Content
//=========================================================================
//
// Explicit configuration structs attached to scenes and modules, built
// once and read-only thereafter.
//
// SceneContent    — per-scene render settings and lifecycle declaration
// SceneDescriptor — name + content + factory, one registry row
// ModuleContent   — top-level bundle read once at bootstrap
//
// These replace runtime metadata injection: configuration carries actual
// function references and factories, decided at construction time.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::TypeId;

//=== Internal Dependencies ===============================================

use super::super::mediator::Navigator;
use super::super::registry::{DependencyRegistry, ProviderDescriptor};
use super::super::render::{RenderConfig, TickerFrame};
use super::Scene;

//=== SceneServices =======================================================

/// Construction-time services handed to scene factories.
///
/// Scenes capture what they need here — typically the navigator handle
/// and any providers resolved from the dependency registry.
pub struct SceneServices<'a> {
    /// Handle for requesting scene transitions.
    pub navigator: Navigator,

    /// Module-wide provider bindings.
    pub registry: &'a DependencyRegistry,
}

//=== SceneContent ========================================================

/// Explicit per-frame callback carried by scene content.
///
/// Takes precedence over the scene's own `FrameDriven` capability when
/// the loader wires the ticker.
pub type GameLoopFn = fn(&mut dyn Scene, &mut TickerFrame);

/// Declarative configuration attached to a scene.
///
/// Defaults: ticker off, no explicit game loop, behavior state resolved
/// to `"play"`.
#[derive(Debug, Clone, Default)]
pub struct SceneContent {
    /// Render settings the host is re-initialized with for this scene.
    pub render: RenderConfig,

    /// Whether the loader registers a per-frame ticker callback.
    pub ticker_on: bool,

    /// Behavior state selected at load; `None` resolves to the default.
    pub state_function: Option<String>,

    /// Explicit game loop, preferred over the scene's own capability.
    pub game_loop_function: Option<GameLoopFn>,
}

impl SceneContent {
    /// Content with the given render settings and everything else default.
    pub fn new(render: RenderConfig) -> Self {
        Self { render, ..Self::default() }
    }

    /// Enables the ticker for this scene.
    pub fn with_ticker(mut self) -> Self {
        self.ticker_on = true;
        self
    }

    /// Declares the behavior state selected at load.
    pub fn with_state_function(mut self, name: impl Into<String>) -> Self {
        self.state_function = Some(name.into());
        self
    }

    /// Declares an explicit game loop function.
    pub fn with_game_loop(mut self, game_loop: GameLoopFn) -> Self {
        self.game_loop_function = Some(game_loop);
        self
    }
}

//=== SceneDescriptor =====================================================

pub(crate) type SceneFactory = Box<dyn Fn(&SceneServices) -> Box<dyn Scene>>;

/// One scene registration: name, content, and the factory that
/// instantiates the scene on every navigation.
///
/// Immutable once registered. Duplicate names across a scene map resolve
/// to the first registration.
pub struct SceneDescriptor {
    pub scene_name: String,
    pub content: SceneContent,
    pub(crate) factory: SceneFactory,
    pub(crate) type_key: Option<TypeId>,
}

impl SceneDescriptor {
    /// Descriptor with a type-erased factory.
    pub fn new(
        scene_name: impl Into<String>,
        content: SceneContent,
        factory: impl Fn(&SceneServices) -> Box<dyn Scene> + 'static,
    ) -> Self {
        Self {
            scene_name: scene_name.into(),
            content,
            factory: Box::new(factory),
            type_key: None,
        }
    }

    /// Descriptor for a concrete scene type.
    ///
    /// The content blob is additionally recorded in the metadata store at
    /// bootstrap, keyed by `S`.
    pub fn typed<S: Scene>(
        scene_name: impl Into<String>,
        content: SceneContent,
        factory: impl Fn(&SceneServices) -> S + 'static,
    ) -> Self {
        Self {
            scene_name: scene_name.into(),
            content,
            factory: Box::new(move |services| Box::new(factory(services))),
            type_key: Some(TypeId::of::<S>()),
        }
    }
}

impl std::fmt::Debug for SceneDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDescriptor")
            .field("scene_name", &self.scene_name)
            .field("type_key", &self.type_key)
            .finish_non_exhaustive()
    }
}

//=== ModuleContent =======================================================

/// The top-level bundle declaring the initial scene, global render
/// configuration, provider bindings, and the full scene map.
pub struct ModuleContent {
    /// Name of the scene loaded first.
    pub start_scene: String,

    /// Render settings used for the initial host initialization.
    pub app_configuration: RenderConfig,

    /// Ordered scene registrations.
    pub scene_map: Vec<SceneDescriptor>,

    /// Provider bindings installed into the dependency registry.
    pub providers: Vec<ProviderDescriptor>,
}

//=========================================================================
// Unit Tests
//=========================================================================
