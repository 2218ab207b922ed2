//=========================================================================
// Game Facade & Module Bootstrapper
//=========================================================================
//
// Top-level entry wiring a module declaration to a running game.
//
// Boot sequence:
//   1. initialize the render host with the module's app configuration
//   2. populate the dependency registry from the module's providers
//   3. construct the scene registry and subscribe the navigator
//   4. emit one navigation event for the start scene and pump it, so the
//      start scene is live when `boot` returns
//
// Per frame (driven by the platform shell, or manually when embedding):
//   pump queued navigations → tick the current engine handle's ticker
//
// Two `Game` values are fully independent — each owns its own mediator,
// context, and registries.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::error::StageResult;
use crate::core::input::{KeyCode, KeyDispatcher};
use crate::core::mediator::{NavigationMediator, Navigator};
use crate::core::metadata::{MetadataStore, ModuleRecord};
use crate::core::registry::DependencyRegistry;
use crate::core::render::{MountPoint, RenderBackend, RenderHost};
use crate::core::scene::{ModuleContent, SceneNavigator, SceneRegistry};

//=== GameModule ==========================================================

/// A type standing for one game module declaration.
///
/// Modules booted through [`Game::boot_module`] get their declarative
/// record attached to the metadata store under the module type.
pub trait GameModule: 'static {
    fn module() -> ModuleContent;
}

//=== Game ================================================================

/// The running game: context, mediator, and scene navigation.
pub struct Game {
    context: GameContext,
    mediator: Rc<RefCell<NavigationMediator>>,
    scenes: SceneNavigator,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game").finish_non_exhaustive()
    }
}

impl Game {
    //--- Bootstrapping ----------------------------------------------------

    /// Boots a module declaration against the given render backend.
    ///
    /// # Errors
    ///
    /// Host initialization and first-navigation failures surface here;
    /// a failed boot leaves nothing mounted.
    pub fn boot(module: ModuleContent, backend: Box<dyn RenderBackend>) -> StageResult<Game> {
        Self::boot_with_record(module, backend, None)
    }

    /// Boots the module declared by type `M`, recording its declarative
    /// part in the metadata store.
    pub fn boot_module<M: GameModule>(backend: Box<dyn RenderBackend>) -> StageResult<Game> {
        let module = M::module();
        Self::boot_with_record(module, backend, Some(attach_record::<M>))
    }

    fn boot_with_record(
        module: ModuleContent,
        backend: Box<dyn RenderBackend>,
        record: Option<fn(&mut MetadataStore, ModuleRecord)>,
    ) -> StageResult<Game> {
        let ModuleContent {
            start_scene,
            app_configuration,
            scene_map,
            providers,
        } = module;

        info!(target: "boot", "booting module, start scene '{}'", start_scene);

        let mediator = Rc::new(RefCell::new(NavigationMediator::new()));
        let mut context = GameContext {
            host: RenderHost::new(backend),
            mount: MountPoint::new(),
            input: KeyDispatcher::new(),
            metadata: MetadataStore::new(),
            providers: DependencyRegistry::new(),
            navigator: Navigator::new(Rc::clone(&mediator)),
        };

        // 1. app-level host initialization
        context.host.init(&app_configuration)?;

        // 2. provider bindings
        context.providers.populate(providers);

        if let Some(attach) = record {
            attach(
                &mut context.metadata,
                ModuleRecord {
                    start_scene: start_scene.clone(),
                    app_configuration,
                },
            );
        }

        // 3. scene registry + navigator subscription
        for descriptor in &scene_map {
            if let Some(key) = descriptor.type_key {
                context
                    .metadata
                    .attach_scene_content_by_key(key, descriptor.content.clone());
            }
        }
        let scenes = SceneNavigator::new(SceneRegistry::new(scene_map));
        scenes.subscribe(&mut mediator.borrow_mut());

        // 4. first navigation
        let mut game = Game { context, mediator, scenes };
        game.navigate(&start_scene)?;
        Ok(game)
    }

    //--- Navigation -------------------------------------------------------

    /// Emits a navigation event and processes the queue immediately.
    pub fn navigate(&mut self, scene_name: &str) -> StageResult<()> {
        self.mediator.borrow_mut().update(scene_name);
        self.pump()
    }

    /// A cloneable handle for requesting navigation from outside.
    pub fn navigator(&self) -> Navigator {
        self.context.navigator()
    }

    fn pump(&mut self) -> StageResult<()> {
        self.scenes.pump(&mut self.context)
    }

    //--- Frame Driving ----------------------------------------------------

    /// Advances one frame: queued navigations first, then the ticker.
    pub fn frame(&mut self, delta_seconds: f32) -> StageResult<()> {
        self.pump()?;
        if let Ok(engine) = self.context.host.engine_mut() {
            engine.ticker.tick(delta_seconds);
        }
        Ok(())
    }

    /// Routes one key-down event to the current scene.
    ///
    /// Returns true when a bound handler ran.
    pub fn key_down(&mut self, key: KeyCode) -> bool {
        self.context.input.dispatch(key)
    }

    //--- Access -----------------------------------------------------------

    /// Name of the currently loaded scene, if any.
    pub fn current_scene(&self) -> Option<&str> {
        self.scenes.current_scene()
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }

    //--- Windowed Entry Point ---------------------------------------------

    /// Boots `module` inside the windowing shell and runs until the
    /// window closes. Blocks the calling thread.
    pub fn run(module: ModuleContent) -> StageResult<()> {
        crate::platform::run(module)
    }
}

fn attach_record<M: GameModule>(metadata: &mut MetadataStore, record: ModuleRecord) {
    metadata.attach_module_record::<M>(record);
}

//=========================================================================
// Unit Tests
//=========================================================================
