//=========================================================================
// Scene Lifecycle Loader
//=========================================================================
//
// Sole owner of the Current Scene Handle. Runs the load protocol for a
// resolved descriptor and the teardown that precedes every load.
//
// Load steps, strictly ordered, each complete before the next begins:
//   1. full host re-init with the scene's render settings
//   2. instantiate via the descriptor factory (constructor injection)
//   3. scene asset loading — failure aborts with nothing attached
//   4. attach the fresh surface to the mount point
//   5. scene start (initial visual tree)
//   6. directional input binding — best effort, logged on failure
//   7. lifecycle mode: self-driven setup, or ticker wiring + behavior
//      state selection
//
// At most one loaded scene exists at any time. Teardown detaches the
// mounted surface, clears key dispatch, and drops the previous instance;
// the ticker is not stopped — the next load's re-init replaces it.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::super::context::GameContext;
use super::super::error::{SceneError, StageResult};
use super::super::render::TickerFrame;
use super::content::{SceneDescriptor, SceneServices};
use super::{Scene, DEFAULT_STATE_FUNCTION};

//=== LoadedScene =========================================================

/// The live scene instance plus its name.
///
/// Shared (`Rc`) with the ticker callback and the key dispatcher while
/// current; all clones are dropped on teardown.
pub(crate) struct LoadedScene {
    pub(crate) name: String,
    #[allow(dead_code)] // keeps the instance alive; borrowed via clones
    pub(crate) scene: Rc<RefCell<Box<dyn Scene>>>,
}

//=== SceneLoader =========================================================

/// Loads and tears down scenes. One instance per `Game`.
pub struct SceneLoader {
    current: Option<LoadedScene>,
}

impl SceneLoader {
    pub(crate) fn new() -> Self {
        Self { current: None }
    }

    /// Name of the currently loaded scene, if any.
    pub fn current_scene(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.name.as_str())
    }

    //--- Teardown ---------------------------------------------------------

    /// Destroys the Current Scene Handle. Idempotent.
    pub(crate) fn teardown(&mut self, ctx: &mut GameContext) {
        if ctx.mount.detach() {
            debug!(target: "scene", "render surface detached");
        }
        ctx.input.clear();
        if let Some(previous) = self.current.take() {
            debug!(target: "scene", "scene '{}' dropped", previous.name);
        }
    }

    //--- Load -------------------------------------------------------------

    /// Runs the full load protocol for `descriptor`.
    pub(crate) fn load(
        &mut self,
        descriptor: &SceneDescriptor,
        ctx: &mut GameContext,
    ) -> StageResult<()> {
        let name = descriptor.scene_name.clone();
        debug!(target: "scene", "loading scene '{}'", name);

        // 1. fresh surface and ticker for this scene's render settings
        ctx.host.init(&descriptor.content.render)?;

        // 2. construction with the context services
        let services = SceneServices {
            navigator: ctx.navigator.clone(),
            registry: &ctx.providers,
        };
        let scene = Rc::new(RefCell::new((descriptor.factory)(&services)));

        // 3. assets must be complete before anything is shown
        {
            let engine = ctx.host.engine_mut()?;
            scene.borrow_mut().load_assets(engine)?;
        }

        // 4. attach the surface
        let surface = Rc::clone(&ctx.host.engine()?.surface);
        ctx.mount.attach(surface);

        // 5. scene-defined start
        {
            let engine = ctx.host.engine_mut()?;
            scene.borrow_mut().start_scene(engine)?;
        }

        // 6. directional input, best effort
        let directional = scene.borrow_mut().as_direction_handlers().is_some();
        if directional {
            if let Err(bind_error) = ctx.input.bind(&scene, &name) {
                error!(target: "scene", "input binding for '{}' failed: {}", name, bind_error);
            }
        }

        // 7. lifecycle mode
        {
            let engine = ctx.host.engine_mut()?;
            let mut instance = scene.borrow_mut();

            if let Some(driver) = instance.as_self_driven() {
                driver.setup(engine);
            } else if descriptor.content.ticker_on {
                let has_frame_driven = instance.as_frame_driven().is_some();
                let callback: Box<dyn FnMut(&mut TickerFrame)> =
                    match descriptor.content.game_loop_function {
                        Some(game_loop) => {
                            let target = Rc::clone(&scene);
                            Box::new(move |frame| {
                                let mut guard = target.borrow_mut();
                                game_loop(&mut **guard, frame);
                            })
                        }
                        None if has_frame_driven => {
                            let target = Rc::clone(&scene);
                            Box::new(move |frame| {
                                if let Some(driver) = target.borrow_mut().as_frame_driven() {
                                    driver.game_loop(frame);
                                }
                            })
                        }
                        None => return Err(SceneError::MissingGameLoop(name).into()),
                    };
                engine.ticker.add_boxed(callback);

                let state = descriptor
                    .content
                    .state_function
                    .as_deref()
                    .unwrap_or(DEFAULT_STATE_FUNCTION);
                let selected = instance
                    .as_frame_driven()
                    .map(|driver| driver.select_state(state))
                    .unwrap_or(false);
                if !selected {
                    return Err(SceneError::MissingStateFunction {
                        scene: name,
                        state: state.to_owned(),
                    }
                    .into());
                }
            }
        }

        info!(target: "scene", "scene '{}' started", name);
        self.current = Some(LoadedScene { name, scene });
        Ok(())
    }
}
