//=========================================================================
// Scene Navigator
//=========================================================================
//
// Receives navigation events from the mediator and drives the lifecycle
// loader.
//
// Requests are buffered in a channel and drained by `pump` between
// frames. This serializes overlapping navigations: a request emitted
// while a load is in progress waits in the queue and is processed only
// after the current load completes, so the single-Current-Scene
// invariant holds unconditionally.
//
// Per event, in fixed order: teardown → lookup → load. Teardown always
// precedes load, so the render surface is never attached to two scenes
// simultaneously.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::super::context::GameContext;
use super::super::error::StageResult;
use super::super::mediator::NavigationMediator;
use super::loader::SceneLoader;
use super::registry::SceneRegistry;

//=== SceneNavigator ======================================================

/// Scene registry plus loader, fed by the navigation queue.
pub struct SceneNavigator {
    registry: SceneRegistry,
    loader: SceneLoader,
    requests: Receiver<String>,
    queue: Sender<String>,
}

impl SceneNavigator {
    /// Creates a navigator over the given registry with an empty queue.
    pub fn new(registry: SceneRegistry) -> Self {
        let (queue, requests) = unbounded();
        Self {
            registry,
            loader: SceneLoader::new(),
            requests,
            queue,
        }
    }

    //--- Mediator Wiring --------------------------------------------------

    /// Subscribes this navigator to a mediator's navigation events.
    pub fn subscribe(&self, mediator: &mut NavigationMediator) {
        let queue = self.queue.clone();
        mediator.register(move |scene_name| {
            if queue.send(scene_name.to_owned()).is_err() {
                warn!(target: "scene", "navigator gone, dropping navigation to '{}'", scene_name);
            }
        });
    }

    //--- Queue Processing -------------------------------------------------

    /// Drains the navigation queue, performing one full transition per
    /// queued event.
    ///
    /// # Errors
    ///
    /// Resolution and lifecycle errors surface to the caller; the queue
    /// retains any remaining events for the next pump.
    pub fn pump(&mut self, ctx: &mut GameContext) -> StageResult<()> {
        while let Ok(scene_name) = self.requests.try_recv() {
            debug!(target: "scene", "navigating to '{}'", scene_name);
            self.loader.teardown(ctx);
            let descriptor = self.registry.lookup(&scene_name)?;
            self.loader.load(descriptor, ctx)?;
        }
        Ok(())
    }

    //--- Query API --------------------------------------------------------

    /// Name of the currently loaded scene, if any.
    pub fn current_scene(&self) -> Option<&str> {
        self.loader.current_scene()
    }

    /// Number of scenes in the registry.
    pub fn scene_count(&self) -> usize {
        self.registry.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::context::GameContext;
    use crate::core::error::{SceneError, StageError};
    use crate::core::mediator::NavigationMediator;
    use crate::core::input::KeyDispatcher;
    use crate::core::mediator::Navigator;
    use crate::core::metadata::MetadataStore;
    use crate::core::registry::DependencyRegistry;
    use crate::core::render::{
        EngineHandle, HeadlessBackend, MountPoint, RenderHost, TickerFrame,
    };
    use crate::core::scene::{
        DirectionHandlers, FrameDriven, Scene, SceneContent, SceneDescriptor, SelfDriven,
    };

    //--- Test Fixtures ----------------------------------------------------

    /// Shared journal recording lifecycle events across scene instances.
    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        tag: &'static str,
        journal: Journal,
        fail_assets: bool,
        self_driven: bool,
        frame_driven: bool,
        directional: bool,
        states: &'static [&'static str],
    }

    impl Probe {
        fn plain(tag: &'static str, journal: &Journal) -> Self {
            Self {
                tag,
                journal: Rc::clone(journal),
                fail_assets: false,
                self_driven: false,
                frame_driven: false,
                directional: false,
                states: &["play"],
            }
        }

        fn failing(mut self) -> Self {
            self.fail_assets = true;
            self
        }

        fn self_driven(mut self) -> Self {
            self.self_driven = true;
            self
        }

        fn frame_driven(mut self) -> Self {
            self.frame_driven = true;
            self
        }

        fn directional(mut self) -> Self {
            self.directional = true;
            self
        }

        fn with_states(mut self, states: &'static [&'static str]) -> Self {
            self.states = states;
            self
        }

        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.tag, event));
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.log("drop");
        }
    }

    impl Scene for Probe {
        fn load_assets(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            self.log("load_assets");
            if self.fail_assets {
                return Err(SceneError::AssetLoad("missing spritesheet".to_owned()));
            }
            Ok(())
        }

        fn start_scene(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            self.log("start_scene");
            Ok(())
        }

        fn as_self_driven(&mut self) -> Option<&mut dyn SelfDriven> {
            self.self_driven.then_some(self as &mut dyn SelfDriven)
        }

        fn as_frame_driven(&mut self) -> Option<&mut dyn FrameDriven> {
            self.frame_driven.then_some(self as &mut dyn FrameDriven)
        }

        fn as_direction_handlers(&mut self) -> Option<&mut dyn DirectionHandlers> {
            self.directional.then_some(self as &mut dyn DirectionHandlers)
        }
    }

    impl SelfDriven for Probe {
        fn setup(&mut self, _engine: &mut EngineHandle) {
            self.log("setup");
        }
    }

    impl FrameDriven for Probe {
        fn game_loop(&mut self, _frame: &mut TickerFrame) {
            self.log("game_loop");
        }

        fn select_state(&mut self, name: &str) -> bool {
            self.states.contains(&name)
        }
    }

    impl DirectionHandlers for Probe {
        fn up(&mut self) {
            self.log("up");
        }
        fn down(&mut self) {
            self.log("down");
        }
        fn left(&mut self) {
            self.log("left");
        }
        fn right(&mut self) {
            self.log("right");
        }
    }

    fn context() -> GameContext {
        let mediator = Rc::new(RefCell::new(NavigationMediator::new()));
        GameContext {
            host: RenderHost::new(Box::new(HeadlessBackend)),
            mount: MountPoint::new(),
            input: KeyDispatcher::new(),
            metadata: MetadataStore::new(),
            providers: DependencyRegistry::new(),
            navigator: Navigator::new(mediator),
        }
    }


    fn navigator_for(descriptors: Vec<SceneDescriptor>) -> SceneNavigator {
        SceneNavigator::new(SceneRegistry::new(descriptors))
    }

    fn request(navigator: &SceneNavigator, name: &str) {
        navigator.queue.send(name.to_owned()).unwrap();
    }

    //--- Navigation Flow --------------------------------------------------

    #[test]
    fn pump_loads_the_requested_scene() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "menu",
            SceneContent::default(),
            move |_| Probe::plain("menu", &j),
        )]);
        let mut ctx = context();

        request(&navigator, "menu");
        navigator.pump(&mut ctx).unwrap();

        assert_eq!(navigator.current_scene(), Some("menu"));
        assert!(ctx.mount.is_mounted());
        assert_eq!(
            journal.borrow().as_slice(),
            ["menu:load_assets", "menu:start_scene"]
        );
    }

    #[test]
    fn unknown_scene_surfaces_scene_not_found() {
        let mut navigator = navigator_for(vec![]);
        let mut ctx = context();

        request(&navigator, "missing");
        let error = navigator.pump(&mut ctx).unwrap_err();

        assert!(matches!(
            error,
            StageError::Scene(SceneError::SceneNotFound(name)) if name == "missing"
        ));
        assert!(!ctx.mount.is_mounted());
    }

    #[test]
    fn renavigation_tears_down_before_the_next_start() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "menu",
            SceneContent::default(),
            move |_| Probe::plain("menu", &j),
        )]);
        let mut ctx = context();

        request(&navigator, "menu");
        navigator.pump(&mut ctx).unwrap();
        request(&navigator, "menu");
        navigator.pump(&mut ctx).unwrap();

        // the first instance is fully dropped before the second starts
        assert_eq!(
            journal.borrow().as_slice(),
            [
                "menu:load_assets",
                "menu:start_scene",
                "menu:drop",
                "menu:load_assets",
                "menu:start_scene",
            ]
        );
    }

    #[test]
    fn queued_requests_are_processed_in_order() {
        let journal: Journal = Rc::default();
        let ja = Rc::clone(&journal);
        let jb = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![
            SceneDescriptor::typed("a", SceneContent::default(), move |_| Probe::plain("a", &ja)),
            SceneDescriptor::typed("b", SceneContent::default(), move |_| Probe::plain("b", &jb)),
        ]);
        let mut ctx = context();

        request(&navigator, "a");
        request(&navigator, "b");
        navigator.pump(&mut ctx).unwrap();

        assert_eq!(navigator.current_scene(), Some("b"));
        assert_eq!(
            journal.borrow().as_slice(),
            [
                "a:load_assets",
                "a:start_scene",
                "a:drop",
                "b:load_assets",
                "b:start_scene",
            ]
        );
    }

    #[test]
    fn asset_failure_aborts_with_nothing_attached() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "broken",
            SceneContent::default(),
            move |_| Probe::plain("broken", &j).failing(),
        )]);
        let mut ctx = context();

        request(&navigator, "broken");
        let error = navigator.pump(&mut ctx).unwrap_err();

        assert!(matches!(error, StageError::Scene(SceneError::AssetLoad(_))));
        assert!(!ctx.mount.is_mounted());
        assert_eq!(navigator.current_scene(), None);
    }

    //--- Lifecycle Mode Selection -----------------------------------------

    #[test]
    fn self_driven_scene_gets_no_ticker_callback() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "auto",
            SceneContent::default().with_ticker(),
            move |_| Probe::plain("auto", &j).self_driven().frame_driven(),
        )]);
        let mut ctx = context();

        request(&navigator, "auto");
        navigator.pump(&mut ctx).unwrap();

        // setup ran, and ticker_on was ignored in favor of self-driving
        assert!(journal.borrow().iter().any(|event| event == "auto:setup"));
        assert_eq!(ctx.host.engine().unwrap().ticker.callback_count(), 0);
    }

    #[test]
    fn ticker_scene_gets_exactly_one_callback() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "level",
            SceneContent::default().with_ticker(),
            move |_| Probe::plain("level", &j).frame_driven(),
        )]);
        let mut ctx = context();

        request(&navigator, "level");
        navigator.pump(&mut ctx).unwrap();
        assert_eq!(ctx.host.engine().unwrap().ticker.callback_count(), 1);

        ctx.host.engine_mut().unwrap().ticker.tick(1.0 / 60.0);
        assert!(journal.borrow().iter().any(|event| event == "level:game_loop"));
    }

    #[test]
    fn explicit_game_loop_takes_precedence() {
        fn spin(scene: &mut dyn Scene, _frame: &mut TickerFrame) {
            if let Some(probe) = scene.downcast_mut::<Probe>() {
                probe.log("explicit_loop");
            }
        }

        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "level",
            SceneContent::default().with_ticker().with_game_loop(spin),
            move |_| Probe::plain("level", &j).frame_driven(),
        )]);
        let mut ctx = context();

        request(&navigator, "level");
        navigator.pump(&mut ctx).unwrap();
        ctx.host.engine_mut().unwrap().ticker.tick(1.0 / 60.0);

        let journal = journal.borrow();
        assert!(journal.iter().any(|event| event == "level:explicit_loop"));
        assert!(!journal.iter().any(|event| event == "level:game_loop"));
    }

    #[test]
    fn ticker_scene_without_game_loop_fails() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "level",
            SceneContent::default().with_ticker(),
            move |_| Probe::plain("level", &j),
        )]);
        let mut ctx = context();

        request(&navigator, "level");
        let error = navigator.pump(&mut ctx).unwrap_err();
        assert!(matches!(
            error,
            StageError::Scene(SceneError::MissingGameLoop(name)) if name == "level"
        ));
    }

    #[test]
    fn state_resolution_defaults_to_play() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "level",
            SceneContent::default().with_ticker(),
            move |_| Probe::plain("level", &j).frame_driven().with_states(&["play", "pause"]),
        )]);
        let mut ctx = context();

        request(&navigator, "level");
        navigator.pump(&mut ctx).unwrap();
        assert_eq!(navigator.current_scene(), Some("level"));
    }

    #[test]
    fn missing_state_function_fails_the_load() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "level",
            SceneContent::default().with_ticker().with_state_function("intro"),
            move |_| Probe::plain("level", &j).frame_driven().with_states(&["play"]),
        )]);
        let mut ctx = context();

        request(&navigator, "level");
        let error = navigator.pump(&mut ctx).unwrap_err();
        assert!(matches!(
            error,
            StageError::Scene(SceneError::MissingStateFunction { state, .. }) if state == "intro"
        ));
    }

    //--- Input Binding ----------------------------------------------------

    #[test]
    fn directional_scene_is_bound_to_key_dispatch() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "menu",
            SceneContent::default(),
            move |_| Probe::plain("menu", &j).directional(),
        )]);
        let mut ctx = context();

        request(&navigator, "menu");
        navigator.pump(&mut ctx).unwrap();

        assert!(ctx.input.is_bound());
        assert!(ctx.input.dispatch(crate::core::input::KeyCode::KeyW));
        assert!(journal.borrow().iter().any(|event| event == "menu:up"));
    }

    #[test]
    fn non_directional_scene_is_never_bound() {
        let journal: Journal = Rc::default();
        let j = Rc::clone(&journal);
        let mut navigator = navigator_for(vec![SceneDescriptor::typed(
            "menu",
            SceneContent::default(),
            move |_| Probe::plain("menu", &j),
        )]);
        let mut ctx = context();

        request(&navigator, "menu");
        navigator.pump(&mut ctx).unwrap();

        assert!(!ctx.input.is_bound());
        assert!(!ctx.input.dispatch(crate::core::input::KeyCode::KeyW));
    }
}
