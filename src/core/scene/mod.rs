//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and name-keyed navigation.
//
// Architecture:
//   SceneNavigator
//     ├─ registry: SceneRegistry (ordered descriptors, lookup by name)
//     ├─ loader:   SceneLoader   (Current Scene Handle owner)
//     └─ requests: channel drained between frames
//
// Flow:
//   Navigator::navigate(name) → mediator → queue → pump()
//     → teardown → lookup → load
//
// Scene instances are mutually exclusive in time: the loader destroys the
// current handle before creating the next one, and the navigation queue
// serializes overlapping requests.
//
//=========================================================================

//=== Module Declarations =================================================

mod content;
mod loader;
mod navigator;
mod registry;

//=== Public API ==========================================================

pub use content::{
    GameLoopFn, ModuleContent, SceneContent, SceneDescriptor, SceneServices,
};
pub use loader::SceneLoader;
pub use navigator::SceneNavigator;
pub use registry::SceneRegistry;

//=== Internal Dependencies ===============================================

use std::any::Any;

use super::error::SceneError;
use super::render::{EngineHandle, TickerFrame};

//=== Scene Trait =========================================================

/// Name of the behavior state selected when a scene's content does not
/// declare one.
pub const DEFAULT_STATE_FUNCTION: &str = "play";

/// A self-contained visual/interactive unit with its own asset set and
/// lifecycle.
///
/// Scenes are instantiated by the lifecycle loader through their
/// descriptor's factory on every navigation, and dropped before the next
/// scene is created.
///
/// # Required lifecycle
///
/// `load_assets` runs to completion before the surface is attached; the
/// scene is never shown partially loaded. `start_scene` then builds the
/// scene's initial visual tree.
///
/// # Optional capabilities
///
/// Capabilities are discovered through the `as_*` accessors, which return
/// `None` by default. Override the accessor to return `Some(self)`:
///
/// ```
/// use stagecraft::prelude::*;
///
/// struct Level;
///
/// impl Scene for Level {
///     fn load_assets(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
///         Ok(())
///     }
///     fn start_scene(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
///         Ok(())
///     }
///     fn as_frame_driven(&mut self) -> Option<&mut dyn FrameDriven> {
///         Some(self)
///     }
/// }
///
/// impl FrameDriven for Level {
///     fn game_loop(&mut self, _frame: &mut TickerFrame) {}
/// }
/// ```
pub trait Scene: Any {
    /// Loads the scene's assets. Must complete before the scene is shown;
    /// an error aborts the navigation with nothing attached.
    fn load_assets(&mut self, engine: &mut EngineHandle) -> Result<(), SceneError>;

    /// Scene-defined setup, e.g. constructing its initial visual tree.
    fn start_scene(&mut self, engine: &mut EngineHandle) -> Result<(), SceneError>;

    /// Scenes that drive themselves via engine callbacks they register
    /// internally expose this capability.
    fn as_self_driven(&mut self) -> Option<&mut dyn SelfDriven> {
        None
    }

    /// Scenes driven by the frame ticker expose this capability.
    fn as_frame_driven(&mut self) -> Option<&mut dyn FrameDriven> {
        None
    }

    /// Scenes handling four-direction keyboard input expose this
    /// capability. Partial handler sets are unrepresentable.
    fn as_direction_handlers(&mut self) -> Option<&mut dyn DirectionHandlers> {
        None
    }
}

impl dyn Scene {
    /// Downcasts the scene to its concrete type.
    ///
    /// Useful inside an explicit [`GameLoopFn`] that needs concrete
    /// access to the scene it drives.
    pub fn downcast_mut<T: Scene>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }
}

//=== Capability Traits ===================================================

/// One-shot setup for scenes that install their own engine callbacks.
///
/// When present, the loader calls `setup` exactly once and performs no
/// ticker wiring — even if the scene content declares `ticker_on`.
pub trait SelfDriven {
    fn setup(&mut self, engine: &mut EngineHandle);
}

/// Per-frame behavior for ticker-driven scenes.
pub trait FrameDriven {
    /// Called once per frame while the scene is current.
    fn game_loop(&mut self, frame: &mut TickerFrame);

    /// Selects the named behavior state, chosen once at load time.
    ///
    /// Returns false when the scene has no state under that name. The
    /// default implementation accepts exactly the default state,
    /// [`DEFAULT_STATE_FUNCTION`].
    fn select_state(&mut self, name: &str) -> bool {
        name == DEFAULT_STATE_FUNCTION
    }
}

/// Four-direction keyboard handlers.
pub trait DirectionHandlers {
    fn up(&mut self);
    fn down(&mut self);
    fn left(&mut self);
    fn right(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Scene for Plain {
        fn load_assets(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
        fn start_scene(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
    }

    struct Looping {
        frames: u32,
    }

    impl Scene for Looping {
        fn load_assets(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
        fn start_scene(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
        fn as_frame_driven(&mut self) -> Option<&mut dyn FrameDriven> {
            Some(self)
        }
    }

    impl FrameDriven for Looping {
        fn game_loop(&mut self, _frame: &mut TickerFrame) {
            self.frames += 1;
        }
    }

    #[test]
    fn capabilities_default_to_absent() {
        let mut scene = Plain;
        assert!(scene.as_self_driven().is_none());
        assert!(scene.as_frame_driven().is_none());
        assert!(scene.as_direction_handlers().is_none());
    }

    #[test]
    fn select_state_defaults_to_play_only() {
        let mut scene = Looping { frames: 0 };
        let driver = scene.as_frame_driven().unwrap();
        assert!(driver.select_state(DEFAULT_STATE_FUNCTION));
        assert!(!driver.select_state("pause"));
    }

    #[test]
    fn dyn_scene_downcasts_to_its_concrete_type() {
        let mut boxed: Box<dyn Scene> = Box::new(Looping { frames: 3 });
        let concrete = boxed.downcast_mut::<Looping>().unwrap();
        assert_eq!(concrete.frames, 3);
        assert!(boxed.downcast_mut::<Plain>().is_none());
    }
}
