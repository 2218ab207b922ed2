//=========================================================================
// Input Dispatch
//=========================================================================
//
// Keyboard routing for the current scene.
//
// Architecture:
//   platform key event → KeyCode → DirectionBindings → Direction
//                                        ↓
//                          DirectionHandlers of the bound scene
//
// Each logical direction is bound to two physical keys (WASD plus the
// arrow cluster). The table is configuration, not user-exposed. The
// dispatcher holds at most one bound scene; the lifecycle loader binds
// on load and clears on teardown.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::error::SceneError;
use super::scene::Scene;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Only the keys the scaffolding routes are represented; platform layers
/// filter everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Enter,
    Escape,
}

//=== Direction ===========================================================

/// Logical movement direction routed to scene handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

//=== DirectionBindings ===================================================

/// Direction → physical keys table.
pub struct DirectionBindings {
    bindings: [(Direction, [KeyCode; 2]); 4],
}

impl Default for DirectionBindings {
    fn default() -> Self {
        Self {
            bindings: [
                (Direction::Up, [KeyCode::KeyW, KeyCode::ArrowUp]), // key codes 87, 38
                (Direction::Down, [KeyCode::KeyS, KeyCode::ArrowDown]), // 83, 40
                (Direction::Left, [KeyCode::KeyA, KeyCode::ArrowLeft]), // 65, 37
                (Direction::Right, [KeyCode::KeyD, KeyCode::ArrowRight]), // 68, 39
            ],
        }
    }
}

impl DirectionBindings {
    /// Maps a key to its logical direction, if bound.
    pub fn resolve(&self, key: KeyCode) -> Option<Direction> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.contains(&key))
            .map(|(direction, _)| *direction)
    }
}

//=== KeyDispatcher =======================================================

/// Routes key-down events to the bound scene's direction handlers.
pub struct KeyDispatcher {
    bindings: DirectionBindings,
    target: Option<Rc<RefCell<Box<dyn Scene>>>>,
}

impl KeyDispatcher {
    /// Creates a dispatcher with the stock binding table and no scene.
    pub fn new() -> Self {
        Self {
            bindings: DirectionBindings::default(),
            target: None,
        }
    }

    //--- Binding ----------------------------------------------------------

    /// Binds a scene exposing the full directional capability.
    ///
    /// # Errors
    ///
    /// [`SceneError::MissingDirectionHandlers`] when the scene does not
    /// expose all four handlers; the dispatcher stays unbound.
    pub(crate) fn bind(
        &mut self,
        scene: &Rc<RefCell<Box<dyn Scene>>>,
        scene_name: &str,
    ) -> Result<(), SceneError> {
        if scene.borrow_mut().as_direction_handlers().is_none() {
            return Err(SceneError::MissingDirectionHandlers(scene_name.to_owned()));
        }
        self.target = Some(Rc::clone(scene));
        Ok(())
    }

    /// Unbinds the current scene, if any.
    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Returns true while a scene is bound.
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes one key-down event.
    ///
    /// Returns true when a bound scene handler ran.
    pub fn dispatch(&mut self, key: KeyCode) -> bool {
        let Some(target) = &self.target else {
            return false;
        };
        let Some(direction) = self.bindings.resolve(key) else {
            trace!(target: "input", "unbound key {:?}", key);
            return false;
        };

        let mut scene = target.borrow_mut();
        let Some(handlers) = scene.as_direction_handlers() else {
            return false;
        };
        match direction {
            Direction::Up => handlers.up(),
            Direction::Down => handlers.down(),
            Direction::Left => handlers.left(),
            Direction::Right => handlers.right(),
        }
        true
    }
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
