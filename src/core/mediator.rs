//=========================================================================
// Navigation Mediator
//=========================================================================
//
// Publish/subscribe channel carrying "navigate to scene X" events.
//
// Architecture:
//   Navigator (shared handle) → NavigationMediator::update(name)
//                                     ↓ synchronous, registration order
//                               registered listeners
//
// The mediator retains only the identity of currently registered
// listeners — it is not a durable log. A listener registered after an
// `update` call does not see that event. Re-entrant dispatch through the
// shared `Navigator` handle fails fast instead of interleaving.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Crates =====================================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::error::{StageError, StageResult};

//=== NavigationMediator ==================================================

/// Single dispatch channel for scene navigation events.
///
/// Listeners receive every event emitted after their registration, in
/// registration order, synchronously within the `update` call. There is
/// no buffering beyond immediate dispatch.
pub struct NavigationMediator {
    listeners: Vec<Box<dyn FnMut(&str)>>,
}

impl NavigationMediator {
    /// Creates a mediator with no listeners.
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Adds a listener that receives every subsequent navigation name.
    pub fn register(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Notifies all currently registered listeners with `scene_name`.
    pub fn update(&mut self, scene_name: &str) {
        trace!(target: "mediator", "dispatching navigation to '{}'", scene_name);
        for listener in &mut self.listeners {
            listener(scene_name);
        }
    }
}

impl Default for NavigationMediator {
    fn default() -> Self {
        Self::new()
    }
}

//=== Navigator ===========================================================

/// Cloneable handle for emitting navigation events.
///
/// Scenes and application code request transitions through this handle
/// rather than touching the mediator directly. Dispatch is synchronous;
/// emitting while a dispatch is already in progress is disallowed and
/// fails fast with [`StageError::ReentrantDispatch`].
#[derive(Clone)]
pub struct Navigator {
    mediator: Rc<RefCell<NavigationMediator>>,
}

impl Navigator {
    pub(crate) fn new(mediator: Rc<RefCell<NavigationMediator>>) -> Self {
        Self { mediator }
    }

    /// Emits one navigation event for `scene_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::ReentrantDispatch`] when called from within
    /// a listener of the same mediator.
    pub fn navigate(&self, scene_name: &str) -> StageResult<()> {
        let Ok(mut mediator) = self.mediator.try_borrow_mut() else {
            return Err(StageError::ReentrantDispatch);
        };
        mediator.update(scene_name);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_receive_events_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut mediator = NavigationMediator::new();

        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            mediator.register(move |name| seen.borrow_mut().push(format!("{tag}:{name}")));
        }

        mediator.update("menu");

        assert_eq!(
            seen.borrow().as_slice(),
            ["first:menu", "second:menu", "third:menu"]
        );
    }

    #[test]
    fn late_listener_does_not_see_earlier_events() {
        let count = Rc::new(RefCell::new(0));
        let mut mediator = NavigationMediator::new();

        mediator.update("menu");

        let counter = Rc::clone(&count);
        mediator.register(move |_| *counter.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 0);

        mediator.update("menu");
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn navigator_dispatches_through_the_mediator() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mediator = Rc::new(RefCell::new(NavigationMediator::new()));

        let sink = Rc::clone(&seen);
        mediator
            .borrow_mut()
            .register(move |name| sink.borrow_mut().push(name.to_owned()));

        let navigator = Navigator::new(Rc::clone(&mediator));
        navigator.navigate("level-1").unwrap();

        assert_eq!(seen.borrow().as_slice(), ["level-1"]);
    }

    #[test]
    fn reentrant_dispatch_fails_fast() {
        let mediator = Rc::new(RefCell::new(NavigationMediator::new()));
        let navigator = Navigator::new(Rc::clone(&mediator));

        let reentrant = navigator.clone();
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        mediator.borrow_mut().register(move |_| {
            *sink.borrow_mut() = Some(reentrant.navigate("again"));
        });

        navigator.navigate("menu").unwrap();

        let inner = result.borrow_mut().take().unwrap();
        assert!(matches!(inner, Err(StageError::ReentrantDispatch)));
    }
}
