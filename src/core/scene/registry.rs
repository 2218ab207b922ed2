//=========================================================================
// Scene Registry
//=========================================================================
//
// Ordered, immutable mapping from scene names to descriptors.
//
// Constructed once from the module's scene map; there is no later
// mutation API. Lookup scans in registration order, so duplicate names
// resolve to the first registration (warned about at construction).
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::super::error::SceneError;
use super::content::SceneDescriptor;

//=== SceneRegistry =======================================================

/// Name → descriptor lookup over the module's scene map.
pub struct SceneRegistry {
    descriptors: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    /// Builds the registry from the full descriptor sequence.
    pub fn new(descriptors: Vec<SceneDescriptor>) -> Self {
        for (index, descriptor) in descriptors.iter().enumerate() {
            let duplicate = descriptors[..index]
                .iter()
                .any(|earlier| earlier.scene_name == descriptor.scene_name);
            if duplicate {
                warn!(
                    target: "scene",
                    "duplicate scene name '{}'; the first registration wins",
                    descriptor.scene_name
                );
            }
        }
        Self { descriptors }
    }

    /// Resolves a scene name to its descriptor.
    ///
    /// # Errors
    ///
    /// [`SceneError::SceneNotFound`] when no descriptor matches `name`.
    pub fn lookup(&self, name: &str) -> Result<&SceneDescriptor, SceneError> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.scene_name == name)
            .ok_or_else(|| SceneError::SceneNotFound(name.to_owned()))
    }

    /// Number of registered descriptors (duplicates included).
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true when no scenes are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SceneError;
    use crate::core::render::EngineHandle;
    use crate::core::scene::{Scene, SceneContent};

    struct Stub(&'static str);

    impl Scene for Stub {
        fn load_assets(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
        fn start_scene(&mut self, _engine: &mut EngineHandle) -> Result<(), SceneError> {
            Ok(())
        }
    }

    fn descriptor(name: &'static str, tag: &'static str) -> SceneDescriptor {
        let mut content = SceneContent::default();
        content.render.width = tag.len() as u32;
        SceneDescriptor::typed(name, content, move |_| Stub(tag))
    }

    #[test]
    fn lookup_returns_the_matching_descriptor() {
        let registry = SceneRegistry::new(vec![
            descriptor("menu", "m"),
            descriptor("game", "gg"),
        ]);

        assert_eq!(registry.lookup("game").unwrap().scene_name, "game");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn missing_name_is_a_scene_not_found_error() {
        let registry = SceneRegistry::new(vec![descriptor("menu", "m")]);
        let error = registry.lookup("missing").unwrap_err();
        assert!(matches!(error, SceneError::SceneNotFound(name) if name == "missing"));
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_registration() {
        let registry = SceneRegistry::new(vec![
            descriptor("menu", "first"),
            descriptor("menu", "second-entry"),
        ]);

        // width encodes which registration we got back
        assert_eq!(registry.lookup("menu").unwrap().content.render.width, 5);
    }
}
