//=========================================================================
// Metadata Store
//=========================================================================
//
// Declarative configuration attachment, re-architected from dynamic
// property injection into an explicit, type-keyed store.
//
// Architecture:
//   scene types   → HashMap<TypeId, SceneContent>   (one blob per type)
//   module types  → HashMap<TypeId, ModuleRecord>   (one blob per type)
//   instance data → HashMap<String, Box<dyn Any>>   (write-once values)
//
// All blobs are immutable once attached: re-attachment is rejected, not
// overwritten. Write-once keyed values back the "scene property" capture
// of the sprite manifest mapper.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;

//=== External Crates =====================================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::render::RenderConfig;
use super::scene::{Scene, SceneContent};

//=== ModuleRecord ========================================================

/// Declarative part of a booted module, kept for introspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
    pub start_scene: String,
    pub app_configuration: RenderConfig,
}

//=== MetadataStore =======================================================

/// Type-keyed store for declarative scene and module configuration plus
/// write-once instance values.
pub struct MetadataStore {
    scene_content: HashMap<TypeId, SceneContent>,
    module_records: HashMap<TypeId, ModuleRecord>,
    blocked: HashMap<String, Box<dyn Any>>,
}

impl MetadataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            scene_content: HashMap::new(),
            module_records: HashMap::new(),
            blocked: HashMap::new(),
        }
    }

    //--- Scene Content ----------------------------------------------------

    /// Attaches the content blob for scene type `S`.
    ///
    /// Returns `false` (and leaves the original in place) when `S` already
    /// has content attached.
    pub fn attach_scene_content<S: Scene>(&mut self, content: SceneContent) -> bool {
        self.attach_scene_content_by_key(TypeId::of::<S>(), content)
    }

    pub(crate) fn attach_scene_content_by_key(
        &mut self,
        key: TypeId,
        content: SceneContent,
    ) -> bool {
        if self.scene_content.contains_key(&key) {
            warn!(target: "metadata", "scene content already attached for {:?}", key);
            return false;
        }
        self.scene_content.insert(key, content);
        true
    }

    /// Returns the content attached for scene type `S`, if any.
    pub fn scene_content<S: Scene>(&self) -> Option<&SceneContent> {
        self.scene_content.get(&TypeId::of::<S>())
    }

    //--- Module Records ---------------------------------------------------

    /// Attaches the module record for module type `M`.
    ///
    /// Returns `false` when `M` already has a record attached.
    pub fn attach_module_record<M: 'static>(&mut self, record: ModuleRecord) -> bool {
        let key = TypeId::of::<M>();
        if self.module_records.contains_key(&key) {
            warn!(target: "metadata", "module record already attached for {:?}", key);
            return false;
        }
        self.module_records.insert(key, record);
        true
    }

    /// Returns the record attached for module type `M`, if any.
    pub fn module_record<M: 'static>(&self) -> Option<&ModuleRecord> {
        self.module_records.get(&TypeId::of::<M>())
    }

    //--- Write-Once Keyed Values ------------------------------------------

    /// Stores a keyed value that cannot be overwritten.
    ///
    /// Returns `false` when the key is already occupied.
    pub fn set_blocked(&mut self, key: impl Into<String>, value: impl Any) -> bool {
        let key = key.into();
        if self.blocked.contains_key(&key) {
            warn!(target: "metadata", "blocked value '{}' already set", key);
            return false;
        }
        self.blocked.insert(key, Box::new(value));
        true
    }

    /// Reads a keyed value back at its concrete type.
    ///
    /// Returns `None` when the key is absent or holds a different type.
    pub fn blocked<T: Any>(&self, key: &str) -> Option<&T> {
        self.blocked.get(key).and_then(|value| value.downcast_ref())
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
