//=========================================================================
// Render Host
//=========================================================================
//
// Owns the single live engine handle and the boundary to the external
// render engine.
//
// Architecture:
//   RenderHost
//     ├─ backend: Box<dyn RenderBackend>   (external engine adapter)
//     └─ engine:  Option<EngineHandle>     (surface + ticker)
//
// `init` is a full re-initialization, not an update: the previous handle
// is dropped before the backend produces a fresh one. A different scene
// may need different render settings, so every scene load re-inits.
//
//=========================================================================

//=== Module Declarations =================================================

mod surface;
mod ticker;

//=== Public API ==========================================================

pub use surface::{MountPoint, Surface, SURFACE_ELEMENT_ID};
pub use ticker::{Ticker, TickerFrame, STANDARD_FPS};

//=== External Crates =====================================================

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::error::RenderError;
use std::rc::Rc;

//=== RenderConfig ========================================================

/// Application / per-scene render settings.
///
/// The defaults mirror the stock boot configuration: auto-started ticker
/// and a 1024×1024 surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Whether the ticker runs without an explicit `start` call.
    pub auto_start: bool,

    /// Surface width in logical pixels.
    pub width: u32,

    /// Surface height in logical pixels.
    pub height: u32,

    /// Frame-rate cap; `0.0` means uncapped.
    pub max_fps: f32,

    /// Lower bound used to clamp runaway frame deltas.
    pub min_fps: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            width: 1024,
            height: 1024,
            max_fps: 0.0,
            min_fps: 10.0,
        }
    }
}

//=== EngineHandle ========================================================

/// The current application/render instance: a mountable surface plus the
/// frame ticker.
pub struct EngineHandle {
    /// Render-output element, shared with the mount point while attached.
    pub surface: Rc<Surface>,

    /// Per-frame callback dispatcher.
    pub ticker: Ticker,
}

impl EngineHandle {
    /// Builds a handle for `config` with a fresh surface and ticker.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            surface: Rc::new(Surface::new(config)),
            ticker: Ticker::new(config.max_fps, config.min_fps, config.auto_start),
        }
    }
}

//=== RenderBackend =======================================================

/// Boundary to the external render engine.
///
/// Backends produce a complete [`EngineHandle`] per initialization. The
/// windowing shell supplies one backed by the OS window; [`HeadlessBackend`]
/// serves tests and embedding.
pub trait RenderBackend {
    fn init(&mut self, config: &RenderConfig) -> Result<EngineHandle, RenderError>;
}

/// Backend with no output device. Produces plain handles.
pub struct HeadlessBackend;

impl RenderBackend for HeadlessBackend {
    fn init(&mut self, config: &RenderConfig) -> Result<EngineHandle, RenderError> {
        Ok(EngineHandle::new(config))
    }
}

//=== RenderHost ==========================================================

/// Owner of the single live engine handle.
pub struct RenderHost {
    backend: Box<dyn RenderBackend>,
    engine: Option<EngineHandle>,
}

impl RenderHost {
    /// Creates a host with no live handle yet.
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self { backend, engine: None }
    }

    //--- Initialization ---------------------------------------------------

    /// Replaces the live handle with a fresh one built for `config`.
    ///
    /// The previous handle — surface, ticker and all registered callbacks
    /// — is dropped before the backend runs.
    pub fn init(&mut self, config: &RenderConfig) -> Result<(), RenderError> {
        self.engine = None;
        debug!(target: "render", "initializing {}x{} surface", config.width, config.height);
        self.engine = Some(self.backend.init(config)?);
        Ok(())
    }

    //--- Access -----------------------------------------------------------

    /// The current handle.
    ///
    /// # Errors
    ///
    /// [`RenderError::NotInitialized`] before the first successful `init`.
    pub fn engine(&self) -> Result<&EngineHandle, RenderError> {
        self.engine.as_ref().ok_or(RenderError::NotInitialized)
    }

    /// Mutable access to the current handle.
    pub fn engine_mut(&mut self) -> Result<&mut EngineHandle, RenderError> {
        self.engine.as_mut().ok_or(RenderError::NotInitialized)
    }

    /// Returns true once `init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_boot_defaults() {
        let config = RenderConfig::default();
        assert!(config.auto_start);
        assert_eq!((config.width, config.height), (1024, 1024));
    }

    #[test]
    fn config_deserializes_with_partial_fields() {
        let config: RenderConfig = serde_json::from_str(r#"{"width": 640, "height": 480}"#).unwrap();
        assert_eq!((config.width, config.height), (640, 480));
        assert!(config.auto_start);
    }

    #[test]
    fn host_rejects_access_before_init() {
        let host = RenderHost::new(Box::new(HeadlessBackend));
        assert!(matches!(host.engine(), Err(RenderError::NotInitialized)));
    }

    #[test]
    fn init_replaces_the_previous_handle() {
        let mut host = RenderHost::new(Box::new(HeadlessBackend));
        host.init(&RenderConfig::default()).unwrap();
        host.engine_mut().unwrap().ticker.add(|_| {});
        assert_eq!(host.engine().unwrap().ticker.callback_count(), 1);

        // a full re-init drops the ticker along with its callbacks
        host.init(&RenderConfig { width: 640, ..RenderConfig::default() }).unwrap();
        assert_eq!(host.engine().unwrap().ticker.callback_count(), 0);
        assert_eq!(host.engine().unwrap().surface.width(), 640);
    }
}
