//=========================================================================
// Core Scaffolding Systems
//
// Central home for everything that wires scenes to an application and
// render-loop lifecycle.
//
// Responsibilities:
// - Scene lifecycle (registry, loader, navigation queue)
// - Navigation mediator and the shared `Navigator` handle
// - Render host boundary (`RenderBackend`, surface, ticker, mount point)
// - Declarative metadata, dependency registry, sprite manifests
// - Keyboard dispatch for the current scene
//
// Notes:
// All systems here are single-threaded and cooperative. Suspension points
// of the lifecycle are ordinary fallible calls; the navigation queue is
// the only buffering between them. Shared state is passed explicitly via
// `GameContext` — there are no module-level globals.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod context;
pub mod error;
pub mod input;
pub mod manifest;
pub mod mediator;
pub mod metadata;
pub mod registry;
pub mod render;
pub mod scene;

//=== Public API ==========================================================

pub use context::GameContext;
pub use error::{ManifestError, RenderError, SceneError, StageError, StageResult};
