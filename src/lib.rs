//=========================================================================
// Stagecraft — Library Root
//
// This crate defines the public API surface of Stagecraft, a scene
// lifecycle scaffolding layer for 2D render engines.
//
// Responsibilities:
// - Expose the core scaffolding interface (`Game`, scene traits, content
//   structs, mediator, registries)
// - Keep the windowing shell (`platform`) hidden from end users
// - Provide clean separation between the high-level game facade and the
//   render-engine boundary (`RenderBackend`)
//
// Typical usage:
// ```no_run
// use stagecraft::prelude::*;
//
// # fn module() -> ModuleContent { unimplemented!() }
// fn main() {
//     Game::run(module()).unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all scaffolding systems and logic (scenes, navigation,
// render host boundary, input dispatch, manifests). It is exposed publicly
// for engine-level extensibility, but normal application code will mostly
// use the top-level `Game` facade through the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration, event
// loop) and is kept private, as it is not part of the public API surface.
//
// `engine` defines the `Game` facade and the module bootstrapper.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the `Game` struct as the main entry point for applications.
// This allows users to simply `use stagecraft::Game;` without having to
// know the internal module structure.
//
pub use engine::{Game, GameModule};
