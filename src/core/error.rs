//=========================================================================
// Error Taxonomy
//=========================================================================
//
// Layered error enums for the scaffolding core.
//
// SceneError  — scene resolution and lifecycle failures (fatal to one
//               navigation attempt)
// RenderError — render host / backend failures
// ManifestError — sprite manifest mapping failures
// StageError  — crate-level union, returned by the `Game` facade
//
// Critical-path errors are never swallowed: they abort the navigation
// attempt and surface to the caller. Only input binding degrades
// gracefully (logged by the loader, not represented here beyond its
// variant).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Scene resolution and lifecycle failures.
///
/// Every variant is fatal to the navigation attempt that produced it,
/// except `MissingDirectionHandlers`, which the loader catches and logs.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Navigation requested a name absent from the scene registry.
    #[error("cannot find scene '{0}'")]
    SceneNotFound(String),

    /// The scene declares `ticker_on` but exposes neither an explicit
    /// game-loop function nor the `FrameDriven` capability.
    #[error("scene '{0}' enables the ticker but provides no game loop")]
    MissingGameLoop(String),

    /// The configured behavior state could not be selected on the scene.
    #[error("scene '{scene}' has no state function '{state}'")]
    MissingStateFunction { scene: String, state: String },

    /// The scene's own asset loading step failed. Nothing was attached.
    #[error("asset loading failed: {0}")]
    AssetLoad(String),

    /// The scene's own start step failed.
    #[error("scene start failed: {0}")]
    StartScene(String),

    /// Bound as directional input without the full four-handler
    /// capability. Caught by the loader; never escapes `load`.
    #[error("scene '{0}' does not implement the four direction handlers")]
    MissingDirectionHandlers(String),
}

//=== RenderError =========================================================

/// Render host and backend failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backend could not produce an engine handle.
    #[error("render backend initialization failed: {0}")]
    Init(String),

    /// The host was queried before any successful `init`.
    #[error("render host has not been initialized")]
    NotInitialized,

    /// The platform event loop could not be created or run.
    #[error("event loop failed: {0}")]
    EventLoop(String),
}

//=== ManifestError =======================================================

/// Sprite manifest mapping failures.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A manifest entry names a frame absent from its spritesheet.
    #[error("manifest entry '{entry}' references unknown frame '{frame}'")]
    UnknownFrame { entry: String, frame: String },

    /// The manifest document could not be deserialized.
    #[error("manifest parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

//=== StageError ==========================================================

/// Crate-level error union.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A navigation event was emitted while another dispatch was already
    /// in progress. Re-entrant dispatch is disallowed; callers receive
    /// this instead of an interleaved load.
    #[error("navigation dispatch re-entered")]
    ReentrantDispatch,
}

/// Result alias used across the crate.
pub type StageResult<T> = Result<T, StageError>;

//=========================================================================
// Unit Tests
//=========================================================================
