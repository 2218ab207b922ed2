//=========================================================================
// Platform Shell
//=========================================================================
//
// Bridges Winit (OS window + event loop) with the game facade.
//
// Architecture:
// ```text
//  Winit Event Loop
//    ├─ resumed          → create window, boot the module
//    ├─ KeyboardInput    → convert → Game::key_down
//    └─ RedrawRequested  → frame pacing → Game::frame(delta)
// ```
//
// Key design decisions:
// - **Lazy boot**: the window exists only inside `resumed`, so the
//   module is booted there, against a `WindowBackend` wrapping the
//   freshly created window
// - **RedrawRequested = frame boundary**: one `Game::frame` per redraw,
//   throttled by the current ticker's frame-rate cap
// - **Frame errors are logged, not fatal**: a failed navigation leaves
//   the previous teardown state visible; the shell keeps running so the
//   window stays responsive
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so `run` blocks the thread that called it
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;
use std::time::Instant;

//=== External Crates =====================================================

use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

//=== Internal Dependencies ===============================================

use crate::core::error::{RenderError, StageResult};
use crate::core::input::KeyCode;
use crate::core::render::{EngineHandle, RenderBackend, RenderConfig};
use crate::core::scene::ModuleContent;
use crate::engine::Game;

//=== Entry Point =========================================================

/// Boots `module` in a window and runs the event loop until close.
pub(crate) fn run(module: ModuleContent) -> StageResult<()> {
    debug!(target: "platform", "starting Winit event loop");

    let event_loop = EventLoop::new()
        .map_err(|e| RenderError::EventLoop(e.to_string()))?;

    let mut shell = Shell::new(module);
    event_loop
        .run_app(&mut shell)
        .map_err(|e| RenderError::EventLoop(e.to_string()))?;
    Ok(())
}

//=== WindowBackend =======================================================

/// Render backend bound to the single OS window.
///
/// A re-init resizes the window to the scene's configuration and hands
/// out a fresh engine handle; the window itself persists across scenes.
struct WindowBackend {
    window: Arc<Window>,
}

impl WindowBackend {
    fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl RenderBackend for WindowBackend {
    fn init(&mut self, config: &RenderConfig) -> Result<EngineHandle, RenderError> {
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(config.width, config.height));
        Ok(EngineHandle::new(config))
    }
}

//=== Shell ===============================================================

/// Window manager driving one `Game`.
struct Shell {
    /// Module declaration, consumed by the boot in `resumed`.
    module: Option<ModuleContent>,

    /// The running game (None until boot succeeds).
    game: Option<Game>,

    /// OS window handle (None until `resumed` is called).
    window: Option<Arc<Window>>,

    /// Previous frame timestamp for delta computation.
    last_frame: Instant,
}

impl Shell {
    fn new(module: ModuleContent) -> Self {
        Self {
            module: Some(module),
            game: None,
            window: None,
            last_frame: Instant::now(),
        }
    }

    //--- Frame Driving ----------------------------------------------------

    /// Runs one frame, honoring the current ticker's frame-rate cap.
    fn drive_frame(&mut self) {
        let Some(game) = &mut self.game else {
            return;
        };

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();

        let cap = game
            .context()
            .host
            .engine()
            .map(|engine| engine.ticker.max_fps)
            .unwrap_or(0.0);
        if cap > 0.0 && delta < 1.0 / cap {
            return;
        }

        self.last_frame = now;
        if let Err(frame_error) = game.frame(delta) {
            error!(target: "platform", "frame failed: {}", frame_error);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Shell {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window and boots the module on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "window already exists (mobile resume?)");
            return;
        }
        let Some(module) = self.module.take() else {
            return;
        };

        let config = module.app_configuration;
        let attrs = WindowAttributes::default()
            .with_title("stagecraft")
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(window_error) => {
                error!(target: "platform", "window creation failed: {}", window_error);
                event_loop.exit();
                return;
            }
        };

        info!(
            target: "platform",
            "window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );
        window.request_redraw();

        let backend = WindowBackend::new(Arc::clone(&window));
        self.window = Some(window);

        match Game::boot(module, Box::new(backend)) {
            Ok(game) => {
                self.game = Some(game);
                self.last_frame = Instant::now();
            }
            Err(boot_error) => {
                error!(target: "platform", "module boot failed: {}", boot_error);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state != ElementState::Pressed || key_event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return;
                };
                if let Some(key) = convert_key(code) {
                    if let Some(game) = &mut self.game {
                        game.key_down(key);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.drive_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // ignore: Resized, Focused, etc.
            }
        }
    }
}

//=== Winit Conversions ===================================================

/// Converts a Winit key code into the scaffolding's key set.
///
/// Keys outside the routed set are filtered (returns None).
fn convert_key(code: WinitKeyCode) -> Option<KeyCode> {
    match code {
        WinitKeyCode::KeyW => Some(KeyCode::KeyW),
        WinitKeyCode::KeyA => Some(KeyCode::KeyA),
        WinitKeyCode::KeyS => Some(KeyCode::KeyS),
        WinitKeyCode::KeyD => Some(KeyCode::KeyD),
        WinitKeyCode::ArrowUp => Some(KeyCode::ArrowUp),
        WinitKeyCode::ArrowDown => Some(KeyCode::ArrowDown),
        WinitKeyCode::ArrowLeft => Some(KeyCode::ArrowLeft),
        WinitKeyCode::ArrowRight => Some(KeyCode::ArrowRight),
        WinitKeyCode::Space => Some(KeyCode::Space),
        WinitKeyCode::Enter => Some(KeyCode::Enter),
        WinitKeyCode::Escape => Some(KeyCode::Escape),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
