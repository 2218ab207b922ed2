//=========================================================================
// Fade Animation
//=========================================================================
//
// Ticker-driven fade-to-black runner.
//
// Two modes:
// - `run_fps`: temporarily lowers the ticker's frame-rate cap to the
//   requested rate, derives the frame budget from that rate, and
//   restores the previous cap when the budget is spent
// - `run_timed`: plain frame budget at the current rate
//
// The callback detaches itself on completion and fires the completion
// hook exactly once. Drawing the fade overlay is the render engine's
// business; this module only owns the timing.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::render::EngineHandle;

//=== FadeAnimation =======================================================

/// Fade runner registered on the current engine handle's ticker.
pub struct FadeAnimation;

impl FadeAnimation {
    /// Runs the fade at a reduced frame rate.
    ///
    /// `fps <= 0.0` falls back to the ticker's current cap. The previous
    /// cap is restored when the fade completes.
    pub fn run_fps(engine: &mut EngineHandle, fps: f32, on_complete: impl FnOnce() + 'static) {
        let system_fps = engine.ticker.max_fps;
        let fps = if fps > 0.0 { fps } else { system_fps };

        // frame budget scaled so the fade covers the same wall-clock
        // span regardless of the requested rate
        let proc = 24.0 / 100.0 * fps;
        let res = 60.0 - (fps - 60.0);
        let koef = (fps - res) / 60.0;
        let limit = res + proc * koef;

        engine.ticker.max_fps = fps;
        Self::run(engine, limit, system_fps, on_complete);
    }

    /// Runs the fade over `limit_frames` 60-fps frame units at the
    /// current rate.
    pub fn run_timed(
        engine: &mut EngineHandle,
        limit_frames: f32,
        on_complete: impl FnOnce() + 'static,
    ) {
        let system_fps = engine.ticker.max_fps;
        Self::run(engine, limit_frames, system_fps, on_complete);
    }

    fn run(
        engine: &mut EngineHandle,
        limit: f32,
        restore_fps: f32,
        on_complete: impl FnOnce() + 'static,
    ) {
        debug!(target: "animation", "fade started, budget {:.1} frames", limit);
        let mut elapsed = 0.0_f32;
        let mut on_complete = Some(on_complete);

        engine.ticker.add(move |frame| {
            elapsed += frame.delta_frames;
            if elapsed > limit {
                frame.set_max_fps(restore_fps);
                frame.detach();
                if let Some(complete) = on_complete.take() {
                    complete();
                }
            }
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
