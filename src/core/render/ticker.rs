//=========================================================================
// Frame Ticker
//=========================================================================
//
// Per-frame callback dispatcher with frame-rate control fields.
//
// Flow per frame:
//   tick(delta) → clamp by min_fps → run callbacks in registration order
//               → drop detached callbacks → apply staged fps changes
//
// Callbacks receive a `TickerFrame` view: timing values plus staged
// controls (detach, max/min fps). Staged fps changes take effect after
// the callback pass, so a single frame observes one consistent rate.
// Callbacks must not block — the ticker runs on the same logical thread
// as all other application code.
//
//=========================================================================

//=== TickerFrame =========================================================

/// Reference frame rate: one `delta_frames` unit per frame at 60 fps.
pub const STANDARD_FPS: f32 = 60.0;

/// Per-frame view handed to ticker callbacks.
pub struct TickerFrame {
    /// Seconds elapsed since the previous tick, clamped by `min_fps`.
    pub delta_seconds: f32,

    /// Elapsed time scaled to 60 fps frame units.
    pub delta_frames: f32,

    staged_max_fps: Option<f32>,
    staged_min_fps: Option<f32>,
    detached: bool,
}

impl TickerFrame {
    /// Stages a new frame-rate cap, applied after this callback pass.
    pub fn set_max_fps(&mut self, fps: f32) {
        self.staged_max_fps = Some(fps);
    }

    /// Stages a new delta clamp floor, applied after this callback pass.
    pub fn set_min_fps(&mut self, fps: f32) {
        self.staged_min_fps = Some(fps);
    }

    /// Removes the calling callback after this frame.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}

//=== Ticker ==============================================================

type TickerCallback = Box<dyn FnMut(&mut TickerFrame)>;

/// Per-frame callback dispatcher.
pub struct Ticker {
    callbacks: Vec<TickerCallback>,

    /// Frame-rate cap; `0.0` means uncapped. Advisory for the driving
    /// shell, binding for `TickerFrame` staging.
    pub max_fps: f32,

    /// Floor used to clamp runaway deltas (for example after a paused
    /// window regains focus). `0.0` disables clamping.
    pub min_fps: f32,

    started: bool,
}

impl Ticker {
    /// Creates a ticker. When `auto_start` is false, `tick` is a no-op
    /// until `start` is called.
    pub fn new(max_fps: f32, min_fps: f32, auto_start: bool) -> Self {
        Self {
            callbacks: Vec::new(),
            max_fps,
            min_fps,
            started: auto_start,
        }
    }

    //--- Run State --------------------------------------------------------

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    //--- Callback Registration --------------------------------------------

    /// Registers a per-frame callback.
    pub fn add(&mut self, callback: impl FnMut(&mut TickerFrame) + 'static) {
        self.add_boxed(Box::new(callback));
    }

    /// Registers an already-boxed per-frame callback.
    pub fn add_boxed(&mut self, callback: TickerCallback) {
        self.callbacks.push(callback);
    }

    /// Number of registered callbacks.
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Runs one frame: every callback once, in registration order.
    pub fn tick(&mut self, delta_seconds: f32) {
        if !self.started {
            return;
        }

        let delta_seconds = if self.min_fps > 0.0 {
            delta_seconds.min(1.0 / self.min_fps)
        } else {
            delta_seconds
        };

        let mut staged_max_fps = None;
        let mut staged_min_fps = None;

        self.callbacks.retain_mut(|callback| {
            let mut frame = TickerFrame {
                delta_seconds,
                delta_frames: delta_seconds * STANDARD_FPS,
                staged_max_fps: None,
                staged_min_fps: None,
                detached: false,
            };
            callback(&mut frame);

            if frame.staged_max_fps.is_some() {
                staged_max_fps = frame.staged_max_fps;
            }
            if frame.staged_min_fps.is_some() {
                staged_min_fps = frame.staged_min_fps;
            }
            !frame.detached
        });

        if let Some(fps) = staged_max_fps {
            self.max_fps = fps;
        }
        if let Some(fps) = staged_min_fps {
            self.min_fps = fps;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
