/// Identifier of a scheduled frame callback (`requestAnimationFrame` id on
/// the wasm side).
pub type FrameHandle = i32;

/// Bookkeeping for the per-frame loop.
///
/// Holds the one live scheduling handle and whether the loop is meant to be
/// running. Starting over a live handle surrenders it for cancellation
/// before a new one may be installed; without that, every extra start
/// doubles the step rate. The caller performs the actual schedule/cancel
/// calls and reports back through `scheduled`/`frame_fired`.
#[derive(Debug, Default)]
pub struct LoopState {
    handle: Option<FrameHandle>,
    active: bool,
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the loop active. Returns the stale handle, which must be
    /// cancelled before scheduling a replacement frame.
    pub fn begin(&mut self) -> Option<FrameHandle> {
        self.active = true;
        self.handle.take()
    }

    /// Mark the loop inactive, surrendering any pending handle for
    /// cancellation.
    pub fn halt(&mut self) -> Option<FrameHandle> {
        self.active = false;
        self.handle.take()
    }

    /// Record a freshly scheduled frame
    pub fn scheduled(&mut self, handle: FrameHandle) {
        self.handle = Some(handle);
    }

    /// A scheduled frame just fired; its handle is spent
    pub fn frame_fired(&mut self) {
        self.handle = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_pending_frame(&self) -> bool {
        self.handle.is_some()
    }

    /// True when the loop should be running but no frame is queued, e.g.
    /// after a reset raced the cycle. The caller schedules exactly one
    /// frame in response.
    pub fn needs_kick(&self) -> bool {
        self.active && self.handle.is_none()
    }
}
