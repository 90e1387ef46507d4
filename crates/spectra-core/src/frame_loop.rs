//! Render loop bookkeeping
//!
//! The browser loop re-schedules itself through `requestAnimationFrame`. This
//! type tracks whether it should keep going and which frame request is pending,
//! so the owner can cancel it when the player is torn down.

/// State of a self-rescheduling frame loop
#[derive(Debug, Clone, Default)]
pub struct FrameLoopControl {
    running: bool,
    pending: Option<i32>,
    ticks: u64,
}

impl FrameLoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the loop as running; false if it already was
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// Record the id of the frame request that will run the next tick
    pub fn scheduled(&mut self, request_id: i32) {
        self.pending = Some(request_id);
    }

    /// Called at the start of a tick; false means the tick must not run
    pub fn begin_tick(&mut self) -> bool {
        self.pending = None;
        if !self.running {
            return false;
        }
        self.ticks += 1;
        true
    }

    /// Stop the loop, returning the frame request to cancel
    pub fn stop(&mut self) -> Option<i32> {
        if self.running {
            tracing::debug!(ticks = self.ticks, "Frame loop stopped");
        }
        self.running = false;
        self.pending.take()
    }
}
