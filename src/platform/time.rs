//! Frame timing
//!
//! Converts repaint timestamps (milliseconds) into clamped simulation deltas.

use crate::clamp_dt;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the baseline without producing a delta
    pub fn begin(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Forget paused wall-clock time; the next delta starts from `now_ms`
    pub fn resync(&mut self, now_ms: f64) {
        self.begin(now_ms);
    }

    /// Seconds since the previous call, clamped to a safe step
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt)
    }
}
