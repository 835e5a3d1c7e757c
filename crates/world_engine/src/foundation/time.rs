//! Simulation time
//!
//! The registry never reads a wall clock. The driver owns timing and hands a
//! [`Clock`] value to every update and draw pass.

use serde::{Deserialize, Serialize};

/// Monotonically increasing simulation time supplied by the driver
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Number of ticks elapsed before this one
    pub frame: u64,
    /// Simulation time in seconds
    pub time: f64,
}

impl Clock {
    /// Create a clock value
    pub fn new(frame: u64, time: f64) -> Self {
        Self { frame, time }
    }

    /// The value for the next tick, `delta_time` seconds later
    ///
    /// Negative deltas are treated as zero so the clock never runs backwards.
    pub fn advance(self, delta_time: f64) -> Self {
        Self {
            frame: self.frame + 1,
            time: self.time + delta_time.max(0.0),
        }
    }
}
