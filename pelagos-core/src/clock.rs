//! Simulation clock.

use serde::{Deserialize, Serialize};

use crate::field::FloatValue;

/// Simulation time in the host solver's units.
pub type Time = FloatValue;

/// Current simulation time and iteration count.
///
/// Advanced by the host solver's time stepping; this subsystem only reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    time: Time,
    iteration: u64,
}

impl Clock {
    pub fn new(time: Time) -> Self {
        Self { time, iteration: 0 }
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Advance by `dt`, incrementing the iteration count.
    pub fn tick(&mut self, dt: Time) {
        self.time += dt;
        self.iteration += 1;
    }
}
