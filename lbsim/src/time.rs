#[derive(Debug, Default)]
pub struct SimTime {
    // milliseconds since the start of the simulation
    time: u64,
}

impl SimTime {
    /// Creates a new simulation time, starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current time in milliseconds.
    pub fn now(&self) -> u64 {
        self.time
    }

    /// Returns the current time in seconds.
    pub fn now_secs(&self) -> f64 {
        millis_to_secs(self.time)
    }

    /// Increases simulation time by `tick`.
    pub fn tick(&mut self, tick: u64) {
        self.time += tick;
    }

    /// Sets simulation time to `new_time`.
    pub fn set_time(&mut self, new_time: u64) {
        // make sure time is monotonic
        assert!(self.time <= new_time);
        self.time = new_time;
    }
}

/// Converts seconds to milliseconds, rounding to the closest millisecond.
pub fn secs_to_millis(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}

pub fn millis_to_secs(millis: u64) -> f64 {
    millis as f64 / 1000.0
}
