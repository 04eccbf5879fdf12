use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// number of servers
    servers: usize,
    /// mean of the exponentially distributed task service time, in seconds
    avg_service_time: f64,
    /// time between two consecutive generated tasks
    inter_arrival: Duration,
    /// tasks are only generated before this point in time
    duration: Duration,
    /// seed of the task generator
    seed: u64,
    /// processing power of the first server
    base_power: f64,
    /// how much more processing power each subsequent server has
    power_step: f64,
    /// queue size of the first server
    base_queue_size: usize,
    /// how much larger each subsequent server queue is
    queue_size_step: usize,
}

impl Config {
    /// Create a new `Config`.
    /// The first argument `servers` represents the number of servers in the
    /// system.
    /// The second argument `avg_service_time` represents the mean service
    /// time (in seconds) of generated tasks.
    pub fn new(servers: usize, avg_service_time: f64) -> Self {
        assert!(avg_service_time.is_finite() && avg_service_time > 0.0);
        // by default, a task is generated every second for 5 seconds
        let inter_arrival = Duration::from_secs(1);
        let duration = Duration::from_secs(5);
        let seed = 0;
        // by default, server `i` has a processing power of `50 + 5i` and a
        // queue size of `20 + 5i`
        let base_power = 50.0;
        let power_step = 5.0;
        let base_queue_size = 20;
        let queue_size_step = 5;
        Self {
            servers,
            avg_service_time,
            inter_arrival,
            duration,
            seed,
            base_power,
            power_step,
            base_queue_size,
            queue_size_step,
        }
    }

    /// Retrieve the number of servers.
    pub fn servers(&self) -> usize {
        self.servers
    }

    /// Retrieve the mean service time.
    pub fn avg_service_time(&self) -> f64 {
        self.avg_service_time
    }

    /// Retrieve the interval between generated tasks.
    pub fn inter_arrival(&self) -> Duration {
        self.inter_arrival
    }

    /// Changes the interval between generated tasks. Simulation time has
    /// millisecond precision, so the interval must be at least 1ms.
    pub fn set_inter_arrival(&mut self, inter_arrival: Duration) {
        assert!(inter_arrival.as_millis() > 0);
        self.inter_arrival = inter_arrival;
    }

    /// Retrieve for how long tasks are generated.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Changes for how long tasks are generated.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Changes how processing power is assigned to servers.
    pub fn set_power(&mut self, base_power: f64, power_step: f64) {
        self.base_power = base_power;
        self.power_step = power_step;
    }

    /// Changes how queue sizes are assigned to servers.
    pub fn set_queue_size(
        &mut self,
        base_queue_size: usize,
        queue_size_step: usize,
    ) {
        assert!(base_queue_size > 0);
        self.base_queue_size = base_queue_size;
        self.queue_size_step = queue_size_step;
    }

    /// Computes the processing power of the server with index `index`
    /// (0-based).
    pub fn server_power(&self, index: usize) -> f64 {
        self.base_power + self.power_step * index as f64
    }

    /// Computes the queue size of the server with index `index` (0-based).
    pub fn server_queue_size(&self, index: usize) -> usize {
        self.base_queue_size + self.queue_size_step * index
    }
}
