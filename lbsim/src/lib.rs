// This module contains the definition of all identifiers.
pub mod id;

// This module contains the definition of `ServerMetricRecord` and `ResultSet`,
// and how they're read from and written to a results file.
pub mod results;

// This module contains the definition of `SimTime`.
pub mod time;

// This module contains the definition of `Config`.
pub mod config;

// This module contains the definition of `Task` and `TaskGenerator`.
pub mod task;

// This module contains the definition of `LoadBalancer`.
pub mod balancer;

// This module contains the definition of `ServerQueue`.
pub mod server;

// This module contains the definition of `Schedule` and `Runner`.
pub mod sim;

// Re-exports.
pub use config::Config;
pub use results::{ResultSet, ServerMetricRecord};
