// This module contains the definition of `Schedule`.
mod schedule;

// This module contains the definition of `Runner`.
mod runner;

// Re-exports.
pub use runner::Runner;
pub use schedule::Schedule;
