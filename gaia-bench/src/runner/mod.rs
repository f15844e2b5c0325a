//! Evaluation execution engine

pub mod executor;
pub mod rate_limiter;

pub use executor::{ConsoleProgress, EvalRunner, NoOpProgress, ProgressCallback, RunnerConfig};
pub use rate_limiter::RateLimiter;
