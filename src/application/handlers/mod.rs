//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod contract;
pub mod progress;
pub mod reporting_period;

pub use contract::*;
pub use progress::*;
pub use reporting_period::*;
