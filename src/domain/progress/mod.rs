//! Progress module - percent-complete snapshots and their deltas.

mod progress_report;
mod series;

pub use progress_report::{delta_from, ProgressReport};
pub use series::{duplicate_error, ProgressSeries};
