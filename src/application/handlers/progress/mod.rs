//! Progress command and query handlers.

mod list_progress;
mod record_progress;

pub use list_progress::{ListProgressHandler, ListProgressQuery};
pub use record_progress::{RecordProgressCommand, RecordProgressHandler, RecordProgressResult};
