//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx repositories and readers over PostgreSQL
//! - `memory` - in-memory repositories for tests and local development
//! - `slack` - announcement channel over the Slack Web API
//! - `csv_export` - contract and period exports

pub mod csv_export;
pub mod memory;
pub mod postgres;
pub mod slack;

pub use memory::{
    InMemoryContractStore, InMemoryFullReportReader, InMemoryProgressReportRepository,
    InMemoryReportingPeriodRepository, RecordingAnnouncementChannel,
};
pub use slack::{SlackAnnouncer, SlackAnnouncerConfig};
