//! In-memory adapters for tests and local development.

mod announcements;
mod contract_store;
mod full_reports;
mod period_store;
mod progress_store;

pub use announcements::RecordingAnnouncementChannel;
pub use contract_store::InMemoryContractStore;
pub use full_reports::InMemoryFullReportReader;
pub use period_store::InMemoryReportingPeriodRepository;
pub use progress_store::InMemoryProgressReportRepository;
