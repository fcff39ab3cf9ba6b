//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ContractRepository` / `ContractReader` - contracts (write / read side)
//! - `ProjectRepository` - projects
//! - `ProgressReportRepository` - progress series with transactional writes
//! - `ReportingPeriodRepository` - periods and their reports
//! - `FullReportReader` - flattened report rows for roll-ups and exports
//!
//! ## Outbound Ports
//!
//! - `AnnouncementChannel` - team chat announcements

mod announcement_channel;
mod contract_reader;
mod contract_repository;
mod full_report_reader;
mod progress_report_repository;
mod project_repository;
mod reporting_period_repository;

pub use announcement_channel::AnnouncementChannel;
pub use contract_reader::{ContractOverview, ContractReader};
pub use contract_repository::ContractRepository;
pub use full_report_reader::FullReportReader;
pub use progress_report_repository::{ProgressReportRepository, ProgressSeriesTransaction};
pub use project_repository::ProjectRepository;
pub use reporting_period_repository::ReportingPeriodRepository;
