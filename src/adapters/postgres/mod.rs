//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresContractRepository` - contracts and projects (write side)
//! - `PostgresContractReader` - contract overviews and cost totals
//! - `PostgresProgressReportRepository` - progress series, one transaction per write
//! - `PostgresReportingPeriodRepository` - periods and their reports
//! - `PostgresFullReportReader` - rows of the `full_reports` view

mod contract_reader;
mod contract_repository;
mod full_report_reader;
mod pool;
mod progress_report_repository;
mod reporting_period_repository;

pub use contract_reader::PostgresContractReader;
pub use contract_repository::PostgresContractRepository;
pub use full_report_reader::PostgresFullReportReader;
pub use pool::{connect, run_migrations};
pub use progress_report_repository::PostgresProgressReportRepository;
pub use reporting_period_repository::PostgresReportingPeriodRepository;
