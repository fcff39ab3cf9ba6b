//! Reporting period command and query handlers.

mod announce_period;
mod change_period_state;
mod create_reporting_period;
mod export_period_reports;
mod get_period_summary;

pub use announce_period::{AnnouncePeriodCommand, AnnouncePeriodHandler, AnnouncePeriodResult};
pub use change_period_state::{
    ChangePeriodStateCommand, ChangePeriodStateHandler, ChangePeriodStateResult,
};
pub use create_reporting_period::{
    CreateReportingPeriodCommand, CreateReportingPeriodHandler, CreateReportingPeriodResult,
};
pub use export_period_reports::{ExportPeriodReportsHandler, PeriodExport};
pub use get_period_summary::{GetPeriodSummaryHandler, GetPeriodSummaryQuery, PeriodOverview};
