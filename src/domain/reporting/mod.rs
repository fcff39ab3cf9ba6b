//! Reporting module - periods, user reports and period roll-ups.

mod announcement;
mod full_report;
mod period;
mod report;
mod summary;

pub use announcement::Announcement;
pub use full_report::{filter_by_role, FullReport};
pub use period::{ReportingPeriod, ReportingPeriodEvent, ReportingPeriodStatus};
pub use report::{Report, ReportPart};
pub use summary::{cost_history, ContractCost, PeriodCost, PeriodSummary};
