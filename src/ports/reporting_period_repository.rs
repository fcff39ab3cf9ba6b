//! Reporting period repository port.

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ReportingPeriodId};
use crate::domain::reporting::{Report, ReportingPeriod};
use async_trait::async_trait;

/// Repository port for reporting periods and the reports they own.
#[async_trait]
pub trait ReportingPeriodRepository: Send + Sync {
    /// Saves a new period together with its initial reports, atomically.
    ///
    /// # Errors
    ///
    /// - `ReportingPeriodExists` if a period already uses the date
    async fn save_with_reports(
        &self,
        period: &ReportingPeriod,
        reports: &[Report],
    ) -> Result<(), DomainError>;

    /// Updates the period's state.
    ///
    /// # Errors
    ///
    /// - `ReportingPeriodNotFound` if the period doesn't exist
    async fn update(&self, period: &ReportingPeriod) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReportingPeriodId)
        -> Result<Option<ReportingPeriod>, DomainError>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ReportingPeriod>, DomainError>;

    /// All periods, newest first.
    async fn list(&self) -> Result<Vec<ReportingPeriod>, DomainError>;

    /// Reports of a period with their parts.
    async fn reports_for(&self, id: &ReportingPeriodId) -> Result<Vec<Report>, DomainError>;

    /// Deletes the period and its reports.
    async fn delete(&self, id: &ReportingPeriodId) -> Result<(), DomainError>;
}
