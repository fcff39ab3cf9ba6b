//! Progress report repository port.
//!
//! Writes go through a [`ProgressSeriesTransaction`]: a unit of work scoped to
//! one contract's series. While it is open no other writer can change that
//! series; dropping it without [`ProgressSeriesTransaction::commit`] discards
//! every write made through it.

use chrono::NaiveDate;

use crate::domain::foundation::{ContractId, DomainError, ReportingPeriodId};
use crate::domain::progress::ProgressReport;
use async_trait::async_trait;

/// Repository port for progress reports.
#[async_trait]
pub trait ProgressReportRepository: Send + Sync {
    /// Opens a unit of work holding exclusive write access to the series.
    async fn begin_series(
        &self,
        contract_id: &ContractId,
    ) -> Result<Box<dyn ProgressSeriesTransaction>, DomainError>;

    /// All reports of a contract ordered by period date ascending.
    async fn find_by_contract(&self, contract_id: &ContractId)
        -> Result<Vec<ProgressReport>, DomainError>;

    /// The chronologically last report of a contract.
    async fn find_latest(&self, contract_id: &ContractId)
        -> Result<Option<ProgressReport>, DomainError>;
}

/// Unit of work over one contract's progress series.
#[async_trait]
pub trait ProgressSeriesTransaction: Send {
    /// Returns true if the series has a report for the period or its date.
    async fn occupies(
        &mut self,
        period_id: &ReportingPeriodId,
        date: NaiveDate,
    ) -> Result<bool, DomainError>;

    /// Nearest report with a period date strictly before `date`.
    async fn find_preceding(&mut self, date: NaiveDate)
        -> Result<Option<ProgressReport>, DomainError>;

    /// Nearest report with a period date strictly after `date`.
    async fn find_following(&mut self, date: NaiveDate)
        -> Result<Option<ProgressReport>, DomainError>;

    /// Inserts a new report.
    ///
    /// # Errors
    ///
    /// - `ProgressReportExists` on a (contract, period) uniqueness violation
    async fn insert(&mut self, report: &ProgressReport) -> Result<(), DomainError>;

    /// Persists a recomputed delta.
    async fn update_delta(&mut self, report: &ProgressReport) -> Result<(), DomainError>;

    /// Makes every write visible atomically.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_are_object_safe() {
        fn _repo(_repo: &dyn ProgressReportRepository) {}
        fn _tx(_tx: Box<dyn ProgressSeriesTransaction>) {}
    }
}
