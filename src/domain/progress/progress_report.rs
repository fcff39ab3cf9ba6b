//! Progress report entity: percent-complete of a contract at a reporting period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContractId, Percentage, ProgressReportId, ReportingPeriodId, Timestamp,
};

/// A percent-complete snapshot and its change since the previous snapshot.
///
/// # Invariants
///
/// - `delta` equals `percentage` minus the percentage of the nearest earlier
///   snapshot of the same contract, or `percentage` itself if there is none
/// - at most one snapshot per (contract, reporting period)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    id: ProgressReportId,
    contract_id: ContractId,
    reporting_period_id: ReportingPeriodId,
    period_date: NaiveDate,
    percentage: Percentage,
    delta: Decimal,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ProgressReport {
    /// Records a new snapshot whose delta is measured against `preceding`.
    pub fn record(
        contract_id: ContractId,
        reporting_period_id: ReportingPeriodId,
        period_date: NaiveDate,
        percentage: Percentage,
        preceding: Option<&ProgressReport>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: ProgressReportId::new(),
            contract_id,
            reporting_period_id,
            period_date,
            percentage,
            delta: delta_from(preceding, percentage),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a snapshot from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProgressReportId,
        contract_id: ContractId,
        reporting_period_id: ReportingPeriodId,
        period_date: NaiveDate,
        percentage: Percentage,
        delta: Decimal,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            contract_id,
            reporting_period_id,
            period_date,
            percentage,
            delta,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProgressReportId {
        &self.id
    }

    pub fn contract_id(&self) -> &ContractId {
        &self.contract_id
    }

    pub fn reporting_period_id(&self) -> &ReportingPeriodId {
        &self.reporting_period_id
    }

    /// Date of the reporting period; orders the series.
    pub fn period_date(&self) -> NaiveDate {
        self.period_date
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    pub fn delta(&self) -> Decimal {
        self.delta
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Recomputes the delta against a new predecessor.
    ///
    /// Returns true if the delta changed.
    pub fn rebase_on(&mut self, preceding: Option<&ProgressReport>) -> bool {
        let delta = delta_from(preceding, self.percentage);
        if delta == self.delta {
            return false;
        }
        self.delta = delta;
        self.updated_at = Timestamp::now();
        true
    }
}

/// Change from the preceding snapshot; the first snapshot counts from zero.
pub fn delta_from(preceding: Option<&ProgressReport>, percentage: Percentage) -> Decimal {
    let base = preceding.map_or(Percentage::ZERO, ProgressReport::percentage);
    percentage.value() - base.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    fn record(month: u32, pct: u8, preceding: Option<&ProgressReport>) -> ProgressReport {
        ProgressReport::record(
            ContractId::new(),
            ReportingPeriodId::new(),
            date(month),
            Percentage::from_whole(pct),
            preceding,
        )
    }

    #[test]
    fn first_report_delta_equals_percentage() {
        let report = record(1, 25, None);
        assert_eq!(report.delta(), Decimal::from(25));
    }

    #[test]
    fn delta_is_difference_to_preceding() {
        let first = record(1, 35, None);
        let second = record(2, 55, Some(&first));
        assert_eq!(second.delta(), Decimal::from(20));
    }

    #[test]
    fn delta_may_be_negative() {
        let first = record(1, 60, None);
        let second = record(2, 40, Some(&first));
        assert_eq!(second.delta(), Decimal::from(-20));
    }

    #[test]
    fn rebase_reports_whether_delta_changed() {
        let earlier = record(1, 30, None);
        let mut later = record(2, 50, None);
        assert!(later.rebase_on(Some(&earlier)));
        assert_eq!(later.delta(), Decimal::from(20));
        assert!(!later.rebase_on(Some(&earlier)));
    }
}
