//! Per-contract progress series ordered by period date.
//!
//! Answers the neighbour queries the series transaction needs: the nearest
//! snapshot before and after a date, and whether a period or date is taken.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::ProgressReport;
use crate::domain::foundation::{ContractId, DomainError, ErrorCode, ReportingPeriodId};

/// Ordered progress snapshots of a single contract, keyed by period date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSeries {
    reports: BTreeMap<NaiveDate, ProgressReport>,
}

impl ProgressSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from stored snapshots, trusting their deltas.
    pub fn from_reports(reports: impl IntoIterator<Item = ProgressReport>) -> Self {
        Self {
            reports: reports
                .into_iter()
                .map(|report| (report.period_date(), report))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Snapshots in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &ProgressReport> {
        self.reports.values()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&ProgressReport> {
        self.reports.values().next_back()
    }

    /// Nearest snapshot strictly before `date`.
    pub fn preceding(&self, date: NaiveDate) -> Option<&ProgressReport> {
        self.reports.range(..date).next_back().map(|(_, report)| report)
    }

    /// Nearest snapshot strictly after `date`.
    pub fn following(&self, date: NaiveDate) -> Option<&ProgressReport> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.reports
            .range((Excluded(date), Unbounded))
            .next()
            .map(|(_, report)| report)
    }

    /// Returns true if a snapshot exists for the period or its date.
    pub fn occupies(&self, period_id: &ReportingPeriodId, date: NaiveDate) -> bool {
        self.reports.contains_key(&date)
            || self
                .reports
                .values()
                .any(|report| report.reporting_period_id() == period_id)
    }

    /// Stores a snapshot as-is, replacing any at the same date.
    pub fn put(&mut self, report: ProgressReport) {
        self.reports.insert(report.period_date(), report);
    }
}

/// Uniqueness violation for a (contract, period) pair.
pub fn duplicate_error(contract_id: &ContractId, period_id: &ReportingPeriodId) -> DomainError {
    DomainError::new(
        ErrorCode::ProgressReportExists,
        "A progress report already exists for this contract and reporting period",
    )
    .with_detail("contract_id", contract_id.to_string())
    .with_detail("reporting_period_id", period_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Percentage;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    fn snapshot(month: u32, pct: u8) -> ProgressReport {
        ProgressReport::record(
            ContractId::new(),
            ReportingPeriodId::new(),
            date(month),
            Percentage::from_whole(pct),
            None,
        )
    }

    fn series(snapshots: &[(u32, u8)]) -> ProgressSeries {
        ProgressSeries::from_reports(snapshots.iter().map(|&(m, pct)| snapshot(m, pct)))
    }

    #[test]
    fn neighbours_are_strictly_before_and_after() {
        let s = series(&[(1, 10), (3, 30), (5, 50)]);

        assert_eq!(s.preceding(date(3)).unwrap().period_date(), date(1));
        assert_eq!(s.following(date(3)).unwrap().period_date(), date(5));
        assert_eq!(s.preceding(date(4)).unwrap().period_date(), date(3));
        assert_eq!(s.following(date(4)).unwrap().period_date(), date(5));
        assert!(s.preceding(date(1)).is_none());
        assert!(s.following(date(5)).is_none());
    }

    #[test]
    fn occupies_matches_period_or_date() {
        let taken = snapshot(2, 40);
        let period = *taken.reporting_period_id();
        let s = ProgressSeries::from_reports([taken]);

        assert!(s.occupies(&period, date(9)));
        assert!(s.occupies(&ReportingPeriodId::new(), date(2)));
        assert!(!s.occupies(&ReportingPeriodId::new(), date(3)));
    }

    #[test]
    fn iteration_and_latest_follow_dates_not_insertion() {
        let mut s = ProgressSeries::new();
        s.put(snapshot(4, 80));
        s.put(snapshot(1, 20));
        s.put(snapshot(2, 50));

        let dates: Vec<NaiveDate> = s.iter().map(ProgressReport::period_date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(4)]);
        assert_eq!(s.latest().unwrap().percentage(), Percentage::from_whole(80));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn put_replaces_snapshot_at_same_date() {
        let mut s = series(&[(1, 20)]);
        s.put(snapshot(1, 30));
        assert_eq!(s.len(), 1);
        assert_eq!(s.latest().unwrap().percentage(), Percentage::from_whole(30));
    }

    #[test]
    fn duplicate_error_names_contract_and_period() {
        let contract = ContractId::new();
        let period = ReportingPeriodId::new();
        let err = duplicate_error(&contract, &period);
        assert_eq!(err.code, ErrorCode::ProgressReportExists);
        assert_eq!(err.details.get("reporting_period_id"), Some(&period.to_string()));
    }
}
