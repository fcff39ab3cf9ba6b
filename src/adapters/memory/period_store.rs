//! In-memory reporting period storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId};
use crate::domain::reporting::{Report, ReportingPeriod};
use crate::ports::ReportingPeriodRepository;

#[derive(Default)]
struct State {
    periods: HashMap<ReportingPeriodId, ReportingPeriod>,
    reports: Vec<Report>,
}

/// In-memory reporting period repository.
#[derive(Default)]
pub struct InMemoryReportingPeriodRepository {
    state: RwLock<State>,
}

impl InMemoryReportingPeriodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &ReportingPeriodId) -> DomainError {
        DomainError::new(
            ErrorCode::ReportingPeriodNotFound,
            format!("Reporting period not found: {}", id),
        )
    }
}

#[async_trait]
impl ReportingPeriodRepository for InMemoryReportingPeriodRepository {
    async fn save_with_reports(
        &self,
        period: &ReportingPeriod,
        reports: &[Report],
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.periods.values().any(|p| p.date() == period.date()) {
            return Err(DomainError::new(
                ErrorCode::ReportingPeriodExists,
                format!("A reporting period already exists for {}", period.date()),
            ));
        }
        state.periods.insert(*period.id(), period.clone());
        state.reports.extend_from_slice(reports);
        Ok(())
    }

    async fn update(&self, period: &ReportingPeriod) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.periods.get_mut(period.id()) {
            Some(stored) => {
                *stored = period.clone();
                Ok(())
            }
            None => Err(Self::not_found(period.id())),
        }
    }

    async fn find_by_id(
        &self,
        id: &ReportingPeriodId,
    ) -> Result<Option<ReportingPeriod>, DomainError> {
        Ok(self.state.read().await.periods.get(id).cloned())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ReportingPeriod>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .periods
            .values()
            .find(|p| p.date() == date)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ReportingPeriod>, DomainError> {
        let mut periods: Vec<ReportingPeriod> =
            self.state.read().await.periods.values().cloned().collect();
        periods.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(periods)
    }

    async fn reports_for(&self, id: &ReportingPeriodId) -> Result<Vec<Report>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .reports
            .iter()
            .filter(|report| &report.reporting_period_id == id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ReportingPeriodId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.periods.remove(id).is_none() {
            return Err(Self::not_found(id));
        }
        state.reports.retain(|report| &report.reporting_period_id != id);
        Ok(())
    }
}
