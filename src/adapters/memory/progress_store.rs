//! In-memory progress report storage with transactional series writes.
//!
//! A series transaction holds the store's lock for its whole lifetime and
//! works on a staged copy of the contract's series; commit swaps the copy in.
//! Dropping the transaction discards the copy.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{ContractId, DomainError, ErrorCode, ReportingPeriodId};
use crate::domain::progress::{duplicate_error, ProgressReport, ProgressSeries};
use crate::ports::{ProgressReportRepository, ProgressSeriesTransaction};

type SeriesMap = HashMap<ContractId, ProgressSeries>;

/// In-memory progress report repository.
#[derive(Default)]
pub struct InMemoryProgressReportRepository {
    series: Arc<Mutex<SeriesMap>>,
    fail_delta_updates: bool,
}

impl InMemoryProgressReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose transactions fail on `update_delta`, for exercising
    /// rollback paths.
    pub fn with_failing_delta_updates() -> Self {
        Self {
            series: Arc::default(),
            fail_delta_updates: true,
        }
    }
}

#[async_trait]
impl ProgressReportRepository for InMemoryProgressReportRepository {
    async fn begin_series(
        &self,
        contract_id: &ContractId,
    ) -> Result<Box<dyn ProgressSeriesTransaction>, DomainError> {
        let guard = Arc::clone(&self.series).lock_owned().await;
        let staged = guard.get(contract_id).cloned().unwrap_or_default();
        Ok(Box::new(InMemorySeriesTransaction {
            guard,
            contract_id: *contract_id,
            staged,
            fail_delta_updates: self.fail_delta_updates,
        }))
    }

    async fn find_by_contract(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<ProgressReport>, DomainError> {
        Ok(self
            .series
            .lock()
            .await
            .get(contract_id)
            .map(|series| series.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_latest(
        &self,
        contract_id: &ContractId,
    ) -> Result<Option<ProgressReport>, DomainError> {
        Ok(self
            .series
            .lock()
            .await
            .get(contract_id)
            .and_then(|series| series.latest().cloned()))
    }
}

struct InMemorySeriesTransaction {
    guard: OwnedMutexGuard<SeriesMap>,
    contract_id: ContractId,
    staged: ProgressSeries,
    fail_delta_updates: bool,
}

#[async_trait]
impl ProgressSeriesTransaction for InMemorySeriesTransaction {
    async fn occupies(
        &mut self,
        period_id: &ReportingPeriodId,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        Ok(self.staged.occupies(period_id, date))
    }

    async fn find_preceding(
        &mut self,
        date: NaiveDate,
    ) -> Result<Option<ProgressReport>, DomainError> {
        Ok(self.staged.preceding(date).cloned())
    }

    async fn find_following(
        &mut self,
        date: NaiveDate,
    ) -> Result<Option<ProgressReport>, DomainError> {
        Ok(self.staged.following(date).cloned())
    }

    async fn insert(&mut self, report: &ProgressReport) -> Result<(), DomainError> {
        if self
            .staged
            .occupies(report.reporting_period_id(), report.period_date())
        {
            return Err(duplicate_error(&self.contract_id, report.reporting_period_id()));
        }
        self.staged.put(report.clone());
        Ok(())
    }

    async fn update_delta(&mut self, report: &ProgressReport) -> Result<(), DomainError> {
        if self.fail_delta_updates {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated delta update failure",
            ));
        }
        let exists = self
            .staged
            .iter()
            .any(|stored| stored.id() == report.id());
        if !exists {
            return Err(DomainError::new(
                ErrorCode::ProgressReportNotFound,
                format!("Progress report not found: {}", report.id()),
            ));
        }
        self.staged.put(report.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemorySeriesTransaction {
            mut guard,
            contract_id,
            staged,
            ..
        } = *self;
        guard.insert(contract_id, staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Percentage;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() {
        let repo = InMemoryProgressReportRepository::new();
        let contract = ContractId::new();
        let report = ProgressReport::record(
            contract,
            ReportingPeriodId::new(),
            date(1),
            Percentage::from_whole(10),
            None,
        );

        {
            let mut tx = repo.begin_series(&contract).await.unwrap();
            tx.insert(&report).await.unwrap();
        }

        assert!(repo.find_by_contract(&contract).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn committed_writes_are_visible_in_date_order() {
        let repo = InMemoryProgressReportRepository::new();
        let contract = ContractId::new();
        let later = ProgressReport::record(
            contract,
            ReportingPeriodId::new(),
            date(2),
            Percentage::from_whole(20),
            None,
        );
        let earlier = ProgressReport::record(
            contract,
            ReportingPeriodId::new(),
            date(1),
            Percentage::from_whole(10),
            None,
        );

        let mut tx = repo.begin_series(&contract).await.unwrap();
        tx.insert(&later).await.unwrap();
        tx.insert(&earlier).await.unwrap();
        tx.commit().await.unwrap();

        let stored = repo.find_by_contract(&contract).await.unwrap();
        assert_eq!(stored, vec![earlier, later.clone()]);
        assert_eq!(repo.find_latest(&contract).await.unwrap(), Some(later));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_period() {
        let repo = InMemoryProgressReportRepository::new();
        let contract = ContractId::new();
        let period = ReportingPeriodId::new();
        let first = ProgressReport::record(contract, period, date(1), Percentage::ZERO, None);
        let second = ProgressReport::record(contract, period, date(1), Percentage::HUNDRED, None);

        let mut tx = repo.begin_series(&contract).await.unwrap();
        tx.insert(&first).await.unwrap();
        let err = tx.insert(&second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgressReportExists);
    }
}
