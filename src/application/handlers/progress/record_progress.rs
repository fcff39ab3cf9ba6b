//! RecordProgressHandler - Records a percent-complete snapshot for a contract.
//!
//! Snapshots may arrive in any chronological order. The new snapshot's delta
//! is measured against its nearest predecessor by period date, and the
//! nearest successor is rebased onto it. Everything happens inside one
//! series transaction; any failure leaves the series untouched.

use std::sync::Arc;

use crate::domain::foundation::{
    ContractId, DomainError, ErrorCode, Percentage, ReportingPeriodId,
};
use crate::domain::progress::{duplicate_error, ProgressReport};
use crate::ports::{ContractRepository, ProgressReportRepository, ReportingPeriodRepository};

/// Command to record progress of a contract in a reporting period.
#[derive(Debug, Clone)]
pub struct RecordProgressCommand {
    pub contract_id: ContractId,
    pub reporting_period_id: ReportingPeriodId,
    pub percentage: Percentage,
}

/// Result of a recorded snapshot.
#[derive(Debug, Clone)]
pub struct RecordProgressResult {
    pub report: ProgressReport,
    /// The successor whose delta was recomputed, if its delta changed.
    pub relinked: Option<ProgressReport>,
}

/// Handler for recording progress.
pub struct RecordProgressHandler {
    contracts: Arc<dyn ContractRepository>,
    periods: Arc<dyn ReportingPeriodRepository>,
    progress: Arc<dyn ProgressReportRepository>,
}

impl RecordProgressHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        periods: Arc<dyn ReportingPeriodRepository>,
        progress: Arc<dyn ProgressReportRepository>,
    ) -> Self {
        Self {
            contracts,
            periods,
            progress,
        }
    }

    pub async fn handle(&self, cmd: RecordProgressCommand) -> Result<RecordProgressResult, DomainError> {
        // 1. Resolve contract and period
        if self.contracts.find_by_id(&cmd.contract_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", cmd.contract_id),
            ));
        }

        let period = self
            .periods
            .find_by_id(&cmd.reporting_period_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ReportingPeriodNotFound,
                    format!("Reporting period not found: {}", cmd.reporting_period_id),
                )
            })?;
        let date = period.date();

        // 2. Lock the series
        let mut tx = self.progress.begin_series(&cmd.contract_id).await?;

        // 3. One snapshot per period and per date
        if tx.occupies(&cmd.reporting_period_id, date).await? {
            return Err(duplicate_error(&cmd.contract_id, &cmd.reporting_period_id));
        }

        // 4. Measure against the predecessor
        let preceding = tx.find_preceding(date).await?;
        let report = ProgressReport::record(
            cmd.contract_id,
            cmd.reporting_period_id,
            date,
            cmd.percentage,
            preceding.as_ref(),
        );

        // 5. Insert, then rebase the successor onto the new snapshot
        let following = tx.find_following(date).await?;
        tx.insert(&report).await?;

        let relinked = match following {
            Some(mut next) => {
                if next.rebase_on(Some(&report)) {
                    tx.update_delta(&next).await?;
                    Some(next)
                } else {
                    None
                }
            }
            None => None,
        };

        // 6. Commit
        tx.commit().await?;

        tracing::info!(
            contract_id = %cmd.contract_id,
            period = %date,
            percentage = %report.percentage(),
            delta = %report.delta(),
            relinked = relinked.is_some(),
            "Progress recorded"
        );

        Ok(RecordProgressResult { report, relinked })
    }
}
