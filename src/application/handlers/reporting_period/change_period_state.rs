//! ChangePeriodStateHandler - Closes and reopens reporting periods.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId};
use crate::domain::reporting::{ReportingPeriod, ReportingPeriodEvent, ReportingPeriodStatus};
use crate::ports::ReportingPeriodRepository;

/// Command to fire a lifecycle event on a period.
#[derive(Debug, Clone)]
pub struct ChangePeriodStateCommand {
    pub reporting_period_id: ReportingPeriodId,
    pub event: ReportingPeriodEvent,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct ChangePeriodStateResult {
    pub period: ReportingPeriod,
    pub previous: ReportingPeriodStatus,
}

/// Handler for period state changes.
pub struct ChangePeriodStateHandler {
    repository: Arc<dyn ReportingPeriodRepository>,
}

impl ChangePeriodStateHandler {
    pub fn new(repository: Arc<dyn ReportingPeriodRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ChangePeriodStateCommand,
    ) -> Result<ChangePeriodStateResult, DomainError> {
        let mut period = self
            .repository
            .find_by_id(&cmd.reporting_period_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ReportingPeriodNotFound,
                    format!("Reporting period not found: {}", cmd.reporting_period_id),
                )
            })?;

        let previous = period.fire(cmd.event)?;
        self.repository.update(&period).await?;

        tracing::info!(
            period_id = %cmd.reporting_period_id,
            from = %previous,
            to = %period.status(),
            "Reporting period state changed"
        );

        Ok(ChangePeriodStateResult { period, previous })
    }
}
