//! CreateReportingPeriodHandler - Opens a new reporting period.
//!
//! Reports of an earlier period can be copied in as estimates so that
//! projected burn is available before anyone reports.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId};
use crate::domain::reporting::{Report, ReportingPeriod};
use crate::ports::ReportingPeriodRepository;

/// Command to create a reporting period.
#[derive(Debug, Clone)]
pub struct CreateReportingPeriodCommand {
    pub date: NaiveDate,
    /// Period whose reports are copied as estimates.
    pub copy_from: Option<ReportingPeriodId>,
}

/// Result of successful period creation.
#[derive(Debug, Clone)]
pub struct CreateReportingPeriodResult {
    pub period: ReportingPeriod,
    pub copied_reports: Vec<Report>,
}

/// Handler for creating reporting periods.
pub struct CreateReportingPeriodHandler {
    repository: Arc<dyn ReportingPeriodRepository>,
}

impl CreateReportingPeriodHandler {
    pub fn new(repository: Arc<dyn ReportingPeriodRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateReportingPeriodCommand,
    ) -> Result<CreateReportingPeriodResult, DomainError> {
        // 1. One period per date
        if self.repository.find_by_date(cmd.date).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::ReportingPeriodExists,
                format!("A reporting period already exists for {}", cmd.date),
            ));
        }

        let period = ReportingPeriod::new(ReportingPeriodId::new(), cmd.date);

        // 2. Copy source reports as estimates
        let copied_reports = match &cmd.copy_from {
            Some(source_id) => {
                if self.repository.find_by_id(source_id).await?.is_none() {
                    return Err(DomainError::new(
                        ErrorCode::ReportingPeriodNotFound,
                        format!("Reporting period not found: {}", source_id),
                    ));
                }
                self.repository
                    .reports_for(source_id)
                    .await?
                    .iter()
                    .map(|report| report.copy_as_estimate(*period.id()))
                    .collect()
            }
            None => Vec::new(),
        };

        // 3. Persist period and copies together
        self.repository
            .save_with_reports(&period, &copied_reports)
            .await?;

        tracing::info!(
            period_id = %period.id(),
            date = %period.date(),
            copied = copied_reports.len(),
            "Reporting period created"
        );

        Ok(CreateReportingPeriodResult {
            period,
            copied_reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryReportingPeriodRepository;
    use crate::domain::foundation::{ContractId, Money, ReportId, UserId};
    use crate::domain::reporting::ReportPart;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    fn setup() -> (Arc<InMemoryReportingPeriodRepository>, CreateReportingPeriodHandler) {
        let repo = Arc::new(InMemoryReportingPeriodRepository::new());
        let handler = CreateReportingPeriodHandler::new(repo.clone());
        (repo, handler)
    }

    #[tokio::test]
    async fn creates_open_period() {
        let (repo, handler) = setup();

        let result = handler
            .handle(CreateReportingPeriodCommand {
                date: date(3),
                copy_from: None,
            })
            .await
            .unwrap();

        assert!(result.period.is_open());
        assert!(result.copied_reports.is_empty());
        assert!(repo.find_by_date(date(3)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_second_period_on_same_date() {
        let (_repo, handler) = setup();
        let cmd = CreateReportingPeriodCommand {
            date: date(3),
            copy_from: None,
        };
        handler.handle(cmd.clone()).await.unwrap();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportingPeriodExists);
    }

    #[tokio::test]
    async fn copies_source_reports_as_estimates() {
        let (repo, handler) = setup();
        let source = ReportingPeriod::new(ReportingPeriodId::new(), date(2));
        let report = Report {
            id: ReportId::new(),
            user_id: UserId::new(),
            team_id: None,
            role_id: None,
            reporting_period_id: *source.id(),
            estimated: false,
            parts: vec![ReportPart {
                contract_id: ContractId::new(),
                cost: Money::from_euros(80),
            }],
        };
        repo.save_with_reports(&source, &[report.clone()]).await.unwrap();

        let result = handler
            .handle(CreateReportingPeriodCommand {
                date: date(3),
                copy_from: Some(*source.id()),
            })
            .await
            .unwrap();

        let copies = repo.reports_for(result.period.id()).await.unwrap();
        assert_eq!(copies.len(), 1);
        assert!(copies[0].estimated);
        assert_eq!(copies[0].user_id, report.user_id);
        assert_eq!(copies[0].total_cost(), Money::from_euros(80));
        // the source stays final
        assert!(!repo.reports_for(source.id()).await.unwrap()[0].estimated);
    }

    #[tokio::test]
    async fn unknown_source_is_not_found() {
        let (repo, handler) = setup();

        let err = handler
            .handle(CreateReportingPeriodCommand {
                date: date(3),
                copy_from: Some(ReportingPeriodId::new()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ReportingPeriodNotFound);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
