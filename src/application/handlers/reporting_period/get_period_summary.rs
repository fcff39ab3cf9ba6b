//! GetPeriodSummaryHandler - Roll-up of one period plus the cost history.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId, RoleId};
use crate::domain::reporting::{
    cost_history, filter_by_role, FullReport, PeriodCost, PeriodSummary, ReportingPeriod,
};
use crate::ports::{FullReportReader, ReportingPeriodRepository};

/// Query for a period's overview.
#[derive(Debug, Clone)]
pub struct GetPeriodSummaryQuery {
    pub reporting_period_id: ReportingPeriodId,
    /// Restricts the listed rows to one role; totals are unaffected.
    pub role_id: Option<RoleId>,
}

/// Everything the period page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodOverview {
    pub period: ReportingPeriod,
    pub summary: PeriodSummary,
    /// Rows ordered by user name.
    pub reports: Vec<FullReport>,
    /// Every period's totals, newest first.
    pub cost_history: Vec<PeriodCost>,
}

/// Handler for the period overview.
pub struct GetPeriodSummaryHandler {
    periods: Arc<dyn ReportingPeriodRepository>,
    full_reports: Arc<dyn FullReportReader>,
}

impl GetPeriodSummaryHandler {
    pub fn new(
        periods: Arc<dyn ReportingPeriodRepository>,
        full_reports: Arc<dyn FullReportReader>,
    ) -> Self {
        Self {
            periods,
            full_reports,
        }
    }

    pub async fn handle(&self, query: GetPeriodSummaryQuery) -> Result<PeriodOverview, DomainError> {
        let period = self
            .periods
            .find_by_id(&query.reporting_period_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ReportingPeriodNotFound,
                    format!("Reporting period not found: {}", query.reporting_period_id),
                )
            })?;

        let rows = self.full_reports.for_period(period.id()).await?;
        let summary = PeriodSummary::build(&period, &rows);

        let all_periods = self.periods.list().await?;
        let all_rows = self.full_reports.all().await?;
        let history = cost_history(&all_periods, &all_rows);

        Ok(PeriodOverview {
            summary,
            reports: filter_by_role(rows, query.role_id.as_ref()),
            cost_history: history,
            period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryFullReportReader, InMemoryReportingPeriodRepository};
    use crate::domain::foundation::{ContractId, Money, UserId};
    use chrono::NaiveDate;

    fn row(
        period: &ReportingPeriod,
        user: &str,
        role: Option<RoleId>,
        contract: ContractId,
        cost: i64,
        estimated: bool,
    ) -> FullReport {
        FullReport {
            reporting_period_id: *period.id(),
            user_id: UserId::new(),
            user_name: user.to_string(),
            role_id: role,
            role_name: None,
            contract_id: contract,
            contract_name: format!("Contract {}", contract),
            project_name: "Acme".to_string(),
            cost: Money::from_euros(cost),
            report_estimated: estimated,
        }
    }

    #[tokio::test]
    async fn summarises_period_and_history() {
        let periods = Arc::new(InMemoryReportingPeriodRepository::new());
        let reader = Arc::new(InMemoryFullReportReader::new());
        let feb = ReportingPeriod::new(ReportingPeriodId::new(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let mar = ReportingPeriod::new(ReportingPeriodId::new(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        periods.save_with_reports(&feb, &[]).await.unwrap();
        periods.save_with_reports(&mar, &[]).await.unwrap();

        let developer = RoleId::new();
        let contract = ContractId::new();
        reader.push(row(&mar, "Bo", Some(developer), contract, 100, false)).await;
        reader.push(row(&mar, "Al", None, contract, 50, true)).await;
        reader.push(row(&feb, "Al", None, contract, 70, false)).await;

        let handler = GetPeriodSummaryHandler::new(periods, reader);
        let overview = handler
            .handle(GetPeriodSummaryQuery {
                reporting_period_id: *mar.id(),
                role_id: None,
            })
            .await
            .unwrap();

        assert_eq!(overview.summary.total_cost, Money::from_euros(100));
        assert_eq!(overview.summary.projected_cost, Money::from_euros(150));
        assert_eq!(overview.summary.total_reporters, 2);
        assert_eq!(overview.summary.total_contracts_reported, 1);
        let names: Vec<&str> = overview.reports.iter().map(|r| r.user_name.as_str()).collect();
        assert_eq!(names, vec!["Al", "Bo"]);

        assert_eq!(overview.cost_history.len(), 2);
        assert_eq!(overview.cost_history[0].reporting_period_id, *mar.id());
        assert_eq!(overview.cost_history[1].cost, Money::from_euros(70));

        let filtered = handler
            .handle(GetPeriodSummaryQuery {
                reporting_period_id: *mar.id(),
                role_id: Some(developer),
            })
            .await
            .unwrap();
        assert_eq!(filtered.reports.len(), 1);
        assert_eq!(filtered.reports[0].user_name, "Bo");
        assert_eq!(filtered.summary.total_reporters, 2);
    }

    #[tokio::test]
    async fn unknown_period_is_not_found() {
        let handler = GetPeriodSummaryHandler::new(
            Arc::new(InMemoryReportingPeriodRepository::new()),
            Arc::new(InMemoryFullReportReader::new()),
        );
        let err = handler
            .handle(GetPeriodSummaryQuery {
                reporting_period_id: ReportingPeriodId::new(),
                role_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportingPeriodNotFound);
    }
}
