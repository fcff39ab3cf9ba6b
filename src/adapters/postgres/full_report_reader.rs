//! PostgreSQL implementation of FullReportReader over the `full_reports` view.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ContractId, DomainError, Money, ReportingPeriodId, RoleId, UserId};
use crate::domain::reporting::FullReport;
use crate::ports::FullReportReader;

const SELECT_FULL_REPORTS: &str = r#"
    SELECT reporting_period_id, user_id, user_name, role_id, role_name,
           contract_id, contract_name, project_name, cost, report_estimated
    FROM full_reports
"#;

/// PostgreSQL implementation of the FullReportReader port.
#[derive(Clone)]
pub struct PostgresFullReportReader {
    pool: PgPool,
}

impl PostgresFullReportReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FullReportRow {
    reporting_period_id: Uuid,
    user_id: Uuid,
    user_name: String,
    role_id: Option<Uuid>,
    role_name: Option<String>,
    contract_id: Uuid,
    contract_name: String,
    project_name: String,
    cost: Decimal,
    report_estimated: bool,
}

impl From<FullReportRow> for FullReport {
    fn from(row: FullReportRow) -> Self {
        FullReport {
            reporting_period_id: ReportingPeriodId::from_uuid(row.reporting_period_id),
            user_id: UserId::from_uuid(row.user_id),
            user_name: row.user_name,
            role_id: row.role_id.map(RoleId::from_uuid),
            role_name: row.role_name,
            contract_id: ContractId::from_uuid(row.contract_id),
            contract_name: row.contract_name,
            project_name: row.project_name,
            cost: Money::new(row.cost),
            report_estimated: row.report_estimated,
        }
    }
}

#[async_trait]
impl FullReportReader for PostgresFullReportReader {
    async fn for_period(&self, id: &ReportingPeriodId) -> Result<Vec<FullReport>, DomainError> {
        let rows: Vec<FullReportRow> = sqlx::query_as(&format!(
            "{} WHERE reporting_period_id = $1 ORDER BY user_name, contract_name",
            SELECT_FULL_REPORTS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch period reports", e))?;

        Ok(rows.into_iter().map(FullReport::from).collect())
    }

    async fn all(&self) -> Result<Vec<FullReport>, DomainError> {
        let rows: Vec<FullReportRow> = sqlx::query_as(&format!(
            "{} ORDER BY user_name, contract_name",
            SELECT_FULL_REPORTS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch reports", e))?;

        Ok(rows.into_iter().map(FullReport::from).collect())
    }
}
