//! PostgreSQL implementation of ReportingPeriodRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ContractId, DomainError, ErrorCode, Money, ReportId, ReportingPeriodId, RoleId, TeamId,
    Timestamp, UserId,
};
use crate::domain::reporting::{Report, ReportPart, ReportingPeriod, ReportingPeriodStatus};
use crate::ports::ReportingPeriodRepository;

/// Unique constraint on `reporting_periods.date`.
const DATE_CONSTRAINT: &str = "reporting_periods_date_key";

const PERIOD_COLUMNS: &str = "id, date, status, created_at, updated_at";

/// PostgreSQL implementation of the ReportingPeriodRepository port.
#[derive(Clone)]
pub struct PostgresReportingPeriodRepository {
    pool: PgPool,
}

impl PostgresReportingPeriodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PeriodRow {
    id: Uuid,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PeriodRow> for ReportingPeriod {
    type Error = DomainError;

    fn try_from(row: PeriodRow) -> Result<Self, Self::Error> {
        let status: ReportingPeriodStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid period status: {}", e))
        })?;

        Ok(ReportingPeriod::reconstitute(
            ReportingPeriodId::from_uuid(row.id),
            row.date,
            status,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    team_id: Option<Uuid>,
    role_id: Option<Uuid>,
    reporting_period_id: Uuid,
    estimated: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct PartRow {
    report_id: Uuid,
    contract_id: Uuid,
    cost: Decimal,
}

#[async_trait]
impl ReportingPeriodRepository for PostgresReportingPeriodRepository {
    async fn save_with_reports(
        &self,
        period: &ReportingPeriod,
        reports: &[Report],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO reporting_periods (id, date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(period.id().as_uuid())
        .bind(period.date())
        .bind(period.status().as_str())
        .bind(period.created_at().as_datetime())
        .bind(period.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(DATE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::ReportingPeriodExists,
                        format!("A reporting period already exists on {}", period.date()),
                    );
                }
            }
            DomainError::database("Failed to save reporting period", e)
        })?;

        for report in reports {
            sqlx::query(
                r#"
                INSERT INTO reports (id, user_id, team_id, role_id, reporting_period_id, estimated)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(report.id.as_uuid())
            .bind(report.user_id.as_uuid())
            .bind(report.team_id.map(|id| *id.as_uuid()))
            .bind(report.role_id.map(|id| *id.as_uuid()))
            .bind(report.reporting_period_id.as_uuid())
            .bind(report.estimated)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to save report", e))?;

            for part in &report.parts {
                sqlx::query(
                    r#"
                    INSERT INTO report_parts (id, report_id, contract_id, cost)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(report.id.as_uuid())
                .bind(part.contract_id.as_uuid())
                .bind(part.cost.amount())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to save report part", e))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        tracing::debug!(
            period_id = %period.id(),
            reports = reports.len(),
            "Reporting period saved"
        );
        Ok(())
    }

    async fn update(&self, period: &ReportingPeriod) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE reporting_periods SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(period.id().as_uuid())
        .bind(period.status().as_str())
        .bind(period.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update reporting period", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReportingPeriodNotFound,
                format!("Reporting period not found: {}", period.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ReportingPeriodId,
    ) -> Result<Option<ReportingPeriod>, DomainError> {
        let row: Option<PeriodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reporting_periods WHERE id = $1",
            PERIOD_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch reporting period", e))?;

        row.map(ReportingPeriod::try_from).transpose()
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<ReportingPeriod>, DomainError> {
        let row: Option<PeriodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reporting_periods WHERE date = $1",
            PERIOD_COLUMNS
        ))
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch reporting period", e))?;

        row.map(ReportingPeriod::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<ReportingPeriod>, DomainError> {
        let rows: Vec<PeriodRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reporting_periods ORDER BY date DESC",
            PERIOD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list reporting periods", e))?;

        rows.into_iter().map(ReportingPeriod::try_from).collect()
    }

    async fn reports_for(&self, id: &ReportingPeriodId) -> Result<Vec<Report>, DomainError> {
        let reports: Vec<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, team_id, role_id, reporting_period_id, estimated
            FROM reports
            WHERE reporting_period_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch reports", e))?;

        let parts: Vec<PartRow> = sqlx::query_as(
            r#"
            SELECT p.report_id, p.contract_id, p.cost
            FROM report_parts p
            JOIN reports r ON r.id = p.report_id
            WHERE r.reporting_period_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch report parts", e))?;

        let mut parts_by_report: HashMap<Uuid, Vec<ReportPart>> = HashMap::new();
        for part in parts {
            parts_by_report
                .entry(part.report_id)
                .or_default()
                .push(ReportPart {
                    contract_id: ContractId::from_uuid(part.contract_id),
                    cost: Money::new(part.cost),
                });
        }

        Ok(reports
            .into_iter()
            .map(|row| Report {
                id: ReportId::from_uuid(row.id),
                user_id: UserId::from_uuid(row.user_id),
                team_id: row.team_id.map(TeamId::from_uuid),
                role_id: row.role_id.map(RoleId::from_uuid),
                reporting_period_id: ReportingPeriodId::from_uuid(row.reporting_period_id),
                estimated: row.estimated,
                parts: parts_by_report.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn delete(&self, id: &ReportingPeriodId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM reporting_periods WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete reporting period", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReportingPeriodNotFound,
                format!("Reporting period not found: {}", id),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_row_with_unknown_status_is_rejected() {
        let now = Utc::now();
        let row = PeriodRow {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: "archived".to_string(),
            created_at: now,
            updated_at: now,
        };
        let err = ReportingPeriod::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn period_row_converts_closed_status() {
        let now = Utc::now();
        let row = PeriodRow {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: "closed".to_string(),
            created_at: now,
            updated_at: now,
        };
        let period = ReportingPeriod::try_from(row).unwrap();
        assert_eq!(period.status(), ReportingPeriodStatus::Closed);
    }
}
