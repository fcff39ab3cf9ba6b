//! PostgreSQL implementation of ProgressReportRepository.
//!
//! A series transaction locks the contract row (`SELECT ... FOR UPDATE`) so
//! concurrent writers to the same series queue up behind each other. The
//! period date lives on `reporting_periods`, so every series query joins it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    ContractId, DomainError, ErrorCode, Percentage, ProgressReportId, ReportingPeriodId, Timestamp,
};
use crate::domain::progress::{duplicate_error, ProgressReport};
use crate::ports::{ProgressReportRepository, ProgressSeriesTransaction};

/// Unique constraint on `(contract_id, reporting_period_id)`.
const SERIES_CONSTRAINT: &str = "progress_reports_contract_period_key";

const SELECT_REPORTS: &str = r#"
    SELECT pr.id, pr.contract_id, pr.reporting_period_id, rp.date AS period_date,
           pr.percentage, pr.delta, pr.created_at, pr.updated_at
    FROM progress_reports pr
    JOIN reporting_periods rp ON rp.id = pr.reporting_period_id
"#;

/// PostgreSQL implementation of the ProgressReportRepository port.
#[derive(Clone)]
pub struct PostgresProgressReportRepository {
    pool: PgPool,
}

impl PostgresProgressReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgressReportRow {
    id: Uuid,
    contract_id: Uuid,
    reporting_period_id: Uuid,
    period_date: NaiveDate,
    percentage: Decimal,
    delta: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProgressReportRow> for ProgressReport {
    type Error = DomainError;

    fn try_from(row: ProgressReportRow) -> Result<Self, Self::Error> {
        let percentage = Percentage::try_new(row.percentage).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored percentage: {}", e))
        })?;

        Ok(ProgressReport::reconstitute(
            ProgressReportId::from_uuid(row.id),
            ContractId::from_uuid(row.contract_id),
            ReportingPeriodId::from_uuid(row.reporting_period_id),
            row.period_date,
            percentage,
            row.delta,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[async_trait]
impl ProgressReportRepository for PostgresProgressReportRepository {
    async fn begin_series(
        &self,
        contract_id: &ContractId,
    ) -> Result<Box<dyn ProgressSeriesTransaction>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM contracts WHERE id = $1 FOR UPDATE")
                .bind(contract_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to lock contract", e))?;

        if locked.is_none() {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", contract_id),
            ));
        }

        Ok(Box::new(PostgresSeriesTransaction {
            tx,
            contract_id: *contract_id,
        }))
    }

    async fn find_by_contract(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<ProgressReport>, DomainError> {
        let rows: Vec<ProgressReportRow> = sqlx::query_as(&format!(
            "{} WHERE pr.contract_id = $1 ORDER BY rp.date",
            SELECT_REPORTS
        ))
        .bind(contract_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch progress reports", e))?;

        rows.into_iter().map(ProgressReport::try_from).collect()
    }

    async fn find_latest(
        &self,
        contract_id: &ContractId,
    ) -> Result<Option<ProgressReport>, DomainError> {
        let row: Option<ProgressReportRow> = sqlx::query_as(&format!(
            "{} WHERE pr.contract_id = $1 ORDER BY rp.date DESC LIMIT 1",
            SELECT_REPORTS
        ))
        .bind(contract_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch latest progress report", e))?;

        row.map(ProgressReport::try_from).transpose()
    }
}

/// Open transaction over one contract's series. Dropping it rolls back.
struct PostgresSeriesTransaction {
    tx: Transaction<'static, Postgres>,
    contract_id: ContractId,
}

impl PostgresSeriesTransaction {
    async fn fetch_neighbour(
        &mut self,
        date: NaiveDate,
        condition: &str,
    ) -> Result<Option<ProgressReport>, DomainError> {
        let row: Option<ProgressReportRow> = sqlx::query_as(&format!(
            "{} WHERE pr.contract_id = $1 AND {} LIMIT 1",
            SELECT_REPORTS, condition
        ))
        .bind(self.contract_id.as_uuid())
        .bind(date)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to fetch neighbouring progress report", e))?;

        row.map(ProgressReport::try_from).transpose()
    }
}

#[async_trait]
impl ProgressSeriesTransaction for PostgresSeriesTransaction {
    async fn occupies(
        &mut self,
        period_id: &ReportingPeriodId,
        date: NaiveDate,
    ) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM progress_reports pr
                JOIN reporting_periods rp ON rp.id = pr.reporting_period_id
                WHERE pr.contract_id = $1
                  AND (pr.reporting_period_id = $2 OR rp.date = $3)
            )
            "#,
        )
        .bind(self.contract_id.as_uuid())
        .bind(period_id.as_uuid())
        .bind(date)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check progress report", e))?;

        Ok(exists)
    }

    async fn find_preceding(
        &mut self,
        date: NaiveDate,
    ) -> Result<Option<ProgressReport>, DomainError> {
        self.fetch_neighbour(date, "rp.date < $2 ORDER BY rp.date DESC")
            .await
    }

    async fn find_following(
        &mut self,
        date: NaiveDate,
    ) -> Result<Option<ProgressReport>, DomainError> {
        self.fetch_neighbour(date, "rp.date > $2 ORDER BY rp.date ASC")
            .await
    }

    async fn insert(&mut self, report: &ProgressReport) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO progress_reports (
                id, reporting_period_id, contract_id, percentage, delta, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(report.id().as_uuid())
        .bind(report.reporting_period_id().as_uuid())
        .bind(report.contract_id().as_uuid())
        .bind(report.percentage().value())
        .bind(report.delta())
        .bind(report.created_at().as_datetime())
        .bind(report.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(SERIES_CONSTRAINT) {
                    return duplicate_error(report.contract_id(), report.reporting_period_id());
                }
            }
            DomainError::database("Failed to insert progress report", e)
        })?;

        Ok(())
    }

    async fn update_delta(&mut self, report: &ProgressReport) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE progress_reports SET delta = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(report.id().as_uuid())
        .bind(report.delta())
        .bind(report.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to update progress delta", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProgressReportNotFound,
                format!("Progress report not found: {}", report.id()),
            ));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(percentage: Decimal) -> ProgressReportRow {
        let now = Utc::now();
        ProgressReportRow {
            id: Uuid::new_v4(),
            contract_id: Uuid::new_v4(),
            reporting_period_id: Uuid::new_v4(),
            period_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            percentage,
            delta: Decimal::from(5),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_progress_report() {
        let report = ProgressReport::try_from(row(Decimal::from(40))).unwrap();
        assert_eq!(report.percentage(), Percentage::from_whole(40));
        assert_eq!(report.delta(), Decimal::from(5));
    }

    #[test]
    fn row_with_out_of_range_percentage_is_rejected() {
        let err = ProgressReport::try_from(row(Decimal::from(140))).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
