//! PostgreSQL implementation of ContractReader.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::contract_repository::{parse_status, ContractRow, CONTRACT_COLUMNS};
use crate::domain::contract::{Contract, ContractStatus, CostTotals};
use crate::domain::foundation::{ContractId, DomainError, Money, ProjectId};
use crate::ports::{ContractOverview, ContractReader};

/// PostgreSQL implementation of the ContractReader port.
#[derive(Clone)]
pub struct PostgresContractReader {
    pool: PgPool,
}

impl PostgresContractReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OverviewRow {
    id: Uuid,
    name: String,
    project_id: Uuid,
    project_name: String,
    project_billable: bool,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    budget: Option<Decimal>,
    status: String,
}

impl TryFrom<OverviewRow> for ContractOverview {
    type Error = DomainError;

    fn try_from(row: OverviewRow) -> Result<Self, Self::Error> {
        Ok(ContractOverview {
            id: ContractId::from_uuid(row.id),
            name: row.name,
            project_id: ProjectId::from_uuid(row.project_id),
            project_name: row.project_name,
            project_billable: row.project_billable,
            start_date: row.start_date,
            end_date: row.end_date,
            budget: row.budget.map(Money::new),
            status: parse_status(&row.status)?,
        })
    }
}

#[async_trait]
impl ContractReader for PostgresContractReader {
    async fn list_overviews(&self) -> Result<Vec<ContractOverview>, DomainError> {
        let rows: Vec<OverviewRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.project_id, p.name AS project_name,
                   p.billable AS project_billable, c.start_date, c.end_date,
                   c.budget, c.status
            FROM contracts c
            JOIN projects p ON p.id = c.project_id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list contracts", e))?;

        rows.into_iter().map(ContractOverview::try_from).collect()
    }

    async fn list_by_status(&self, status: ContractStatus) -> Result<Vec<Contract>, DomainError> {
        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE status = $1 ORDER BY name",
            CONTRACT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list contracts by status", e))?;

        rows.into_iter().map(Contract::try_from).collect()
    }

    async fn cost_totals(&self, contract_id: &ContractId) -> Result<CostTotals, DomainError> {
        let (reported, estimated, non_staff): (Decimal, Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(rp.cost) FILTER (WHERE NOT r.estimated), 0) AS reported,
                COALESCE(SUM(rp.cost) FILTER (WHERE r.estimated), 0) AS estimated,
                COALESCE((SELECT SUM(n.cost) FROM non_staff_costs n WHERE n.contract_id = $1), 0)
                    AS non_staff
            FROM report_parts rp
            JOIN reports r ON r.id = rp.report_id
            WHERE rp.contract_id = $1
            "#,
        )
        .bind(contract_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to sum contract costs", e))?;

        tracing::debug!(contract_id = %contract_id, %reported, %estimated, %non_staff, "Cost totals");

        Ok(CostTotals {
            reported: Money::new(reported),
            estimated: Money::new(estimated),
            non_staff: Money::new(non_staff),
        })
    }
}
