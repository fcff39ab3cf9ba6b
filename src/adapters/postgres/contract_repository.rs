//! PostgreSQL implementation of ContractRepository and ProjectRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contract::{Contract, ContractStatus};
use crate::domain::foundation::{
    ContractId, DomainError, ErrorCode, Money, ProjectId, Timestamp,
};
use crate::domain::project::Project;
use crate::ports::{ContractRepository, ProjectRepository};

/// Unique constraint on `contracts.name`.
const NAME_CONSTRAINT: &str = "contracts_name_key";

/// PostgreSQL implementation of the contract and project repositories.
#[derive(Clone)]
pub struct PostgresContractRepository {
    pool: PgPool,
}

impl PostgresContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a contract.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ContractRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub budget: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub aliases: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ContractRow> for Contract {
    type Error = DomainError;

    fn try_from(row: ContractRow) -> Result<Self, Self::Error> {
        Ok(Contract::reconstitute(
            ContractId::from_uuid(row.id),
            ProjectId::from_uuid(row.project_id),
            row.name,
            row.budget.map(Money::new),
            row.start_date,
            row.end_date,
            parse_status(&row.status)?,
            row.aliases,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

pub(super) fn parse_status(s: &str) -> Result<ContractStatus, DomainError> {
    s.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid contract status: {}", e))
    })
}

pub(super) const CONTRACT_COLUMNS: &str =
    "id, project_id, name, budget, start_date, end_date, status, aliases, created_at, updated_at";

fn map_write_error(context: &str, contract: &Contract, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(NAME_CONSTRAINT) {
            return DomainError::new(
                ErrorCode::ContractNameTaken,
                format!("Contract name already taken: {}", contract.name()),
            );
        }
    }
    DomainError::database(context, e)
}

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, project_id, name, budget, start_date, end_date, status, aliases,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(contract.id().as_uuid())
        .bind(contract.project_id().as_uuid())
        .bind(contract.name())
        .bind(contract.budget().map(|b| b.amount()))
        .bind(contract.start_date())
        .bind(contract.end_date())
        .bind(contract.status().as_str())
        .bind(contract.aliases())
        .bind(contract.created_at().as_datetime())
        .bind(contract.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to save contract", contract, e))?;

        tracing::debug!(contract_id = %contract.id(), "Contract saved");
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contracts SET
                name = $2,
                budget = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                aliases = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(contract.id().as_uuid())
        .bind(contract.name())
        .bind(contract.budget().map(|b| b.amount()))
        .bind(contract.start_date())
        .bind(contract.end_date())
        .bind(contract.status().as_str())
        .bind(contract.aliases())
        .bind(contract.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update contract", contract, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", contract.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE id = $1",
            CONTRACT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch contract", e))?;

        row.map(Contract::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contract>, DomainError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE name = $1",
            CONTRACT_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch contract", e))?;

        row.map(Contract::try_from).transpose()
    }

    async fn delete(&self, id: &ContractId) -> Result<(), DomainError> {
        // report_parts, non_staff_costs and progress_reports cascade
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete contract", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", id),
            ));
        }

        tracing::info!(contract_id = %id, "Contract deleted");
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    billable: bool,
}

#[async_trait]
impl ProjectRepository for PostgresContractRepository {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO projects (id, name, billable) VALUES ($1, $2, $3)")
            .bind(project.id().as_uuid())
            .bind(project.name())
            .bind(project.is_billable())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to save project", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row: Option<ProjectRow> =
            sqlx::query_as("SELECT id, name, billable FROM projects WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch project", e))?;

        row.map(|r| Project::new(ProjectId::from_uuid(r.id), r.name, r.billable))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_accepts_known_states() {
        assert_eq!(parse_status("proposal").unwrap(), ContractStatus::Proposal);
        assert_eq!(parse_status("finished").unwrap(), ContractStatus::Finished);
    }

    #[test]
    fn parse_status_maps_unknown_to_database_error() {
        let err = parse_status("paused").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn row_converts_to_contract() {
        let now = Utc::now();
        let row = ContractRow {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            name: "Web".to_string(),
            budget: Some(Decimal::from(1000)),
            start_date: None,
            end_date: None,
            status: "live".to_string(),
            aliases: vec!["site".to_string()],
            created_at: now,
            updated_at: now,
        };
        let contract = Contract::try_from(row).unwrap();
        assert_eq!(contract.status(), ContractStatus::Live);
        assert_eq!(contract.budget(), Some(Money::from_euros(1000)));
        assert_eq!(contract.alias_list(), "site");
    }
}
