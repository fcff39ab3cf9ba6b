//! Contract reader port (read side / CQRS queries).
//!
//! Listing and cost queries that join contracts with projects, report parts
//! and non-staff costs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::contract::{Contract, ContractStatus, CostTotals};
use crate::domain::foundation::{ContractId, DomainError, Money, ProjectId};
use async_trait::async_trait;

/// Reader port for contract queries.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// All contracts with their project, ordered by contract name.
    async fn list_overviews(&self) -> Result<Vec<ContractOverview>, DomainError>;

    /// Contracts in the given state, ordered by name.
    async fn list_by_status(&self, status: ContractStatus) -> Result<Vec<Contract>, DomainError>;

    /// Cost sums booked against a contract.
    ///
    /// Returns zero totals for a contract without costs.
    async fn cost_totals(&self, contract_id: &ContractId) -> Result<CostTotals, DomainError>;
}

/// Contract row joined with its project, as listed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOverview {
    pub id: ContractId,
    pub name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub project_billable: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<Money>,
    pub status: ContractStatus,
}

impl ContractOverview {
    pub fn is_internal(&self) -> bool {
        !self.project_billable
    }
}
