//! In-memory contract, project and cost storage.
//!
//! Backs `ContractRepository`, `ContractReader` and `ProjectRepository` with
//! one shared state, so cost queries see the contracts saved through the
//! repository. Intended for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::contract::{Contract, ContractStatus, CostTotals};
use crate::domain::foundation::{ContractId, DomainError, ErrorCode, Money, ProjectId};
use crate::domain::project::Project;
use crate::ports::{ContractOverview, ContractReader, ContractRepository, ProjectRepository};

#[derive(Default)]
struct State {
    contracts: HashMap<ContractId, Contract>,
    projects: HashMap<ProjectId, Project>,
    staff_costs: Vec<StaffCost>,
    non_staff_costs: Vec<(ContractId, Money)>,
}

struct StaffCost {
    contract_id: ContractId,
    cost: Money,
    estimated: bool,
}

/// In-memory store for contracts, their projects and booked costs.
#[derive(Default)]
pub struct InMemoryContractStore {
    state: RwLock<State>,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books staff cost from a report part against a contract.
    pub async fn record_staff_cost(&self, contract_id: ContractId, cost: Money, estimated: bool) {
        self.state.write().await.staff_costs.push(StaffCost {
            contract_id,
            cost,
            estimated,
        });
    }

    /// Books a non-staff cost against a contract.
    pub async fn record_non_staff_cost(&self, contract_id: ContractId, cost: Money) {
        self.state
            .write()
            .await
            .non_staff_costs
            .push((contract_id, cost));
    }

    fn name_taken(state: &State, contract: &Contract) -> bool {
        state
            .contracts
            .values()
            .any(|other| other.name() == contract.name() && other.id() != contract.id())
    }

    fn name_taken_error(name: &str) -> DomainError {
        DomainError::new(
            ErrorCode::ContractNameTaken,
            format!("Contract name already taken: {}", name),
        )
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractStore {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if Self::name_taken(&state, contract) {
            return Err(Self::name_taken_error(contract.name()));
        }
        state.contracts.insert(*contract.id(), contract.clone());
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.contracts.contains_key(contract.id()) {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", contract.id()),
            ));
        }
        if Self::name_taken(&state, contract) {
            return Err(Self::name_taken_error(contract.name()));
        }
        state.contracts.insert(*contract.id(), contract.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        Ok(self.state.read().await.contracts.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Contract>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .contracts
            .values()
            .find(|contract| contract.name() == name)
            .cloned())
    }

    async fn delete(&self, id: &ContractId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.contracts.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::ContractNotFound,
                format!("Contract not found: {}", id),
            ));
        }
        state.staff_costs.retain(|cost| &cost.contract_id != id);
        state.non_staff_costs.retain(|(contract_id, _)| contract_id != id);
        Ok(())
    }
}

#[async_trait]
impl ContractReader for InMemoryContractStore {
    async fn list_overviews(&self) -> Result<Vec<ContractOverview>, DomainError> {
        let state = self.state.read().await;
        let mut overviews = Vec::with_capacity(state.contracts.len());
        for contract in state.contracts.values() {
            let project = state.projects.get(contract.project_id()).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ProjectNotFound,
                    format!("Project not found: {}", contract.project_id()),
                )
            })?;
            overviews.push(ContractOverview {
                id: *contract.id(),
                name: contract.name().to_string(),
                project_id: *project.id(),
                project_name: project.name().to_string(),
                project_billable: project.is_billable(),
                start_date: contract.start_date(),
                end_date: contract.end_date(),
                budget: contract.budget(),
                status: contract.status(),
            });
        }
        overviews.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(overviews)
    }

    async fn list_by_status(&self, status: ContractStatus) -> Result<Vec<Contract>, DomainError> {
        let state = self.state.read().await;
        let mut contracts: Vec<Contract> = state
            .contracts
            .values()
            .filter(|contract| contract.status() == status)
            .cloned()
            .collect();
        contracts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(contracts)
    }

    async fn cost_totals(&self, contract_id: &ContractId) -> Result<CostTotals, DomainError> {
        let state = self.state.read().await;
        let mut totals = CostTotals::default();
        for cost in state.staff_costs.iter().filter(|c| &c.contract_id == contract_id) {
            if cost.estimated {
                totals.estimated += cost.cost;
            } else {
                totals.reported += cost.cost;
            }
        }
        totals.non_staff = state
            .non_staff_costs
            .iter()
            .filter(|(id, _)| id == contract_id)
            .map(|(_, cost)| *cost)
            .sum();
        Ok(totals)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryContractStore {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .projects
            .insert(*project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.state.read().await.projects.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(name: &str) -> Contract {
        Contract::new(ContractId::new(), ProjectId::new(), name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn save_rejects_duplicate_names() {
        let store = InMemoryContractStore::new();
        ContractRepository::save(&store, &contract("Web")).await.unwrap();

        let err = ContractRepository::save(&store, &contract("Web")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ContractNameTaken);
    }

    #[tokio::test]
    async fn cost_totals_split_estimates_and_non_staff() {
        let store = InMemoryContractStore::new();
        let c = contract("Web");
        let other = ContractId::new();
        store.record_staff_cost(*c.id(), Money::from_euros(100), false).await;
        store.record_staff_cost(*c.id(), Money::from_euros(40), true).await;
        store.record_staff_cost(other, Money::from_euros(999), false).await;
        store.record_non_staff_cost(*c.id(), Money::from_euros(5)).await;

        let totals = store.cost_totals(c.id()).await.unwrap();
        assert_eq!(totals.reported, Money::from_euros(100));
        assert_eq!(totals.estimated, Money::from_euros(40));
        assert_eq!(totals.non_staff, Money::from_euros(5));
    }

    #[tokio::test]
    async fn delete_cascades_costs() {
        let store = InMemoryContractStore::new();
        let c = contract("Web");
        ContractRepository::save(&store, &c).await.unwrap();
        store.record_non_staff_cost(*c.id(), Money::from_euros(5)).await;

        store.delete(c.id()).await.unwrap();

        assert_eq!(store.cost_totals(c.id()).await.unwrap(), CostTotals::default());
        assert!(ContractRepository::find_by_id(&store, c.id()).await.unwrap().is_none());
    }
}
