//! CreateContractHandler - Command handler for registering contracts.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::contract::Contract;
use crate::domain::foundation::{ContractId, DomainError, ErrorCode, Money, ProjectId};
use crate::ports::{ContractRepository, ProjectRepository};

/// Command to create a new contract under an existing project.
#[derive(Debug, Clone)]
pub struct CreateContractCommand {
    pub project_id: ProjectId,
    pub name: String,
    pub budget: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Comma-separated alternative names.
    pub aliases: Option<String>,
}

/// Result of successful contract creation.
#[derive(Debug, Clone)]
pub struct CreateContractResult {
    pub contract: Contract,
}

/// Handler for creating contracts.
pub struct CreateContractHandler {
    contracts: Arc<dyn ContractRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl CreateContractHandler {
    pub fn new(contracts: Arc<dyn ContractRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self {
            contracts,
            projects,
        }
    }

    pub async fn handle(&self, cmd: CreateContractCommand) -> Result<CreateContractResult, DomainError> {
        // 1. Project must exist
        if self.projects.find_by_id(&cmd.project_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                format!("Project not found: {}", cmd.project_id),
            ));
        }

        // 2. Build aggregate (validates the name)
        let mut contract = Contract::new(ContractId::new(), cmd.project_id, cmd.name)?;
        contract.set_budget(cmd.budget);
        contract.set_schedule(cmd.start_date, cmd.end_date);
        if let Some(aliases) = &cmd.aliases {
            contract.set_alias_list(aliases);
        }

        // 3. Names are unique; the store enforces it too
        if self.contracts.find_by_name(contract.name()).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::ContractNameTaken,
                format!("Contract name already taken: {}", contract.name()),
            ));
        }

        // 4. Persist
        self.contracts.save(&contract).await?;

        tracing::info!(contract_id = %contract.id(), name = contract.name(), "Contract created");
        Ok(CreateContractResult { contract })
    }
}
