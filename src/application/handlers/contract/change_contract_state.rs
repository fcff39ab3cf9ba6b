//! ChangeContractStateHandler - Fires lifecycle events on a contract.

use std::sync::Arc;

use crate::domain::contract::{Contract, ContractEvent, ContractStatus};
use crate::domain::foundation::{ContractId, DomainError, ErrorCode};
use crate::ports::ContractRepository;

/// Command to move a contract through its lifecycle.
#[derive(Debug, Clone)]
pub struct ChangeContractStateCommand {
    pub contract_id: ContractId,
    pub event: ContractEvent,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct ChangeContractStateResult {
    pub contract: Contract,
    pub previous: ContractStatus,
}

/// Handler for contract state changes.
pub struct ChangeContractStateHandler {
    repository: Arc<dyn ContractRepository>,
}

impl ChangeContractStateHandler {
    pub fn new(repository: Arc<dyn ContractRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ChangeContractStateCommand,
    ) -> Result<ChangeContractStateResult, DomainError> {
        let mut contract = self
            .repository
            .find_by_id(&cmd.contract_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ContractNotFound,
                    format!("Contract not found: {}", cmd.contract_id),
                )
            })?;

        let previous = contract.fire(cmd.event).map_err(|e| {
            tracing::warn!(contract_id = %cmd.contract_id, event = %cmd.event, "Rejected contract transition");
            e
        })?;

        self.repository.update(&contract).await?;

        tracing::info!(
            contract_id = %cmd.contract_id,
            from = %previous,
            to = %contract.status(),
            "Contract state changed"
        );

        Ok(ChangeContractStateResult { contract, previous })
    }
}
