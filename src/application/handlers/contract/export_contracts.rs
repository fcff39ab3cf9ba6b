//! ExportContractsHandler - CSV export of the contract list.

use std::sync::Arc;

use crate::adapters::csv_export::contracts_to_csv;
use crate::domain::foundation::DomainError;
use crate::ports::ContractReader;

/// Handler producing the contracts CSV, ordered by contract name.
pub struct ExportContractsHandler {
    reader: Arc<dyn ContractReader>,
}

impl ExportContractsHandler {
    pub fn new(reader: Arc<dyn ContractReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<String, DomainError> {
        let contracts = self.reader.list_overviews().await?;
        tracing::debug!(count = contracts.len(), "Exporting contracts");
        contracts_to_csv(&contracts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContractStore;
    use crate::domain::contract::Contract;
    use crate::domain::foundation::{ContractId, ProjectId};
    use crate::domain::project::Project;
    use crate::ports::{ContractRepository, ProjectRepository};

    #[tokio::test]
    async fn exports_header_and_one_row_per_contract_by_name() {
        let store = Arc::new(InMemoryContractStore::new());
        let project = Project::new(ProjectId::new(), "Acme", true).unwrap();
        ProjectRepository::save(store.as_ref(), &project).await.unwrap();
        for name in ["Zeta", "Alpha"] {
            let c = Contract::new(ContractId::new(), *project.id(), name.to_string()).unwrap();
            ContractRepository::save(store.as_ref(), &c).await.unwrap();
        }

        let csv = ExportContractsHandler::new(store).handle().await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Acme,Alpha,"));
        assert!(lines[2].starts_with("Acme,Zeta,"));
        assert!(lines[1].ends_with(",false,Proposal"));
    }
}
