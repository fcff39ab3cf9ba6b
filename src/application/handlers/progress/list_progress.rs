//! ListProgressHandler - A contract's progress series in period order.

use std::sync::Arc;

use crate::domain::foundation::{ContractId, DomainError};
use crate::domain::progress::ProgressReport;
use crate::ports::ProgressReportRepository;

/// Query for the progress series of a contract.
#[derive(Debug, Clone)]
pub struct ListProgressQuery {
    pub contract_id: ContractId,
}

/// Handler for listing progress snapshots.
pub struct ListProgressHandler {
    progress: Arc<dyn ProgressReportRepository>,
}

impl ListProgressHandler {
    pub fn new(progress: Arc<dyn ProgressReportRepository>) -> Self {
        Self { progress }
    }

    /// Snapshots ordered by period date, oldest first.
    pub async fn handle(&self, query: ListProgressQuery) -> Result<Vec<ProgressReport>, DomainError> {
        self.progress.find_by_contract(&query.contract_id).await
    }
}
