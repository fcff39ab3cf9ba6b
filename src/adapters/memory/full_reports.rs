//! In-memory full report rows.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ReportingPeriodId};
use crate::domain::reporting::FullReport;
use crate::ports::FullReportReader;

/// Full report reader over rows pushed by the caller.
#[derive(Default)]
pub struct InMemoryFullReportReader {
    rows: RwLock<Vec<FullReport>>,
}

impl InMemoryFullReportReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, row: FullReport) {
        self.rows.write().await.push(row);
    }
}

#[async_trait]
impl FullReportReader for InMemoryFullReportReader {
    async fn for_period(&self, id: &ReportingPeriodId) -> Result<Vec<FullReport>, DomainError> {
        let mut rows: Vec<FullReport> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| &row.reporting_period_id == id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(rows)
    }

    async fn all(&self) -> Result<Vec<FullReport>, DomainError> {
        Ok(self.rows.read().await.clone())
    }
}
