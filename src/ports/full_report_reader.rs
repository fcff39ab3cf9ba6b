//! Full report reader port (read side).

use crate::domain::foundation::{DomainError, ReportingPeriodId};
use crate::domain::reporting::FullReport;
use async_trait::async_trait;

/// Reader over the flattened report rows.
#[async_trait]
pub trait FullReportReader: Send + Sync {
    /// Rows of one period ordered by user name.
    async fn for_period(&self, id: &ReportingPeriodId) -> Result<Vec<FullReport>, DomainError>;

    /// Rows of every period.
    async fn all(&self) -> Result<Vec<FullReport>, DomainError>;
}
