//! ExportPeriodReportsHandler - CSV download of one period's rows.

use std::sync::Arc;

use crate::adapters::csv_export::{period_export_file_name, period_reports_to_csv};
use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId};
use crate::ports::{FullReportReader, ReportingPeriodRepository};

/// A rendered export with its download name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodExport {
    pub file_name: String,
    pub content: String,
}

/// Handler for period CSV exports.
pub struct ExportPeriodReportsHandler {
    periods: Arc<dyn ReportingPeriodRepository>,
    full_reports: Arc<dyn FullReportReader>,
}

impl ExportPeriodReportsHandler {
    pub fn new(
        periods: Arc<dyn ReportingPeriodRepository>,
        full_reports: Arc<dyn FullReportReader>,
    ) -> Self {
        Self {
            periods,
            full_reports,
        }
    }

    pub async fn handle(&self, id: &ReportingPeriodId) -> Result<PeriodExport, DomainError> {
        let period = self.periods.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ReportingPeriodNotFound,
                format!("Reporting period not found: {}", id),
            )
        })?;

        let rows = self.full_reports.for_period(id).await?;
        Ok(PeriodExport {
            file_name: period_export_file_name(&period),
            content: period_reports_to_csv(&rows)?,
        })
    }
}
