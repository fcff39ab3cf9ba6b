//! AnnouncePeriodHandler - Posts a period's summary to the team channel.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, ReportingPeriodId};
use crate::domain::reporting::{Announcement, PeriodSummary};
use crate::ports::{AnnouncementChannel, FullReportReader, ReportingPeriodRepository};

/// Command to announce a period.
#[derive(Debug, Clone)]
pub struct AnnouncePeriodCommand {
    pub reporting_period_id: ReportingPeriodId,
}

/// Outcome of an announcement attempt.
#[derive(Debug, Clone)]
pub struct AnnouncePeriodResult {
    pub announcement: Announcement,
    /// False when the channel did not accept the message.
    pub delivered: bool,
}

/// Handler for period announcements.
pub struct AnnouncePeriodHandler {
    periods: Arc<dyn ReportingPeriodRepository>,
    full_reports: Arc<dyn FullReportReader>,
    channel: Arc<dyn AnnouncementChannel>,
    channel_name: String,
}

impl AnnouncePeriodHandler {
    pub fn new(
        periods: Arc<dyn ReportingPeriodRepository>,
        full_reports: Arc<dyn FullReportReader>,
        channel: Arc<dyn AnnouncementChannel>,
        channel_name: impl Into<String>,
    ) -> Self {
        Self {
            periods,
            full_reports,
            channel,
            channel_name: channel_name.into(),
        }
    }

    /// Delivery failure is not an error; it comes back as `delivered: false`.
    pub async fn handle(&self, cmd: AnnouncePeriodCommand) -> Result<AnnouncePeriodResult, DomainError> {
        let period = self
            .periods
            .find_by_id(&cmd.reporting_period_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ReportingPeriodNotFound,
                    format!("Reporting period not found: {}", cmd.reporting_period_id),
                )
            })?;

        let rows = self.full_reports.for_period(period.id()).await?;
        let summary = PeriodSummary::build(&period, &rows);
        let announcement = Announcement::for_period(self.channel_name.clone(), &period, &summary);

        let delivered = self.channel.announce(&announcement).await;
        if !delivered {
            tracing::warn!(period_id = %period.id(), "Period announcement was not delivered");
        }

        Ok(AnnouncePeriodResult {
            announcement,
            delivered,
        })
    }
}
