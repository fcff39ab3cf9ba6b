//! Chat announcement payload for a reporting period.

use serde::{Deserialize, Serialize};

use super::{PeriodSummary, ReportingPeriod, ReportingPeriodStatus};

/// Message posted to the team chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub channel: String,
    pub text: String,
}

impl Announcement {
    /// Builds the announcement for a period from its roll-up.
    pub fn for_period(
        channel: impl Into<String>,
        period: &ReportingPeriod,
        summary: &PeriodSummary,
    ) -> Self {
        let text = match period.status() {
            ReportingPeriodStatus::Open => format!(
                "Reporting period {} is open. Please submit your report! \
                 So far {} people have reported on {} contracts.",
                period.display_name(),
                summary.total_reporters,
                summary.total_contracts_reported,
            ),
            ReportingPeriodStatus::Closed => format!(
                "Reporting period {} is closed. {} people reported on {} contracts, \
                 total cost {} EUR.",
                period.display_name(),
                summary.total_reporters,
                summary.total_contracts_reported,
                summary.total_cost,
            ),
        };

        Self {
            channel: channel.into(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ReportingPeriodId;
    use crate::domain::reporting::ReportingPeriodEvent;
    use chrono::NaiveDate;

    fn period() -> ReportingPeriod {
        ReportingPeriod::new(ReportingPeriodId::new(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn open_period_asks_for_reports() {
        let p = period();
        let summary = PeriodSummary::build(&p, &[]);
        let announcement = Announcement::for_period("#reporting", &p, &summary);

        assert_eq!(announcement.channel, "#reporting");
        assert!(announcement.text.contains("2024-03-01 is open"));
        assert!(announcement.text.contains("0 people"));
    }

    #[test]
    fn closed_period_reports_total_cost() {
        let mut p = period();
        p.fire(ReportingPeriodEvent::Close).unwrap();
        let summary = PeriodSummary::build(&p, &[]);
        let announcement = Announcement::for_period("#reporting", &p, &summary);

        assert!(announcement.text.contains("is closed"));
        assert!(announcement.text.contains("0.00 EUR"));
    }

    #[test]
    fn serializes_as_chat_message() {
        let p = period();
        let summary = PeriodSummary::build(&p, &[]);
        let json = serde_json::to_value(Announcement::for_period("C1", &p, &summary)).unwrap();
        assert_eq!(json["channel"], "C1");
        assert!(json["text"].is_string());
    }
}
