//! Reporting period aggregate and its open/closed lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DomainError, ReportingPeriodId, StateMachine, Timestamp, ValidationError,
};

/// Lifecycle state of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriodStatus {
    /// Accepting reports.
    #[default]
    Open,
    /// Reports are final.
    Closed,
}

/// Events that move a reporting period through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriodEvent {
    Close,
    Reopen,
}

impl ReportingPeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportingPeriodStatus::Open => "open",
            ReportingPeriodStatus::Closed => "closed",
        }
    }
}

impl StateMachine for ReportingPeriodStatus {
    type Event = ReportingPeriodEvent;

    fn target(&self, event: ReportingPeriodEvent) -> Option<Self> {
        use ReportingPeriodStatus::*;
        match (self, event) {
            (Open, ReportingPeriodEvent::Close) => Some(Closed),
            (Closed, ReportingPeriodEvent::Reopen) => Some(Open),
            _ => None,
        }
    }

    fn events() -> &'static [ReportingPeriodEvent] {
        &[ReportingPeriodEvent::Close, ReportingPeriodEvent::Reopen]
    }
}

impl fmt::Display for ReportingPeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportingPeriodStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ReportingPeriodStatus::Open),
            "closed" => Ok(ReportingPeriodStatus::Closed),
            other => Err(ValidationError::invalid_format(
                "reporting_period_status",
                format!("unknown state '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ReportingPeriodEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportingPeriodEvent::Close => write!(f, "close"),
            ReportingPeriodEvent::Reopen => write!(f, "reopen"),
        }
    }
}

impl FromStr for ReportingPeriodEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(ReportingPeriodEvent::Close),
            "reopen" => Ok(ReportingPeriodEvent::Reopen),
            other => Err(ValidationError::invalid_format(
                "reporting_period_event",
                format!("unknown event '{}'", other),
            )),
        }
    }
}

/// An administrative window over which users submit effort reports.
///
/// `date` marks the period boundary and orders periods chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    id: ReportingPeriodId,
    date: NaiveDate,
    status: ReportingPeriodStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ReportingPeriod {
    /// Create a new open period.
    pub fn new(id: ReportingPeriodId, date: NaiveDate) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            date,
            status: ReportingPeriodStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a period from persistence.
    pub fn reconstitute(
        id: ReportingPeriodId,
        date: NaiveDate,
        status: ReportingPeriodStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            date,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ReportingPeriodId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> ReportingPeriodStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Short label, used for export file names.
    pub fn display_name(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_open(&self) -> bool {
        self.status == ReportingPeriodStatus::Open
    }

    /// Fire a lifecycle event; the status is untouched on error.
    pub fn fire(&mut self, event: ReportingPeriodEvent) -> Result<ReportingPeriodStatus, DomainError> {
        let next = self.status.transition(event)?;
        let previous = std::mem::replace(&mut self.status, next);
        self.updated_at = Timestamp::now();
        Ok(previous)
    }
}
