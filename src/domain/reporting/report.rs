//! A user's report for a period: effort allocated to contracts as cost.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContractId, Money, ReportId, ReportingPeriodId, RoleId, TeamId, UserId,
};

/// Cost a report attributes to one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPart {
    pub contract_id: ContractId,
    pub cost: Money,
}

/// A user's report within a reporting period. Parts are owned and go with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub user_id: UserId,
    pub team_id: Option<TeamId>,
    pub role_id: Option<RoleId>,
    pub reporting_period_id: ReportingPeriodId,
    /// Estimated reports are projections; they only count towards projected burn.
    pub estimated: bool,
    pub parts: Vec<ReportPart>,
}

impl Report {
    /// Sum of all part costs.
    pub fn total_cost(&self) -> Money {
        self.parts.iter().map(|part| part.cost).sum()
    }

    /// Copies this report into another period as an estimate.
    pub fn copy_as_estimate(&self, reporting_period_id: ReportingPeriodId) -> Report {
        Report {
            id: ReportId::new(),
            user_id: self.user_id,
            team_id: self.team_id,
            role_id: self.role_id,
            reporting_period_id,
            estimated: true,
            parts: self.parts.clone(),
        }
    }
}
