//! Flattened report row: one user's cost on one contract in one period.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContractId, Money, ReportingPeriodId, RoleId, UserId};

/// Read model joining reports, parts, users, roles, contracts and projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReport {
    pub reporting_period_id: ReportingPeriodId,
    pub user_id: UserId,
    pub user_name: String,
    pub role_id: Option<RoleId>,
    pub role_name: Option<String>,
    pub contract_id: ContractId,
    pub contract_name: String,
    pub project_name: String,
    pub cost: Money,
    pub report_estimated: bool,
}

/// Keeps rows for the given role; `None` keeps everything.
pub fn filter_by_role(rows: Vec<FullReport>, role_id: Option<&RoleId>) -> Vec<FullReport> {
    match role_id {
        Some(role) => rows
            .into_iter()
            .filter(|row| row.role_id.as_ref() == Some(role))
            .collect(),
        None => rows,
    }
}
