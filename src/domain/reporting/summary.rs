//! Period-level roll-ups of full report rows.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FullReport, ReportingPeriod};
use crate::domain::foundation::{ContractId, Money, ReportingPeriodId};

/// Cost booked on one contract within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCost {
    pub contract_id: ContractId,
    pub contract_name: String,
    pub project_name: String,
    /// Cost from final reports.
    pub cost: Money,
    /// Cost including estimated reports.
    pub projected_cost: Money,
}

/// Aggregated view of a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub reporting_period_id: ReportingPeriodId,
    pub date: NaiveDate,
    pub total_cost: Money,
    pub projected_cost: Money,
    /// Distinct users with at least one row.
    pub total_reporters: usize,
    /// Distinct contracts with at least one row.
    pub total_contracts_reported: usize,
    /// Sorted by contract name.
    pub contracts: Vec<ContractCost>,
}

impl PeriodSummary {
    /// Rolls up the period's rows. Rows of other periods are ignored.
    pub fn build(period: &ReportingPeriod, rows: &[FullReport]) -> Self {
        let rows: Vec<&FullReport> = rows
            .iter()
            .filter(|row| &row.reporting_period_id == period.id())
            .collect();

        let reporters: HashSet<_> = rows.iter().map(|row| row.user_id).collect();

        let mut by_contract: BTreeMap<(String, ContractId), ContractCost> = BTreeMap::new();
        for row in &rows {
            let entry = by_contract
                .entry((row.contract_name.clone(), row.contract_id))
                .or_insert_with(|| ContractCost {
                    contract_id: row.contract_id,
                    contract_name: row.contract_name.clone(),
                    project_name: row.project_name.clone(),
                    cost: Money::ZERO,
                    projected_cost: Money::ZERO,
                });
            entry.projected_cost += row.cost;
            if !row.report_estimated {
                entry.cost += row.cost;
            }
        }

        let contracts: Vec<ContractCost> = by_contract.into_values().collect();

        Self {
            reporting_period_id: *period.id(),
            date: period.date(),
            total_cost: contracts.iter().map(|c| c.cost).sum(),
            projected_cost: contracts.iter().map(|c| c.projected_cost).sum(),
            total_reporters: reporters.len(),
            total_contracts_reported: contracts.len(),
            contracts,
        }
    }
}

/// Total cost of one period, for the cost history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCost {
    pub reporting_period_id: ReportingPeriodId,
    pub date: NaiveDate,
    pub cost: Money,
    pub projected_cost: Money,
}

/// Per-period totals, newest period first.
pub fn cost_history(periods: &[ReportingPeriod], rows: &[FullReport]) -> Vec<PeriodCost> {
    let mut history: Vec<PeriodCost> = periods
        .iter()
        .map(|period| {
            let summary = PeriodSummary::build(period, rows);
            PeriodCost {
                reporting_period_id: summary.reporting_period_id,
                date: summary.date,
                cost: summary.total_cost,
                projected_cost: summary.projected_cost,
            }
        })
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn period(month: u32) -> ReportingPeriod {
        ReportingPeriod::new(
            ReportingPeriodId::new(),
            NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
        )
    }

    fn row(
        period: &ReportingPeriod,
        user: UserId,
        contract: (ContractId, &str),
        euros: i64,
        estimated: bool,
    ) -> FullReport {
        FullReport {
            reporting_period_id: *period.id(),
            user_id: user,
            user_name: "someone".to_string(),
            role_id: None,
            role_name: None,
            contract_id: contract.0,
            contract_name: contract.1.to_string(),
            project_name: "Acme".to_string(),
            cost: Money::from_euros(euros),
            report_estimated: estimated,
        }
    }

    #[test]
    fn summary_counts_distinct_reporters_and_contracts() {
        let p = period(3);
        let (alice, bob) = (UserId::new(), UserId::new());
        let web = (ContractId::new(), "Web");
        let api = (ContractId::new(), "Api");
        let rows = vec![
            row(&p, alice, web, 100, false),
            row(&p, alice, api, 50, false),
            row(&p, bob, web, 70, true),
        ];

        let summary = PeriodSummary::build(&p, &rows);

        assert_eq!(summary.total_reporters, 2);
        assert_eq!(summary.total_contracts_reported, 2);
        assert_eq!(summary.total_cost, Money::from_euros(150));
        assert_eq!(summary.projected_cost, Money::from_euros(220));
        assert_eq!(summary.contracts[0].contract_name, "Api");
        assert_eq!(summary.contracts[1].cost, Money::from_euros(100));
        assert_eq!(summary.contracts[1].projected_cost, Money::from_euros(170));
    }

    #[test]
    fn summary_ignores_other_periods() {
        let march = period(3);
        let april = period(4);
        let rows = vec![row(&april, UserId::new(), (ContractId::new(), "Web"), 10, false)];

        let summary = PeriodSummary::build(&march, &rows);
        assert_eq!(summary.total_reporters, 0);
        assert_eq!(summary.total_cost, Money::ZERO);
        assert!(summary.contracts.is_empty());
    }

    #[test]
    fn cost_history_is_newest_first() {
        let march = period(3);
        let may = period(5);
        let rows = vec![
            row(&march, UserId::new(), (ContractId::new(), "Web"), 10, false),
            row(&may, UserId::new(), (ContractId::new(), "Web"), 30, false),
        ];

        let history = cost_history(&[march.clone(), may.clone()], &rows);
        assert_eq!(history[0].date, may.date());
        assert_eq!(history[0].cost, Money::from_euros(30));
        assert_eq!(history[1].cost, Money::from_euros(10));
    }
}
