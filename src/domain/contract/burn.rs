//! Burn calculator: budget consumption and completion metrics for a contract.
//!
//! All derived values are rounded to cents. A missing budget (or a zero one,
//! which cannot be divided by) makes every budget-relative metric undefined.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{linear_income, Contract};
use crate::domain::foundation::{round_currency, ContractId, Money, Percentage};

/// Cost sums booked against a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostTotals {
    /// Staff cost from reports that are final.
    pub reported: Money,
    /// Staff cost from reports that are still estimates.
    pub estimated: Money,
    /// Costs not tied to staff time.
    pub non_staff: Money,
}

/// Computes burn metrics for one contract from its cost totals and progress.
#[derive(Debug, Clone, Copy)]
pub struct BurnCalculator<'a> {
    contract: &'a Contract,
    costs: CostTotals,
    percent_complete: Option<Percentage>,
}

impl<'a> BurnCalculator<'a> {
    /// `percent_complete` is the percentage of the latest progress report, if any.
    pub fn new(
        contract: &'a Contract,
        costs: CostTotals,
        percent_complete: Option<Percentage>,
    ) -> Self {
        Self {
            contract,
            costs,
            percent_complete,
        }
    }

    /// Staff cost plus non-staff cost; estimates only count with projections.
    pub fn total_burn(&self, include_projections: bool) -> Money {
        let staff = if include_projections {
            self.costs.reported + self.costs.estimated
        } else {
            self.costs.reported
        };
        staff + self.costs.non_staff
    }

    /// Share of the budget consumed, in percent.
    ///
    /// `None` when the budget is absent or zero; a zero budget has no share
    /// to measure against.
    pub fn burn_percentage(&self, include_projections: bool) -> Option<Decimal> {
        let budget = self.divisible_budget()?;
        let burn = self.total_burn(include_projections).amount();
        Some(round_currency(burn / budget * Decimal::ONE_HUNDRED))
    }

    /// Budget earned by the progress made so far; zero when unknown.
    pub fn completion_burn(&self) -> Money {
        match (self.contract.budget(), self.percent_complete) {
            (Some(budget), Some(pct)) => {
                Money::new(round_currency(budget.amount() * pct.value() / Decimal::ONE_HUNDRED))
            }
            _ => Money::ZERO,
        }
    }

    /// Completion burn relative to the budget, in percent.
    ///
    /// `None` when progress is unknown or the budget is absent or zero.
    pub fn completion_burn_percentage(&self) -> Option<Decimal> {
        self.percent_complete?;
        let budget = self.divisible_budget()?;
        let completion = self.completion_burn().amount();
        Some(round_currency(completion / budget * Decimal::ONE_HUNDRED))
    }

    /// Monthly income if the budget were earned evenly.
    pub fn linear_income(&self) -> Option<Money> {
        linear_income(self.contract)
    }

    /// All metrics at once.
    pub fn financials(&self) -> ContractFinancials {
        ContractFinancials {
            contract_id: *self.contract.id(),
            budget: self.contract.budget(),
            percent_complete: self.percent_complete,
            total_burn: self.total_burn(false),
            projected_burn: self.total_burn(true),
            burn_percentage: self.burn_percentage(false),
            projected_burn_percentage: self.burn_percentage(true),
            completion_burn: self.completion_burn(),
            completion_burn_percentage: self.completion_burn_percentage(),
            linear_income: self.linear_income(),
        }
    }

    /// The budget as a divisor: absent and zero budgets both yield `None`.
    fn divisible_budget(&self) -> Option<Decimal> {
        self.contract
            .budget()
            .map(|budget| budget.amount())
            .filter(|amount| !amount.is_zero())
    }
}

/// Snapshot of a contract's financial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFinancials {
    pub contract_id: ContractId,
    pub budget: Option<Money>,
    pub percent_complete: Option<Percentage>,
    pub total_burn: Money,
    pub projected_burn: Money,
    pub burn_percentage: Option<Decimal>,
    pub projected_burn_percentage: Option<Decimal>,
    pub completion_burn: Money,
    pub completion_burn_percentage: Option<Decimal>,
    pub linear_income: Option<Money>,
}
