//! Linear income projection and the monthly income schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Contract;
use crate::domain::foundation::{round_currency, ContractId, Money, Month};

/// Budget spread evenly over every calendar month of the contract.
///
/// `None` when budget, start or end date is missing, or when the end date
/// falls in a month before the start date.
pub fn linear_income(contract: &Contract) -> Option<Money> {
    let budget = contract.budget()?;
    let start = Month::of(contract.start_date()?);
    let end = Month::of(contract.end_date()?);

    let months = Month::span_inclusive(start, end);
    if months < 1 {
        return None;
    }

    Some(Money::new(round_currency(budget.amount() / Decimal::from(months))))
}

/// One row of the monthly income view: what a contract earns in a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub contract_id: ContractId,
    pub month: Month,
    pub amount: Money,
}

/// Expands a contract into one income row per month of its schedule.
pub fn monthly_incomes(contract: &Contract) -> Vec<MonthlyIncome> {
    let (Some(amount), Some(start), Some(end)) =
        (linear_income(contract), contract.start_date(), contract.end_date())
    else {
        return Vec::new();
    };

    Month::range_inclusive(Month::of(start), Month::of(end))
        .into_iter()
        .map(|month| MonthlyIncome {
            contract_id: *contract.id(),
            month,
            amount,
        })
        .collect()
}
