//! Contract module - lifecycle, burn and income projections.

mod aggregate;
mod burn;
mod income;
mod status;

pub use aggregate::{Contract, MAX_NAME_LENGTH};
pub use burn::{BurnCalculator, ContractFinancials, CostTotals};
pub use income::{linear_income, monthly_incomes, MonthlyIncome};
pub use status::{ContractEvent, ContractStatus};
