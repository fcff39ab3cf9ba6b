//! GetIncomeForecastHandler - Monthly income of live contracts around today.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::contract::{monthly_incomes, ContractStatus};
use crate::domain::foundation::{ContractId, DomainError, Money, Month};
use crate::ports::ContractReader;

/// Query for the income forecast relative to `today`.
#[derive(Debug, Clone)]
pub struct GetIncomeForecastQuery {
    pub today: NaiveDate,
}

/// One contract's income in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub contract_id: ContractId,
    pub contract_name: String,
    pub month: Month,
    pub amount: Money,
}

/// Forecast rows, newest month first, and the months they cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeForecast {
    pub rows: Vec<ForecastRow>,
    /// Every month from the earliest to the latest row, newest first,
    /// including months without income.
    pub timeframe: Vec<Month>,
}

impl IncomeForecast {
    /// Sum of all rows in a month.
    pub fn total_for(&self, month: Month) -> Money {
        self.rows
            .iter()
            .filter(|row| row.month == month)
            .map(|row| row.amount)
            .sum()
    }
}

/// Handler for the income forecast.
pub struct GetIncomeForecastHandler {
    reader: Arc<dyn ContractReader>,
    months_back: i64,
    months_ahead: i64,
}

impl GetIncomeForecastHandler {
    /// Window of two months back and six ahead.
    pub fn new(reader: Arc<dyn ContractReader>) -> Self {
        Self::with_window(reader, 2, 6)
    }

    pub fn with_window(reader: Arc<dyn ContractReader>, months_back: i32, months_ahead: i32) -> Self {
        Self {
            reader,
            months_back: i64::from(months_back),
            months_ahead: i64::from(months_ahead),
        }
    }

    pub async fn handle(&self, query: GetIncomeForecastQuery) -> Result<IncomeForecast, DomainError> {
        let current = Month::of(query.today);
        let from = current.shifted(-self.months_back);
        let until = current.shifted(self.months_ahead);

        let contracts = self.reader.list_by_status(ContractStatus::Live).await?;

        let mut rows: Vec<ForecastRow> = contracts
            .iter()
            .flat_map(|contract| {
                monthly_incomes(contract)
                    .into_iter()
                    .filter(|income| income.month >= from && income.month <= until)
                    .map(|income| ForecastRow {
                        contract_id: income.contract_id,
                        contract_name: contract.name().to_string(),
                        month: income.month,
                        amount: income.amount,
                    })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.month
                .cmp(&a.month)
                .then_with(|| a.contract_name.cmp(&b.contract_name))
        });

        // rows are sorted newest first
        let timeframe = match (rows.last(), rows.first()) {
            (Some(earliest), Some(latest)) => {
                let mut months = Month::range_inclusive(earliest.month, latest.month);
                months.reverse();
                months
            }
            _ => Vec::new(),
        };

        tracing::debug!(rows = rows.len(), %from, %until, "Income forecast computed");
        Ok(IncomeForecast { rows, timeframe })
    }
}
