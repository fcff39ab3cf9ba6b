//! GetContractFinancialsHandler - Query handler for burn and completion metrics.

use std::sync::Arc;

use crate::domain::contract::{BurnCalculator, ContractFinancials};
use crate::domain::foundation::{ContractId, DomainError, ErrorCode};
use crate::ports::{ContractReader, ContractRepository, ProgressReportRepository};

/// Query for the financial snapshot of one contract.
#[derive(Debug, Clone)]
pub struct GetContractFinancialsQuery {
    pub contract_id: ContractId,
}

/// Handler combining contract, cost totals and latest progress.
pub struct GetContractFinancialsHandler {
    contracts: Arc<dyn ContractRepository>,
    reader: Arc<dyn ContractReader>,
    progress: Arc<dyn ProgressReportRepository>,
}

impl GetContractFinancialsHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        reader: Arc<dyn ContractReader>,
        progress: Arc<dyn ProgressReportRepository>,
    ) -> Self {
        Self {
            contracts,
            reader,
            progress,
        }
    }

    pub async fn handle(
        &self,
        query: GetContractFinancialsQuery,
    ) -> Result<ContractFinancials, DomainError> {
        let contract = self
            .contracts
            .find_by_id(&query.contract_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ContractNotFound,
                    format!("Contract not found: {}", query.contract_id),
                )
            })?;

        let costs = self.reader.cost_totals(&query.contract_id).await?;
        let percent_complete = self
            .progress
            .find_latest(&query.contract_id)
            .await?
            .map(|report| report.percentage());

        tracing::debug!(contract_id = %query.contract_id, "Computing contract financials");
        Ok(BurnCalculator::new(&contract, costs, percent_complete).financials())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContractStore, InMemoryProgressReportRepository};
    use crate::domain::contract::Contract;
    use crate::domain::foundation::{Money, Percentage, ProjectId, ReportingPeriodId};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    struct Fixture {
        store: Arc<InMemoryContractStore>,
        progress: Arc<InMemoryProgressReportRepository>,
        handler: GetContractFinancialsHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryContractStore::new());
        let progress = Arc::new(InMemoryProgressReportRepository::new());
        let handler = GetContractFinancialsHandler::new(store.clone(), store.clone(), progress.clone());
        Fixture {
            store,
            progress,
            handler,
        }
    }

    async fn contract(store: &InMemoryContractStore, budget: Option<Money>) -> ContractId {
        let mut c = Contract::new(ContractId::new(), ProjectId::new(), "Build".to_string()).unwrap();
        c.set_budget(budget);
        c.set_schedule(NaiveDate::from_ymd_opt(2024, 1, 1), NaiveDate::from_ymd_opt(2024, 4, 30));
        ContractRepository::save(store, &c).await.unwrap();
        *c.id()
    }

    async fn progress_at(repo: &InMemoryProgressReportRepository, id: ContractId, pct: u8) {
        let mut tx = repo.begin_series(&id).await.unwrap();
        let report = crate::domain::progress::ProgressReport::record(
            id,
            ReportingPeriodId::new(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Percentage::from_whole(pct),
            None,
        );
        tx.insert(&report).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn combines_costs_budget_and_progress() {
        let f = fixture();
        let id = contract(&f.store, Some(Money::from_euros(1000))).await;
        f.store.record_staff_cost(id, Money::from_euros(200), false).await;
        f.store.record_staff_cost(id, Money::from_euros(50), true).await;
        f.store.record_non_staff_cost(id, Money::from_euros(100)).await;
        progress_at(&f.progress, id, 40).await;

        let financials = f
            .handler
            .handle(GetContractFinancialsQuery { contract_id: id })
            .await
            .unwrap();

        assert_eq!(financials.total_burn, Money::from_euros(300));
        assert_eq!(financials.projected_burn, Money::from_euros(350));
        assert_eq!(financials.burn_percentage, Some(Decimal::from(30)));
        assert_eq!(financials.projected_burn_percentage, Some(Decimal::from(35)));
        assert_eq!(financials.completion_burn, Money::from_euros(400));
        assert_eq!(financials.completion_burn_percentage, Some(Decimal::from(40)));
        assert_eq!(financials.linear_income, Some(Money::from_euros(250)));
    }

    #[tokio::test]
    async fn missing_budget_leaves_percentages_undefined() {
        let f = fixture();
        let id = contract(&f.store, None).await;
        f.store.record_staff_cost(id, Money::from_euros(200), false).await;

        let financials = f
            .handler
            .handle(GetContractFinancialsQuery { contract_id: id })
            .await
            .unwrap();

        assert_eq!(financials.total_burn, Money::from_euros(200));
        assert_eq!(financials.burn_percentage, None);
        assert_eq!(financials.completion_burn, Money::ZERO);
        assert_eq!(financials.completion_burn_percentage, None);
        assert_eq!(financials.linear_income, None);
    }

    #[tokio::test]
    async fn unknown_contract_is_not_found() {
        let f = fixture();
        let err = f
            .handler
            .handle(GetContractFinancialsQuery {
                contract_id: ContractId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ContractNotFound);
    }
}
