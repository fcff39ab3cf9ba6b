//! Contract command and query handlers.

mod change_contract_state;
mod create_contract;
mod export_contracts;
mod get_contract_financials;
mod get_income_forecast;

pub use change_contract_state::{
    ChangeContractStateCommand, ChangeContractStateHandler, ChangeContractStateResult,
};
pub use create_contract::{CreateContractCommand, CreateContractHandler, CreateContractResult};
pub use export_contracts::ExportContractsHandler;
pub use get_contract_financials::{GetContractFinancialsHandler, GetContractFinancialsQuery};
pub use get_income_forecast::{
    ForecastRow, GetIncomeForecastHandler, GetIncomeForecastQuery, IncomeForecast,
};
