//! Contract repository port (write side).
//!
//! Defines the contract for persisting and retrieving Contract aggregates.
//!
//! # Design
//!
//! - **Unique names**: implementations reject a second contract with the same
//!   name with `ContractNameTaken`
//! - **Cascade**: deleting a contract removes its report parts, non-staff costs
//!   and progress reports

use crate::domain::contract::Contract;
use crate::domain::foundation::{ContractId, DomainError};
use async_trait::async_trait;

/// Repository port for Contract aggregate persistence.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Save a new contract.
    ///
    /// # Errors
    ///
    /// - `ContractNameTaken` if another contract has the same name
    /// - `DatabaseError` on persistence failure
    async fn save(&self, contract: &Contract) -> Result<(), DomainError>;

    /// Update an existing contract.
    ///
    /// # Errors
    ///
    /// - `ContractNotFound` if contract doesn't exist
    /// - `ContractNameTaken` if renamed onto an existing name
    /// - `DatabaseError` on persistence failure
    async fn update(&self, contract: &Contract) -> Result<(), DomainError>;

    /// Find a contract by its ID.
    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError>;

    /// Find a contract by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Contract>, DomainError>;

    /// Delete a contract and everything it owns.
    ///
    /// # Errors
    ///
    /// - `ContractNotFound` if contract doesn't exist
    async fn delete(&self, id: &ContractId) -> Result<(), DomainError>;
}
