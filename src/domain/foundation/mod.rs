//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the reporting domain.

mod errors;
mod ids;
mod money;
mod month;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ContractId, ProgressReportId, ProjectId, ReportId, ReportingPeriodId, RoleId, TeamId, UserId,
};
pub use money::{round_currency, Money, CURRENCY_SCALE};
pub use month::Month;
pub use percentage::{Percentage, PERCENTAGE_SCALE};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
