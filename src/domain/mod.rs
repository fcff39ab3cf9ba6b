//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `project` - Projects and their billable flag
//! - `contract` - Contract lifecycle, burn calculator, income projection
//! - `progress` - Progress snapshots and the delta series
//! - `reporting` - Reporting periods, reports and period roll-ups

pub mod contract;
pub mod foundation;
pub mod progress;
pub mod project;
pub mod reporting;
