//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate through repositories; query handlers read through
//! readers and domain roll-ups.

pub mod handlers;

pub use handlers::*;
