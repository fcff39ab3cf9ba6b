//! Reporting Backend - Time reporting administration core
//!
//! Contract lifecycle and burn metrics, progress snapshots with
//! self-healing deltas, and reporting period roll-ups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
