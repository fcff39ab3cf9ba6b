//! CSV exports for contracts and reporting periods.

mod export;

pub use export::{contracts_to_csv, period_export_file_name, period_reports_to_csv};
