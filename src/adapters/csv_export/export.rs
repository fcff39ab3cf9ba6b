//! CSV writers built on the `csv` crate.
//!
//! Dates are written as `dd/mm/YYYY`, money with two decimals and missing
//! values as empty cells.

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, Money};
use crate::domain::reporting::{FullReport, ReportingPeriod};
use crate::ports::ContractOverview;

const CONTRACT_HEADER: [&str; 7] = [
    "Project",
    "Contract",
    "Start date",
    "End Date",
    "Budget (EUR)",
    "Internal?",
    "Status",
];

const PERIOD_HEADER: [&str; 6] = [
    "User",
    "Role",
    "Project",
    "Contract",
    "Cost (EUR)",
    "Estimated?",
];

/// Renders the contract list, one row per contract in the given order.
pub fn contracts_to_csv(contracts: &[ContractOverview]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CONTRACT_HEADER).map_err(export_failed)?;

    for contract in contracts {
        writer
            .write_record([
                contract.project_name.clone(),
                contract.name.clone(),
                format_date(contract.start_date),
                format_date(contract.end_date),
                format_money(contract.budget),
                contract.is_internal().to_string(),
                contract.status.humanize().to_string(),
            ])
            .map_err(export_failed)?;
    }

    finish(writer)
}

/// Renders the rows of one period, one line per user and contract.
pub fn period_reports_to_csv(rows: &[FullReport]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PERIOD_HEADER).map_err(export_failed)?;

    for row in rows {
        writer
            .write_record([
                row.user_name.clone(),
                row.role_name.clone().unwrap_or_default(),
                row.project_name.clone(),
                row.contract_name.clone(),
                format_money(Some(row.cost)),
                row.report_estimated.to_string(),
            ])
            .map_err(export_failed)?;
    }

    finish(writer)
}

/// Download name for a period export, e.g. `report-2024-03-01.csv`.
pub fn period_export_file_name(period: &ReportingPeriod) -> String {
    format!("report-{}.csv", period.display_name())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn format_money(amount: Option<Money>) -> String {
    amount.map(|m| m.rounded().to_string()).unwrap_or_default()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, DomainError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| export_failed(e.error()))?;
    String::from_utf8(bytes).map_err(export_failed)
}

fn export_failed(e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::ExportFailed, format!("CSV export failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::ContractStatus;
    use crate::domain::foundation::{ContractId, ProjectId, ReportingPeriodId, UserId};

    fn overview() -> ContractOverview {
        ContractOverview {
            id: ContractId::new(),
            name: "Data platform".to_string(),
            project_id: ProjectId::new(),
            project_name: "Acme".to_string(),
            project_billable: false,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            budget: Some(Money::from_euros(12000)),
            status: ContractStatus::Live,
        }
    }

    #[test]
    fn contracts_csv_has_header_and_formatted_row() {
        let csv = contracts_to_csv(&[overview()]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Project,Contract,Start date,End Date,Budget (EUR),Internal?,Status")
        );
        assert_eq!(
            lines.next(),
            Some("Acme,Data platform,15/01/2024,31/12/2024,12000.00,true,Live")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn contracts_csv_leaves_missing_values_empty() {
        let contract = ContractOverview {
            start_date: None,
            end_date: None,
            budget: None,
            project_billable: true,
            status: ContractStatus::Proposal,
            ..overview()
        };
        let csv = contracts_to_csv(&[contract]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("Acme,Data platform,,,,false,Proposal"));
    }

    #[test]
    fn contracts_csv_quotes_commas() {
        let contract = ContractOverview {
            name: "Audit, phase 2".to_string(),
            ..overview()
        };
        let csv = contracts_to_csv(&[contract]).unwrap();
        assert!(csv.contains("\"Audit, phase 2\""));
    }

    #[test]
    fn period_csv_lists_rows() {
        let row = FullReport {
            reporting_period_id: ReportingPeriodId::new(),
            user_id: UserId::new(),
            user_name: "Ada".to_string(),
            role_id: None,
            role_name: None,
            contract_id: ContractId::new(),
            contract_name: "Data platform".to_string(),
            project_name: "Acme".to_string(),
            cost: Money::from_cents(123456),
            report_estimated: true,
        };
        let csv = period_reports_to_csv(&[row]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "User,Role,Project,Contract,Cost (EUR),Estimated?");
        assert_eq!(lines[1], "Ada,,Acme,Data platform,1234.56,true");
    }

    #[test]
    fn export_file_name_uses_period_date() {
        let period = ReportingPeriod::new(
            ReportingPeriodId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(period_export_file_name(&period), "report-2024-03-01.csv");
    }
}
