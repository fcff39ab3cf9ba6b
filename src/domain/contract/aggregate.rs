//! Contract aggregate entity.
//!
//! A contract belongs to a project, carries an optional budget and schedule,
//! and moves through the [`ContractStatus`] lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ContractEvent, ContractStatus};
use crate::domain::foundation::{
    ContractId, DomainError, Money, ProjectId, StateMachine, Timestamp,
};
use crate::domain::project::Project;

/// Maximum length for contract names.
pub const MAX_NAME_LENGTH: usize = 255;

/// Contract aggregate.
///
/// # Invariants
///
/// - `name` is non-empty (global uniqueness is enforced by the repository)
/// - `aliases` is deduplicated and sorted
/// - `status` only changes through a permitted [`ContractEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    id: ContractId,
    project_id: ProjectId,
    name: String,
    budget: Option<Money>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: ContractStatus,
    aliases: Vec<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Contract {
    /// Create a new contract in the `proposal` state.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn new(id: ContractId, project_id: ProjectId, name: String) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            project_id,
            name,
            budget: None,
            start_date: None,
            end_date: None,
            status: ContractStatus::default(),
            aliases: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a contract from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ContractId,
        project_id: ProjectId,
        name: String,
        budget: Option<Money>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: ContractStatus,
        aliases: Vec<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            name,
            budget,
            start_date,
            end_date,
            status,
            aliases,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ContractId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> Option<Money> {
        self.budget
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Aliases rendered as a comma separated list.
    pub fn alias_list(&self) -> String {
        self.aliases.join(", ")
    }

    /// Display name including the project, e.g. `"Build [Acme - internal]"`.
    pub fn full_name(&self, project: &Project) -> String {
        let internal = if project.is_billable() { "" } else { " - internal" };
        format!("{} [{}{}]", self.name, project.name(), internal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the contract.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        Self::validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Set or clear the budget.
    pub fn set_budget(&mut self, budget: Option<Money>) {
        self.budget = budget;
        self.touch();
    }

    /// Set or clear the contract schedule.
    pub fn set_schedule(&mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
        self.start_date = start_date;
        self.end_date = end_date;
        self.touch();
    }

    /// Replace aliases from comma separated text.
    ///
    /// Entries are trimmed; blanks are dropped; the result is deduplicated and sorted.
    pub fn set_alias_list(&mut self, list: &str) {
        let mut aliases: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect();
        aliases.sort();
        aliases.dedup();
        self.aliases = aliases;
        self.touch();
    }

    /// Fire a lifecycle event.
    ///
    /// Returns the previous status on success.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the event is not permitted; status is left unchanged
    pub fn fire(&mut self, event: ContractEvent) -> Result<ContractStatus, DomainError> {
        let next = self.status.transition(event)?;
        let previous = std::mem::replace(&mut self.status, next);
        self.touch();
        Ok(previous)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Contract name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Contract name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn contract() -> Contract {
        Contract::new(ContractId::new(), ProjectId::new(), "Website".to_string()).unwrap()
    }

    #[test]
    fn new_contract_starts_as_proposal_without_budget() {
        let c = contract();
        assert_eq!(c.status(), ContractStatus::Proposal);
        assert_eq!(c.budget(), None);
        assert!(c.aliases().is_empty());
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = Contract::new(ContractId::new(), ProjectId::new(), "   ".to_string());
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn set_alias_list_strips_dedupes_and_sorts() {
        let mut c = contract();
        c.set_alias_list(" web , app,web,  ,api ");
        assert_eq!(c.aliases(), &["api", "app", "web"]);
        assert_eq!(c.alias_list(), "api, app, web");
    }

    #[test]
    fn fire_applies_permitted_event() {
        let mut c = contract();
        let previous = c.fire(ContractEvent::Start).unwrap();
        assert_eq!(previous, ContractStatus::Proposal);
        assert_eq!(c.status(), ContractStatus::Live);
    }

    #[test]
    fn fire_leaves_state_untouched_on_invalid_event() {
        let mut c = contract();
        let before = c.clone();
        let err = c.fire(ContractEvent::Finish).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(c, before);
    }

    #[test]
    fn full_name_marks_internal_projects() {
        let c = contract();
        let billable = Project::new(*c.project_id(), "Acme", true).unwrap();
        let internal = Project::new(*c.project_id(), "Acme", false).unwrap();
        assert_eq!(c.full_name(&billable), "Website [Acme]");
        assert_eq!(c.full_name(&internal), "Website [Acme - internal]");
    }
}
