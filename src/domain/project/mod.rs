//! Projects group contracts and decide whether their work is billable.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ProjectId};

/// A client or internal project owning one or more contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    billable: bool,
}

impl Project {
    /// Creates a project.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is blank
    pub fn new(id: ProjectId, name: impl Into<String>, billable: bool) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Project name cannot be empty"));
        }
        Ok(Self { id, name, billable })
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_billable(&self) -> bool {
        self.billable
    }

    /// Internal projects are the non-billable ones.
    pub fn is_internal(&self) -> bool {
        !self.billable
    }
}
