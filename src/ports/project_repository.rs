//! Project repository port.

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::Project;
use async_trait::async_trait;

/// Repository port for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Save a new project.
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// Find a project by its ID.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;
}
