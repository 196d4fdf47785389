//! Project service: owns project rows and project existence checks.

use std::sync::Arc;

use tally_core::error::CoreError;
use tally_core::types::new_entity_id;
use tally_core::validation;
use tally_db::models::project::{CreateProject, Project, UpdateProject};
use tally_db::repositories::{ProjectRepo, ReportRepo};
use tally_db::Store;

use crate::error::AppResult;

const ID_REQUIRED: &str = "Project ID is required";

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All projects in store order.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        Ok(ProjectRepo::list(self.store.as_ref()).await?)
    }

    /// Look up a project by id.
    ///
    /// This is the existence check other services rely on: it fails with
    /// `Validation` for a blank id and `NotFound` when no row matches.
    pub async fn get_project(&self, id: &str) -> AppResult<Project> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        let found = ProjectRepo::find_by_id(self.store.as_ref(), &id).await?;
        found.ok_or_else(|| CoreError::not_found("Project", id).into())
    }

    pub async fn create_project(&self, input: &CreateProject) -> AppResult<Project> {
        const REQUIRED: &str = "Name and description are required and cannot be empty";

        let name = validation::require(input.name.as_deref(), REQUIRED)?;
        let description = validation::require(input.description.as_deref(), REQUIRED)?;

        let project = Project {
            id: new_entity_id(),
            name,
            description,
        };
        ProjectRepo::insert(self.store.as_ref(), &project).await?;

        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Apply a partial update and return the row as stored afterwards.
    ///
    /// Every check runs before the store is touched, so a rejected update
    /// leaves the project unchanged.
    pub async fn update_project(&self, id: &str, input: &UpdateProject) -> AppResult<Project> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        self.get_project(&id).await?;

        validation::require_any(
            &[input.name.is_some(), input.description.is_some()],
            "At least one field (name or description) must be provided for update",
        )?;
        let changes = UpdateProject {
            name: validation::optional(input.name.as_deref(), "Name cannot be empty")?,
            description: validation::optional(
                input.description.as_deref(),
                "Description cannot be empty",
            )?,
        };

        ProjectRepo::update(self.store.as_ref(), &id, &changes).await?;
        tracing::info!(project_id = %id, "Project updated");

        self.get_project(&id).await
    }

    /// Delete a project together with every report that references it.
    ///
    /// Reports go first so no report is ever left pointing at a missing project.
    pub async fn delete_project(&self, id: &str) -> AppResult<()> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        self.get_project(&id).await?;

        ReportRepo::delete_by_project(self.store.as_ref(), &id).await?;
        ProjectRepo::delete(self.store.as_ref(), &id).await?;

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}
