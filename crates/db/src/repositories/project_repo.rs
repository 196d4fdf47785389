//! Repository for the `projects` table.

use crate::models::project::{Project, UpdateProject};
use crate::store::{Params, Store, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a fully formed project row.
    pub async fn insert(store: &dyn Store, project: &Project) -> Result<(), StoreError> {
        store
            .execute(
                "INSERT INTO projects (id, name, description) VALUES (:id, :name, :description)",
                &Params::new()
                    .bind("id", &project.id)
                    .bind("name", &project.name)
                    .bind("description", &project.description),
            )
            .await
    }

    /// Find a project by id. Returns the first match.
    pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Option<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = :id");
        let rows = store.query(&query, &Params::new().bind("id", id)).await?;
        rows.first().map(Project::try_from).transpose()
    }

    /// List all projects in store order.
    pub async fn list(store: &dyn Store) -> Result<Vec<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects");
        let rows = store.query(&query, &Params::new()).await?;
        rows.iter().map(Project::try_from).collect()
    }

    /// Update a project. Only non-`None` fields in `changes` are written; an
    /// empty change set issues no statement.
    pub async fn update(
        store: &dyn Store,
        id: &str,
        changes: &UpdateProject,
    ) -> Result<(), StoreError> {
        let mut assignments = Vec::new();
        let mut params = Params::new().bind("id", id);

        if let Some(name) = &changes.name {
            assignments.push("name = :name");
            params = params.bind("name", name);
        }
        if let Some(description) = &changes.description {
            assignments.push("description = :description");
            params = params.bind("description", description);
        }
        if assignments.is_empty() {
            return Ok(());
        }

        let statement = format!(
            "UPDATE projects SET {} WHERE id = :id",
            assignments.join(", ")
        );
        store.execute(&statement, &params).await
    }

    /// Permanently delete a project row. Reports must be removed first.
    pub async fn delete(store: &dyn Store, id: &str) -> Result<(), StoreError> {
        store
            .execute(
                "DELETE FROM projects WHERE id = :id",
                &Params::new().bind("id", id),
            )
            .await
    }
}
