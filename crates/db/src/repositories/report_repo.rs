//! Repository for the `reports` table.

use crate::models::report::{Report, UpdateReport};
use crate::store::{Params, Store, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, project_id";

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a fully formed report row.
    pub async fn insert(store: &dyn Store, report: &Report) -> Result<(), StoreError> {
        store
            .execute(
                "INSERT INTO reports (id, text, project_id) VALUES (:id, :text, :project_id)",
                &Params::new()
                    .bind("id", &report.id)
                    .bind("text", &report.text)
                    .bind("project_id", &report.project_id),
            )
            .await
    }

    /// Find a report by id. Returns the first match.
    pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Option<Report>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = :id");
        let rows = store.query(&query, &Params::new().bind("id", id)).await?;
        rows.first().map(Report::try_from).transpose()
    }

    /// List all reports in store order.
    pub async fn list(store: &dyn Store) -> Result<Vec<Report>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM reports");
        let rows = store.query(&query, &Params::new()).await?;
        rows.iter().map(Report::try_from).collect()
    }

    /// List the reports referencing `project_id`.
    pub async fn list_by_project(
        store: &dyn Store,
        project_id: &str,
    ) -> Result<Vec<Report>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE project_id = :project_id");
        let rows = store
            .query(&query, &Params::new().bind("project_id", project_id))
            .await?;
        rows.iter().map(Report::try_from).collect()
    }

    /// Update a report. Only non-`None` fields in `changes` are written; an
    /// empty change set issues no statement.
    pub async fn update(
        store: &dyn Store,
        id: &str,
        changes: &UpdateReport,
    ) -> Result<(), StoreError> {
        let mut assignments = Vec::new();
        let mut params = Params::new().bind("id", id);

        if let Some(text) = &changes.text {
            assignments.push("text = :text");
            params = params.bind("text", text);
        }
        if let Some(project_id) = &changes.project_id {
            assignments.push("project_id = :project_id");
            params = params.bind("project_id", project_id);
        }
        if assignments.is_empty() {
            return Ok(());
        }

        let statement = format!(
            "UPDATE reports SET {} WHERE id = :id",
            assignments.join(", ")
        );
        store.execute(&statement, &params).await
    }

    /// Permanently delete a single report.
    pub async fn delete(store: &dyn Store, id: &str) -> Result<(), StoreError> {
        store
            .execute(
                "DELETE FROM reports WHERE id = :id",
                &Params::new().bind("id", id),
            )
            .await
    }

    /// Delete every report referencing `project_id`.
    pub async fn delete_by_project(store: &dyn Store, project_id: &str) -> Result<(), StoreError> {
        store
            .execute(
                "DELETE FROM reports WHERE project_id = :project_id",
                &Params::new().bind("project_id", project_id),
            )
            .await
    }
}
