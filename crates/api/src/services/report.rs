//! Report service: owns report rows, enforces that every report points at an
//! existing project, and runs the repeated-word query.

use std::sync::Arc;

use tally_core::error::CoreError;
use tally_core::types::new_entity_id;
use tally_core::{validation, word_frequency};
use tally_db::models::report::{CreateReport, Report, UpdateReport};
use tally_db::repositories::ReportRepo;
use tally_db::{Store, StoreError};

use crate::error::{AppError, AppResult};
use crate::services::ProjectService;

const ID_REQUIRED: &str = "Report ID is required";

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn Store>,
    projects: ProjectService,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>, projects: ProjectService) -> Self {
        Self { store, projects }
    }

    /// All reports in store order.
    pub async fn list_reports(&self) -> AppResult<Vec<Report>> {
        Ok(ReportRepo::list(self.store.as_ref()).await?)
    }

    pub async fn get_report(&self, id: &str) -> AppResult<Report> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        let found = ReportRepo::find_by_id(self.store.as_ref(), &id).await?;
        found.ok_or_else(|| CoreError::not_found("Report", id).into())
    }

    /// Reports referencing `project_id`.
    ///
    /// Query only: an id that matches no project yields an empty list rather
    /// than `NotFound`.
    pub async fn list_reports_by_project(&self, project_id: &str) -> AppResult<Vec<Report>> {
        let project_id = validation::require(Some(project_id), "Project ID is required")?;
        Ok(ReportRepo::list_by_project(self.store.as_ref(), &project_id).await?)
    }

    pub async fn create_report(&self, input: &CreateReport) -> AppResult<Report> {
        const REQUIRED: &str = "Text and project ID are required and cannot be empty";

        let text = validation::require(input.text.as_deref(), REQUIRED)?;
        let project_id = validation::require(input.project_id.as_deref(), REQUIRED)?;
        self.projects.get_project(&project_id).await?;

        let report = Report {
            id: new_entity_id(),
            text,
            project_id,
        };
        ReportRepo::insert(self.store.as_ref(), &report)
            .await
            .map_err(|err| dangling_project(err, &report.project_id))?;

        tracing::info!(report_id = %report.id, project_id = %report.project_id, "Report created");
        Ok(report)
    }

    /// Apply a partial update and return the row as stored afterwards.
    ///
    /// A supplied `projectId` must name an existing project. All checks run
    /// before the store is touched.
    pub async fn update_report(&self, id: &str, input: &UpdateReport) -> AppResult<Report> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        self.get_report(&id).await?;

        validation::require_any(
            &[input.text.is_some(), input.project_id.is_some()],
            "At least one field (text or project ID) must be provided for update",
        )?;
        let changes = UpdateReport {
            text: validation::optional(input.text.as_deref(), "Text cannot be empty")?,
            project_id: validation::optional(
                input.project_id.as_deref(),
                "Project ID cannot be empty",
            )?,
        };
        if let Some(project_id) = &changes.project_id {
            self.projects.get_project(project_id).await?;
        }

        ReportRepo::update(self.store.as_ref(), &id, &changes)
            .await
            .map_err(|err| dangling_project(err, changes.project_id.as_deref().unwrap_or_default()))?;
        tracing::info!(report_id = %id, "Report updated");

        self.get_report(&id).await
    }

    /// Delete a single report. Never touches the owning project.
    pub async fn delete_report(&self, id: &str) -> AppResult<()> {
        let id = validation::require(Some(id), ID_REQUIRED)?;
        self.get_report(&id).await?;

        ReportRepo::delete(self.store.as_ref(), &id).await?;

        tracing::info!(report_id = %id, "Report deleted");
        Ok(())
    }

    /// Reports whose text repeats some word at least `min_count` times.
    ///
    /// Matching is case-insensitive and keeps listing order. A zero threshold
    /// means the default; a threshold no report reaches yields an empty list.
    pub async fn reports_with_repeated_word(&self, min_count: u32) -> AppResult<Vec<Report>> {
        let min_count = word_frequency::effective_min_count(min_count);

        let matching: Vec<Report> = ReportRepo::list(self.store.as_ref())
            .await?
            .into_iter()
            .filter(|report| word_frequency::has_repeated_word(&report.text, min_count))
            .collect();

        tracing::debug!(min_count, matched = matching.len(), "Repeated-word filter applied");
        Ok(matching)
    }
}

/// A foreign-key rejection means the project vanished between the existence
/// check and the write; report it the same way the check would have.
fn dangling_project(err: StoreError, project_id: &str) -> AppError {
    if err.is_foreign_key_violation() {
        tracing::warn!(project_id, "Project removed before report write committed");
        CoreError::not_found("Project", project_id).into()
    } else {
        err.into()
    }
}
