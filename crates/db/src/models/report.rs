//! Report entity model and DTOs.

use serde::{Deserialize, Serialize};
use tally_core::types::EntityId;

use crate::store::{Row, StoreError};

/// A report row from the `reports` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: EntityId,
    pub text: String,
    pub project_id: EntityId,
}

impl TryFrom<&Row> for Report {
    type Error = StoreError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.text("id")?,
            text: row.text("text")?,
            project_id: row.text("project_id")?,
        })
    }
}

/// DTO for creating a new report. `projectid` is accepted as an alias of
/// `projectId` for older clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    pub text: Option<String>,
    #[serde(alias = "projectid")]
    pub project_id: Option<String>,
}

/// DTO for updating an existing report. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub text: Option<String>,
    #[serde(alias = "projectid")]
    pub project_id: Option<String>,
}
