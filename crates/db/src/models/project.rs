//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use tally_core::types::EntityId;

use crate::store::{Row, StoreError};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

impl TryFrom<&Row> for Project {
    type Error = StoreError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.text("id")?,
            name: row.text("name")?,
            description: row.text("description")?,
        })
    }
}

/// DTO for creating a new project. Missing fields are reported as
/// validation errors by the service rather than rejected by the decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}
