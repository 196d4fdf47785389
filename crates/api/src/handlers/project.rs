//! Handlers for the `/projects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tally_db::models::project::{CreateProject, Project, UpdateProject};

use crate::error::AppResult;
use crate::middleware::auth::RequireToken;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = state.projects.list_projects().await?;
    Ok(Json(ApiResponse::list(projects)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = state.projects.get_project(&id).await?;
    Ok(Json(ApiResponse::data(project)))
}

/// POST /api/projects
pub async fn create(
    _auth: RequireToken,
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    let Json(input) = payload?;
    let project = state.projects.create_project(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(project).with_message("Project created successfully")),
    ))
}

/// PUT /api/projects/{id}
pub async fn update(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let Json(input) = payload?;
    let project = state.projects.update_project(&id, &input).await?;
    Ok(Json(
        ApiResponse::data(project).with_message("Project updated successfully"),
    ))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.projects.delete_project(&id).await?;
    Ok(Json(ApiResponse::message("Project deleted successfully")))
}
