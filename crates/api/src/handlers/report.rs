//! Handlers for the `/reports` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tally_db::models::report::{CreateReport, Report, UpdateReport};

use crate::error::AppResult;
use crate::middleware::auth::RequireToken;
use crate::query::WordCountParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/reports
pub async fn list(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Report>>>> {
    let reports = state.reports.list_reports().await?;
    Ok(Json(ApiResponse::list(reports)))
}

/// GET /api/reports/{id}
pub async fn get_by_id(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Report>>> {
    let report = state.reports.get_report(&id).await?;
    Ok(Json(ApiResponse::data(report)))
}

/// GET /api/reports/project/{project_id}
pub async fn list_by_project(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Report>>>> {
    let reports = state.reports.list_reports_by_project(&project_id).await?;
    Ok(Json(ApiResponse::list(reports)))
}

/// GET /api/reports/word-count?minCount=N
pub async fn word_count(
    _auth: RequireToken,
    State(state): State<AppState>,
    params: Result<Query<WordCountParams>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<Report>>>> {
    let Query(params) = params?;
    let min_count = params.min_count();

    let reports = state.reports.reports_with_repeated_word(min_count).await?;
    Ok(Json(ApiResponse::list(reports).with_message(format!(
        "Reports where words appear at least {min_count} times"
    ))))
}

/// POST /api/reports
pub async fn create(
    _auth: RequireToken,
    State(state): State<AppState>,
    payload: Result<Json<CreateReport>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Report>>)> {
    let Json(input) = payload?;
    let report = state.reports.create_report(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(report).with_message("Report created successfully")),
    ))
}

/// PUT /api/reports/{id}
pub async fn update(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateReport>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Report>>> {
    let Json(input) = payload?;
    let report = state.reports.update_report(&id, &input).await?;
    Ok(Json(
        ApiResponse::data(report).with_message("Report updated successfully"),
    ))
}

/// DELETE /api/reports/{id}
pub async fn delete(
    _auth: RequireToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.reports.delete_report(&id).await?;
    Ok(Json(ApiResponse::message("Report deleted successfully")))
}
