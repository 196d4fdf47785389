//! Public endpoints: API overview, health check and the JSON 404 fallback.

use axum::extract::{OriginalUri, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::middleware::auth::RequireToken;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
    db_healthy: bool,
    timestamp: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match tally_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        message: "API is running!",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /
pub async fn api_docs(headers: HeaderMap) -> Json<serde_json::Value> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let base_url = format!("http://{host}");

    Json(json!({
        "title": "Tally API",
        "baseUrl": base_url,
        "auth": "Bearer <AUTH_TOKEN>",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health - Health check",
            "GET /api/projects - List projects",
            "POST /api/projects - Create project",
            "GET /api/projects/{id} - Get project",
            "PUT /api/projects/{id} - Update project",
            "DELETE /api/projects/{id} - Delete project (and its reports)",
            "GET /api/reports - List reports",
            "POST /api/reports - Create report",
            "GET /api/reports/{id} - Get report",
            "PUT /api/reports/{id} - Update report",
            "DELETE /api/reports/{id} - Delete report",
            "GET /api/reports/project/{projectId} - List reports of a project",
            "GET /api/reports/word-count?minCount=3 - Reports repeating a word",
        ],
        "example": format!("curl -H \"Authorization: Bearer <AUTH_TOKEN>\" {base_url}/api/projects"),
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    route_not_found(&uri)
}

/// Fallback for unmatched paths under a protected prefix. The token is
/// checked first, so an unauthenticated caller gets 401 rather than 404.
pub async fn protected_not_found(_auth: RequireToken, OriginalUri(uri): OriginalUri) -> Response {
    route_not_found(&uri)
}

fn route_not_found(uri: &Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": {
                "message": format!("Route {uri} not found"),
                "code": "NOT_FOUND",
                "availableEndpoints": "GET /",
            },
        })),
    )
        .into_response()
}
