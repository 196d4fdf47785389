//! Public routes mounted at the root (no authentication).

use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// ```text
/// GET /        -> api_docs
/// GET /health  -> health_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::api_docs))
        .route("/health", get(home::health_check))
}
