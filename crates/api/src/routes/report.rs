//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{home, report};
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// Static segments win over `/{id}`, so `word-count` is never read as an id.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /word-count               -> word_count
/// GET    /project/{project_id}     -> list_by_project
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// *      (unmatched)               -> protected_not_found
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::list).post(report::create))
        .route("/word-count", get(report::word_count))
        .route("/project/{project_id}", get(report::list_by_project))
        .route(
            "/{id}",
            get(report::get_by_id)
                .put(report::update)
                .delete(report::delete),
        )
        .fallback(home::protected_not_found)
}
