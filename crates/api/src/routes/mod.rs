pub mod home;
pub mod project;
pub mod report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree. Every route below requires the bearer token.
///
/// ```text
/// /projects                        list, create
/// /projects/{id}                   get, update, delete (cascades to reports)
///
/// /reports                         list, create
/// /reports/word-count              reports repeating a word (?minCount=)
/// /reports/project/{project_id}    reports of one project
/// /reports/{id}                    get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/reports", report::router())
}
