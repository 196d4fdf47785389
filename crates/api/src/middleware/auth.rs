//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tally_core::error::CoreError;

use crate::auth::token::bearer_token;
use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured bearer secret.
///
/// Add it as the first parameter of any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(_auth: RequireToken) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireToken;

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| CoreError::unauthorized("Access token is required"))?;

        if !state.config.auth_token.verify(token) {
            tracing::debug!("Rejected request with invalid access token");
            return Err(CoreError::unauthorized("Invalid access token").into());
        }

        Ok(RequireToken)
    }
}
