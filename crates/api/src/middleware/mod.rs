//! Request extractors that guard handlers.
//!
//! - [`auth::RequireToken`] -- Requires the shared bearer secret.

pub mod auth;
