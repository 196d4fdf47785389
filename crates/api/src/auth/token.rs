//! Shared-secret bearer token.
//!
//! Every protected endpoint accepts a single configured secret. The secret is
//! injected through [`ServerConfig`](crate::config::ServerConfig) rather than
//! read from ambient state, and candidate tokens are compared in constant time.

use std::fmt;

use subtle::ConstantTimeEq;

/// Default secret used when `AUTH_TOKEN` is not set (local development only).
pub const DEFAULT_AUTH_TOKEN: &str = "Password123";

/// The configured bearer secret. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Compare `candidate` against the secret without short-circuiting on the
    /// first differing byte. Length differences still return early.
    pub fn verify(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
