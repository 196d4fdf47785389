use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::token::{SharedSecret, DEFAULT_AUTH_TOKEN};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Which origins the CORS layer admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials.
    Any,
    /// An explicit allow-list, with credentials.
    List(Vec<HeaderValue>),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// sqlx connection URL (default: in-memory SQLite).
    pub database_url: String,
    /// Bearer secret required by all project and report endpoints.
    pub auth_token: SharedSecret,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default            |
    /// |------------------------|--------------------|
    /// | `HOST`                 | `0.0.0.0`          |
    /// | `PORT`                 | `3000`             |
    /// | `DATABASE_URL`         | `sqlite::memory:`  |
    /// | `AUTH_TOKEN`           | `Password123`      |
    /// | `CORS_ORIGINS`         | `*`                |
    /// | `REQUEST_TIMEOUT_SECS` | `30`               |
    /// | `LOG_FORMAT`           | `text`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_owned());

        let host = var("HOST", "0.0.0.0");
        let port = parse("PORT", &var("PORT", "3000"), "port number")?;
        let database_url = var("DATABASE_URL", "sqlite::memory:");

        let auth_token = var("AUTH_TOKEN", DEFAULT_AUTH_TOKEN);
        if auth_token.trim().is_empty() {
            return Err(ConfigError::Empty { var: "AUTH_TOKEN" });
        }

        let cors_origins = parse_cors_origins(&var("CORS_ORIGINS", "*"))?;
        let request_timeout_secs = parse(
            "REQUEST_TIMEOUT_SECS",
            &var("REQUEST_TIMEOUT_SECS", "30"),
            "number of seconds",
        )?;

        let log_format = match var("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "log format (text or json)",
                    value: other.to_owned(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            auth_token: SharedSecret::new(auth_token),
            cors_origins,
            request_timeout_secs,
            log_format,
        })
    }
}

fn parse<T: FromStr>(var: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: value.to_owned(),
    })
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|_| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                expected: "origin",
                value: o.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}
