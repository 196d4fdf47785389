use std::sync::Arc;

use tally_db::{DbPool, SqlStore, Store};

use crate::config::ServerConfig;
use crate::services::{ProjectService, ReportService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (used directly only by the health check).
    pub pool: DbPool,
    /// Server configuration, including the bearer secret checked by the auth extractor.
    pub config: Arc<ServerConfig>,
    pub projects: ProjectService,
    pub reports: ReportService,
}

impl AppState {
    /// Wire the services to a [`SqlStore`] over `pool`.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let store: Arc<dyn Store> = Arc::new(SqlStore::new(pool.clone()));
        let projects = ProjectService::new(Arc::clone(&store));
        let reports = ReportService::new(store, projects.clone());

        Self {
            pool,
            config: Arc::new(config),
            projects,
            reports,
        }
    }
}
