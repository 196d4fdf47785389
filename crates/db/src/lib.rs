//! Persistence layer: connection pool, schema migrations, the named-parameter
//! store gateway and the per-entity repositories built on top of it.

use sqlx::any::AnyPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::{Params, Row, SqlStore, Store, StoreError};

/// Pool over whichever driver `DATABASE_URL` selects (SQLite or PostgreSQL).
pub type DbPool = sqlx::AnyPool;

/// Create a connection pool from a database URL.
///
/// In-memory SQLite databases live only as long as their connection, so for
/// those the pool is pinned to a single connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let options = if is_in_memory(database_url) {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        AnyPoolOptions::new().max_connections(20)
    };

    options.connect(database_url).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations (creates the `projects` and `reports` tables).
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite")
        && (database_url.contains(":memory:") || database_url.contains("mode=memory"))
}
