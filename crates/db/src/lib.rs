//! PostgreSQL persistence layer for bookline.
//!
//! One model module and one repository per logical table. Repositories are
//! zero-sized structs whose async methods take `&PgPool` as the first
//! argument; queries share their column lists through `const COLUMNS`
//! strings so row shapes stay in one place per table.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

/// Convenience alias for the shared connection pool.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe, used at process startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from the workspace `db/migrations`
/// directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
