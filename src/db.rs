use std::time::Duration;

use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

use crate::error::AppError;

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

/// Budget for a single storage round-trip; expiry surfaces as a 500
/// instead of holding the request open indefinitely.
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Wrap the sqlx pool into a SeaORM handle so both share one set of
/// connections: sqlx for migrations, the health probe and audit writes,
/// SeaORM for entity queries.
pub fn orm_from_pool(pool: DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
}

pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Run a storage future under the request-scoped timeout.
pub async fn with_timeout<F, T, E>(fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    AppError: From<E>,
{
    match tokio::time::timeout(STORAGE_TIMEOUT, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Timeout),
    }
}
