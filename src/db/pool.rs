use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool backing the document table.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .test_before_acquire(true)
        .connect(database_url)
        .await?;
    tracing::info!(
        "Database pool ready: max_connections={}, acquire_timeout={:?}",
        MAX_CONNECTIONS,
        ACQUIRE_TIMEOUT
    );
    Ok(pool)
}
