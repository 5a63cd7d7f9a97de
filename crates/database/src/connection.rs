use crate::error::DbError;
use dotenvy::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// Reads `DATABASE_URL` from the environment (a `.env` file is honored when
/// present) and returns a pool shared across the whole application.
pub async fn connect() -> Result<PgPool, DbError> {
    // A missing .env file is fine; the variable may come from the real
    // environment.
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Database connection pool established.");
    Ok(pool)
}

/// Applies the embedded schema migrations.
///
/// Called once at startup so the schema is in place before the server
/// accepts requests.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Schema migrations applied.");
    Ok(())
}
