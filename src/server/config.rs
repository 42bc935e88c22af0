//! Server Configuration
//!
//! Loads configuration from environment variables with development
//! defaults, and builds the SQLite connection pool.
//!
//! # Configuration Sources
//!
//! - `DATABASE_URL` - SQLite URL, default `sqlite:packpal.db`
//! - `SERVER_PORT` - listen port, default 8000 (read in `main`)
//! - `JWT_SECRET` - token signing secret (read by the session store)

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default database location for local development
const DEFAULT_DATABASE_URL: &str = "sqlite:packpal.db";

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, creates the database file if missing, turns on
/// foreign-key enforcement, and runs the embedded migrations.
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
        DEFAULT_DATABASE_URL.to_string()
    });

    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    tracing::info!("Database ready");
    Ok(pool)
}
