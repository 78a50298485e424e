//! Database operations for the storefront `SQLite` store.
//!
//! Stores all storefront state:
//!
//! ## Tables
//!
//! - `users` - Site authentication accounts
//! - `sessions` - Login session tokens (lazy expiry)
//! - `products` - Catalog reference data
//! - `carts` / `cart_items` - One cart per owning identity
//! - `wishlist_items` - Binary product membership per owning identity
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/storefront/migrations/` via
//! [`MIGRATOR`] and run by the binary at startup (and by tests against
//! in-memory databases).

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod carts;
pub mod products;
pub mod sessions;
pub mod users;
pub mod wishlists;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first use. Foreign keys are enforced and
/// a busy timeout keeps concurrent writers from failing fast.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Migrated single-connection in-memory pool for tests.
///
/// A plain `sqlite::memory:` URL opens a separate database per connection,
/// so the pool is capped at one connection.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::from_str("sqlite::memory:")
                .unwrap()
                .foreign_keys(true),
        )
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}
