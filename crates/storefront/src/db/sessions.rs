//! Session repository for database operations.

use sqlx::{Row, SqlitePool};

use velora_core::SessionToken;

use super::RepositoryError;
use crate::models::Session;

/// Repository for session token rows.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a session row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, session: &Session) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)")
            .bind(&session.token)
            .bind(&session.user_id)
            .bind(session.expires_at)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Fetch a session row by token, expired or not.
    ///
    /// Expiry is the caller's concern; this is a plain lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, token: &SessionToken) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT token, user_id, expires_at FROM sessions WHERE token = ?1")
            .bind(token)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(Session {
                token: r.try_get("token")?,
                user_id: r.try_get("user_id")?,
                expires_at: r.try_get("expires_at")?,
            })),
            None => Ok(None),
        }
    }

    /// Delete all rows matching the token.
    ///
    /// Deleting zero rows is not an error; returns the number deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, token: &SessionToken) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
