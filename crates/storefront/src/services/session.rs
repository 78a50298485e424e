//! Session management.
//!
//! Issues, resolves, and revokes login session tokens, and builds the
//! matching `Set-Cookie` values. Expiry is evaluated lazily at resolution
//! time; nothing sweeps expired rows.

use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use sqlx::SqlitePool;

use velora_core::{SessionToken, UserId};

use crate::db::RepositoryError;
use crate::db::sessions::SessionRepository;
use crate::models::Session;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Fixed session lifetime in days.
const SESSION_TTL_DAYS: i64 = 7;

/// Session manager.
pub struct SessionManager<'a> {
    sessions: SessionRepository<'a>,
}

impl<'a> SessionManager<'a> {
    /// Create a new session manager.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            sessions: SessionRepository::new(pool),
        }
    }

    /// Issue a new session for the user.
    ///
    /// Every call persists a fresh row; concurrent sessions per user are
    /// unbounded. The caller attaches [`session_cookie`] to the response.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the row cannot be persisted.
    pub async fn create_session(&self, user_id: &UserId) -> Result<Session, RepositoryError> {
        let session = Session {
            token: SessionToken::random(),
            user_id: user_id.clone(),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        };

        self.sessions.create(&session).await?;

        Ok(session)
    }

    /// Resolve a token to its user, if the session exists and is unexpired.
    ///
    /// A missing or expired token is the unauthenticated outcome, not an
    /// error; expired rows are left in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for lookup failures (infrastructure),
    /// which callers surface as a fatal request error.
    pub async fn resolve_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserId>, RepositoryError> {
        Ok(self
            .sessions
            .get(token)
            .await?
            .filter(|session| session.expires_at > Utc::now())
            .map(|session| session.user_id))
    }

    /// Revoke all sessions matching the token.
    ///
    /// Idempotent: revoking an unknown token deletes nothing and succeeds.
    /// The caller attaches [`clear_session_cookie`] to the response.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the delete fails.
    pub async fn revoke_session(&self, token: &SessionToken) -> Result<(), RepositoryError> {
        self.sessions.delete(token).await?;
        Ok(())
    }
}

/// Build the `Set-Cookie` value carrying a freshly issued session token.
///
/// HTTP-only, `SameSite=Lax`, site-wide path, expiring with the session.
/// `secure` should be true whenever the storefront is served over HTTPS.
#[must_use]
pub fn session_cookie(session: &Session, secure: bool) -> String {
    Cookie::build((SESSION_COOKIE_NAME, session.token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::days(SESSION_TTL_DAYS))
        .build()
        .to_string()
}

/// Build the expired `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .expires(cookie::time::OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}
