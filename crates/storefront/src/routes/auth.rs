//! Authentication route handlers.
//!
//! Signup and login both issue a session cookie on success; logout revokes
//! the presented token whether or not it still resolves.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::header,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::SessionCookie;
use crate::models::{Identity, User};
use crate::services::auth::AuthService;
use crate::services::session::{SessionManager, clear_session_cookie, session_cookie};
use crate::state::AppState;

use super::bad_payload;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `{user}` envelope returned by signup and login.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// `{user|null}` envelope returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<User>,
}

/// `{ok}` envelope returned by logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle signup: create the account and start a session.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body.map_err(bad_payload)?;

    let user = AuthService::new(state.pool())
        .signup(&req.email, req.name.as_deref(), &req.password)
        .await?;

    let session = SessionManager::new(state.pool())
        .create_session(&user.id)
        .await?;

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&session, state.secure_cookies()),
        )]),
        Json(UserResponse { user }),
    )
        .into_response())
}

/// Handle login: verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body.map_err(bad_payload)?;

    let user = AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await?;

    let session = SessionManager::new(state.pool())
        .create_session(&user.id)
        .await?;

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&session, state.secure_cookies()),
        )]),
        Json(UserResponse { user }),
    )
        .into_response())
}

/// Handle logout: revoke the presented session and clear the cookie.
///
/// Revoking an unknown or expired token is still a successful logout.
pub async fn logout(
    State(state): State<AppState>,
    SessionCookie(token): SessionCookie,
) -> Result<Response, AppError> {
    if let Some(token) = token {
        SessionManager::new(state.pool())
            .revoke_session(&token)
            .await?;
    }

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            clear_session_cookie(state.secure_cookies()),
        )]),
        Json(LogoutResponse { ok: true }),
    )
        .into_response())
}

/// Current account, or null when the request is not authenticated.
pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<MeResponse>, AppError> {
    let user = match identity.user_id() {
        Some(user_id) => AuthService::new(state.pool()).current_user(user_id).await?,
        None => None,
    };

    Ok(Json(MeResponse { user }))
}
