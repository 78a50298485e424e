//! Identity resolution for inbound requests.
//!
//! Every cart/wishlist/auth request resolves to an [`Identity`] before
//! touching any aggregate:
//!
//! 1. A `session_token` cookie that resolves to a valid session wins
//!    outright; the guest header is then ignored entirely.
//! 2. Otherwise an `x-guest-id` header, when present, is trusted as-is.
//! 3. Neither resolves to `Anonymous`; operations that need an owner fail
//!    rather than inventing one.
//!
//! Trusting the guest header unverified is an accepted risk: any client can
//! claim any guest id, and the cart holds pre-purchase convenience state
//! only. A hardened variant would sign the guest id (e.g. HMAC) so claimed
//! ownership is checkable.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use cookie::Cookie;

use velora_core::{GuestId, SessionToken};

use crate::error::AppError;
use crate::guest::GUEST_ID_HEADER;
use crate::models::Identity;
use crate::services::session::{SESSION_COOKIE_NAME, SessionManager};
use crate::state::AppState;

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = session_token(&parts.headers) {
            // A missing or expired session falls through to guest resolution;
            // only a lookup failure aborts the request.
            let sessions = SessionManager::new(state.pool());
            if let Some(user_id) = sessions.resolve_session(&token).await? {
                return Ok(Self::User(user_id));
            }
        }

        Ok(guest_id(&parts.headers).map_or(Self::Anonymous, Self::Guest))
    }
}

/// Extractor for the raw session cookie value, without touching the store.
///
/// Logout uses this: it needs the token to revoke even when the session is
/// already expired.
pub struct SessionCookie(pub Option<SessionToken>);

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_token(&parts.headers)))
    }
}

/// The session token from the `Cookie` header, if any.
fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    Cookie::split_parse(raw.to_owned())
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| SessionToken::new(cookie.value()))
}

/// The guest identifier from the `x-guest-id` header, if any.
///
/// An empty value counts as absent.
fn guest_id(headers: &HeaderMap) -> Option<GuestId> {
    let value = headers.get(GUEST_ID_HEADER)?.to_str().ok()?;

    if value.is_empty() {
        None
    } else {
        Some(GuestId::new(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_session_token_found_among_other_cookies() {
        let headers = headers(&[(
            "cookie",
            "theme=dark; session_token=tok-42; locale=en",
        )]);
        assert_eq!(session_token(&headers), Some(SessionToken::new("tok-42")));
    }

    #[test]
    fn test_session_token_absent() {
        assert_eq!(session_token(&headers(&[("cookie", "theme=dark")])), None);
        assert_eq!(session_token(&headers(&[])), None);
    }

    #[test]
    fn test_guest_id_header() {
        let present = headers(&[(GUEST_ID_HEADER, "guest-7")]);
        assert_eq!(guest_id(&present), Some(GuestId::new("guest-7")));

        let empty = headers(&[(GUEST_ID_HEADER, "")]);
        assert_eq!(guest_id(&empty), None);

        assert_eq!(guest_id(&headers(&[])), None);
    }
}
