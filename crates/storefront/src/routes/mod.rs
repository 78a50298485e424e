//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (database connectivity)
//!
//! # Auth
//! POST /auth/signup       - Create account, start session
//! POST /auth/login        - Start session
//! POST /auth/logout       - Revoke session, clear cookie
//! GET  /auth/me           - Current account, if any
//!
//! # Catalog
//! GET  /products          - Product listing
//!
//! # Cart
//! GET    /cart            - Current identity's cart
//! POST   /cart            - Add item (increments an existing line)
//! DELETE /cart            - Remove item by product id
//!
//! # Wishlist
//! GET  /wishlist          - Current identity's wishlist
//! POST /wishlist          - Toggle product membership
//! ```

pub mod auth;
pub mod cart;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    extract::State,
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
};

use velora_core::ProductId;

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/auth", auth_routes())
        .route("/products", get(products::index))
        .route(
            "/cart",
            get(cart::show).post(cart::add).delete(cart::remove),
        )
        .route("/wishlist", get(wishlist::index).post(wishlist::toggle))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Convert a body rejection into the 400 validation error.
pub(crate) fn bad_payload(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Validate the `productId` field shared by cart and wishlist payloads.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId, AppError> {
    if raw.is_empty() {
        return Err(AppError::Validation("productId must not be empty".to_string()));
    }

    Ok(ProductId::new(raw))
}
