//! Wishlist route handlers.
//!
//! A single POST toggles membership; the response always states the
//! resulting membership explicitly so clients never have to guess.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Identity, WishlistItem, WishlistItemWithProduct};
use crate::services::wishlist::{WishlistService, WishlistToggle};
use crate::state::AppState;

use super::{bad_payload, parse_product_id};

// =============================================================================
// Request / Response Types
// =============================================================================

/// Toggle request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub product_id: String,
}

/// `{items}` envelope returned by the listing.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<WishlistItemWithProduct>,
}

/// `{removed: true}` envelope returned when a toggle removed the entry.
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: bool,
}

/// `{item}` envelope returned when a toggle added the entry.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub item: WishlistItem,
}

// =============================================================================
// Handlers
// =============================================================================

/// The current identity's wishlist; empty when anonymous.
pub async fn index(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ItemsResponse>, AppError> {
    let items = WishlistService::new(state.pool()).list(&identity).await?;

    Ok(Json(ItemsResponse { items }))
}

/// Toggle a product's membership on the current identity's wishlist.
pub async fn toggle(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body.map_err(bad_payload)?;
    let product_id = parse_product_id(&req.product_id)?;

    let outcome = WishlistService::new(state.pool())
        .toggle(&identity, &product_id)
        .await?;

    Ok(match outcome {
        WishlistToggle::Removed => Json(RemovedResponse { removed: true }).into_response(),
        WishlistToggle::Added(item) => Json(AddedResponse { item }).into_response(),
    })
}
