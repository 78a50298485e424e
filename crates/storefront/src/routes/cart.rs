//! Cart route handlers.
//!
//! The resolved [`Identity`] decides which cart a request addresses; the
//! handlers never pick an owner themselves.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{CartItem, CartWithItems, Identity};
use crate::services::cart::CartService;
use crate::state::AppState;

use super::{bad_payload, parse_product_id};

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add-item request body. Quantity defaults to one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

/// Remove-item request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub product_id: String,
}

/// `{cart|null}` envelope returned by reads.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Option<CartWithItems>,
}

/// `{item}` envelope returned by adds.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: CartItem,
}

/// `{removed}` envelope returned by removals.
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// The current identity's cart, or null when none exists.
pub async fn show(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<CartResponse>, AppError> {
    let cart = CartService::new(state.pool()).get_cart(&identity).await?;

    Ok(Json(CartResponse { cart }))
}

/// Add a product to the current identity's cart.
pub async fn add(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<ItemResponse>, AppError> {
    let Json(req) = body.map_err(bad_payload)?;
    let product_id = parse_product_id(&req.product_id)?;

    if req.quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let item = CartService::new(state.pool())
        .add_item(&identity, &product_id, req.quantity)
        .await?;

    Ok(Json(ItemResponse { item }))
}

/// Remove a product from the current identity's cart.
pub async fn remove(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Result<Json<RemovedResponse>, AppError> {
    let Json(req) = body.map_err(bad_payload)?;
    let product_id = parse_product_id(&req.product_id)?;

    let removed = CartService::new(state.pool())
        .remove_item(&identity, &product_id)
        .await?;

    Ok(Json(RemovedResponse { removed }))
}
