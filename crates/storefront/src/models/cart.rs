//! Cart domain types.

use serde::Serialize;

use velora_core::{CartId, CartItemId, GuestId, ProductId, UserId};

use super::product::Product;

/// A cart row: one per owning identity, created lazily on first mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user, for authenticated carts.
    pub user_id: Option<UserId>,
    /// Owning guest, for anonymous carts.
    pub guest_id: Option<GuestId>,
}

/// A cart line item, unique per `(cart, product)` pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique item ID.
    pub id: CartItemId,
    /// Cart this line belongs to.
    pub cart_id: CartId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Always at least 1; repeat adds increment rather than duplicate.
    pub quantity: i64,
}

/// A cart line item with its product details joined in.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

/// A cart with its items and their product details, as returned by reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWithItems {
    pub id: CartId,
    pub user_id: Option<UserId>,
    pub guest_id: Option<GuestId>,
    pub items: Vec<CartItemWithProduct>,
}
