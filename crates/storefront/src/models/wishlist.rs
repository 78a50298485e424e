//! Wishlist domain types.
//!
//! Wishlist membership is binary: a product is on an identity's wishlist or
//! it is not. There is no quantity and toggling an existing entry removes it.

use serde::Serialize;

use velora_core::{GuestId, ProductId, UserId, WishlistItemId};

use super::product::Product;

/// A wishlist entry, unique per `(owner, product)` pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Unique item ID.
    pub id: WishlistItemId,
    /// Owning user, for authenticated wishlists.
    pub user_id: Option<UserId>,
    /// Owning guest, for anonymous wishlists.
    pub guest_id: Option<GuestId>,
    /// Referenced product.
    pub product_id: ProductId,
}

/// A wishlist entry with its product details joined in.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistItemWithProduct {
    #[serde(flatten)]
    pub item: WishlistItem,
    pub product: Product,
}
