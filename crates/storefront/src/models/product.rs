//! Product domain types.
//!
//! Catalog data is read-mostly reference data owned by catalog management;
//! the storefront lists it and references it by id from cart/wishlist rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use velora_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Pre-discount price, when the product is on sale.
    pub old_price: Option<Price>,
    /// Product image URL.
    pub image_url: String,
    /// Average review rating.
    pub rating: f64,
    /// Review count.
    pub reviews: i64,
    /// Badge text (e.g. "-35%").
    pub tag: Option<String>,
    /// Browsing category.
    pub category: Option<String>,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub old_price: Option<Price>,
    pub image_url: String,
    pub rating: f64,
    pub reviews: i64,
    pub tag: Option<String>,
    pub category: Option<String>,
}
