//! Catalog route handlers.
//!
//! Catalog management lives elsewhere; the storefront only lists.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::products::ProductRepository;
use crate::error::AppError;
use crate::models::Product;
use crate::state::AppState;

/// `{products}` envelope returned by the listing.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// List all products, oldest first.
pub async fn index(State(state): State<AppState>) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(Json(ProductsResponse { products }))
}
