//! Cart aggregate service.
//!
//! Owns the invariant that each identity maps to at most one cart and that
//! `(cart, product)` line items never duplicate. Cart creation happens lazily
//! on the first mutation; reads never create anything.

use sqlx::SqlitePool;
use thiserror::Error;

use velora_core::ProductId;

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::models::{CartItem, CartWithItems, Identity};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No user session and no guest id; cart mutations need an owner.
    #[error("cart owner missing: no session and no guest id")]
    IdentityMissing,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// The identity's cart with items, if one exists.
    ///
    /// `None` for an anonymous identity or an owner with no cart yet; a read
    /// has no side effects.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a lookup fails.
    pub async fn get_cart(&self, identity: &Identity) -> Result<Option<CartWithItems>, CartError> {
        match identity.owner() {
            Some(owner) => Ok(self.carts.get_with_items(&owner).await?),
            None => Ok(None),
        }
    }

    /// Add `quantity` of a product, creating the owning cart on first use.
    ///
    /// The cart creation step is an atomic insert-or-return-existing, so
    /// concurrent first-adds for the same identity share one cart row. An
    /// existing `(cart, product)` line is incremented by `quantity`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::IdentityMissing` for an anonymous identity.
    /// Returns `CartError::Repository` if a statement fails.
    pub async fn add_item(
        &self,
        identity: &Identity,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem, CartError> {
        let owner = identity.owner().ok_or(CartError::IdentityMissing)?;
        let cart = self.carts.upsert_for_owner(&owner).await?;
        Ok(self.carts.upsert_item(&cart.id, product_id, quantity).await?)
    }

    /// Remove a product's line item from the identity's cart.
    ///
    /// Removing from a nonexistent cart (including anonymously) is a no-op
    /// reported as `false`; otherwise returns whether a line was deleted.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a statement fails.
    pub async fn remove_item(
        &self,
        identity: &Identity,
        product_id: &ProductId,
    ) -> Result<bool, CartError> {
        let Some(owner) = identity.owner() else {
            return Ok(false);
        };

        let Some(cart) = self.carts.get_for_owner(&owner).await? else {
            return Ok(false);
        };

        Ok(self.carts.delete_items(&cart.id, product_id).await? > 0)
    }
}
