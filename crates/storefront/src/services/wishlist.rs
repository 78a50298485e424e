//! Wishlist service.
//!
//! A single toggle operation serves as both add and remove: the stored state
//! decides the outcome and the result always states the resulting membership
//! explicitly, so clients never have to guess across races. Concurrent
//! toggles of the same `(identity, product)` pair settle by arrival order.

use sqlx::SqlitePool;
use thiserror::Error;

use velora_core::ProductId;

use crate::db::RepositoryError;
use crate::db::wishlists::WishlistRepository;
use crate::models::{Identity, WishlistItem, WishlistItemWithProduct};

/// Errors from wishlist operations.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// No user session and no guest id; toggles need an owner.
    #[error("wishlist owner missing: no session and no guest id")]
    IdentityMissing,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a wishlist toggle: the resulting membership, stated explicitly.
#[derive(Debug)]
pub enum WishlistToggle {
    /// The product was on the wishlist and has been removed.
    Removed,
    /// The product was absent and has been added.
    Added(WishlistItem),
}

/// Wishlist service.
pub struct WishlistService<'a> {
    wishlists: WishlistRepository<'a>,
}

impl<'a> WishlistService<'a> {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            wishlists: WishlistRepository::new(pool),
        }
    }

    /// Toggle a product's membership on the identity's wishlist.
    ///
    /// Delete-if-present first; only an absent entry gets inserted. The
    /// delete doubles as the membership check, so there is no read-then-write
    /// window.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::IdentityMissing` for an anonymous identity.
    /// Returns `WishlistError::Repository` if a statement fails.
    pub async fn toggle(
        &self,
        identity: &Identity,
        product_id: &ProductId,
    ) -> Result<WishlistToggle, WishlistError> {
        let owner = identity.owner().ok_or(WishlistError::IdentityMissing)?;

        if self.wishlists.delete(&owner, product_id).await? {
            return Ok(WishlistToggle::Removed);
        }

        Ok(WishlistToggle::Added(
            self.wishlists.create(&owner, product_id).await?,
        ))
    }

    /// The identity's wishlist entries with product details.
    ///
    /// Empty for an anonymous identity or an owner with no entries; never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Repository` if the query fails.
    pub async fn list(
        &self,
        identity: &Identity,
    ) -> Result<Vec<WishlistItemWithProduct>, WishlistError> {
        match identity.owner() {
            Some(owner) => Ok(self.wishlists.list_with_products(&owner).await?),
            None => Ok(Vec::new()),
        }
    }
}
