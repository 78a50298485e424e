//! Wishlist repository for database operations.
//!
//! Wishlist rows live directly under their owning key; there is no wishlist
//! aggregate row the way there is a cart row. Uniqueness per
//! `(owner, product)` is enforced by partial unique indexes.

use sqlx::{Row, SqlitePool};

use velora_core::{ProductId, WishlistItemId};

use super::RepositoryError;
use super::products::product_from_row;
use crate::models::{OwnerKey, WishlistItem, WishlistItemWithProduct};

const LIST_FOR_USER: &str = "SELECT wi.id AS item_id, wi.user_id, wi.guest_id, \
        p.id AS product_id, p.name AS product_name, p.price AS product_price, \
        p.old_price AS product_old_price, p.image_url AS product_image_url, \
        p.rating AS product_rating, p.reviews AS product_reviews, \
        p.tag AS product_tag, p.category AS product_category, \
        p.created_at AS product_created_at \
     FROM wishlist_items wi \
     JOIN products p ON p.id = wi.product_id \
     WHERE wi.user_id = ?1 \
     ORDER BY wi.rowid ASC";

const LIST_FOR_GUEST: &str = "SELECT wi.id AS item_id, wi.user_id, wi.guest_id, \
        p.id AS product_id, p.name AS product_name, p.price AS product_price, \
        p.old_price AS product_old_price, p.image_url AS product_image_url, \
        p.rating AS product_rating, p.reviews AS product_reviews, \
        p.tag AS product_tag, p.category AS product_category, \
        p.created_at AS product_created_at \
     FROM wishlist_items wi \
     JOIN products p ON p.id = wi.product_id \
     WHERE wi.guest_id = ?1 \
     ORDER BY wi.rowid ASC";

/// Repository for wishlist entries.
pub struct WishlistRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Remove the `(owner, product)` entry if present.
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        owner: &OwnerKey,
        product_id: &ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = match owner {
            OwnerKey::User(user_id) => {
                sqlx::query("DELETE FROM wishlist_items WHERE user_id = ?1 AND product_id = ?2")
                    .bind(user_id)
                    .bind(product_id)
                    .execute(self.pool)
                    .await?
            }
            OwnerKey::Guest(guest_id) => {
                sqlx::query("DELETE FROM wishlist_items WHERE guest_id = ?1 AND product_id = ?2")
                    .bind(guest_id)
                    .bind(product_id)
                    .execute(self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }

    /// Insert an `(owner, product)` entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the entry already exists (two
    /// toggles racing; arrival order decides).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        owner: &OwnerKey,
        product_id: &ProductId,
    ) -> Result<WishlistItem, RepositoryError> {
        let (user_id, guest_id) = match owner {
            OwnerKey::User(user_id) => (Some(user_id.clone()), None),
            OwnerKey::Guest(guest_id) => (None, Some(guest_id.clone())),
        };

        let item = WishlistItem {
            id: WishlistItemId::random(),
            user_id,
            guest_id,
            product_id: product_id.clone(),
        };

        sqlx::query(
            "INSERT INTO wishlist_items (id, user_id, guest_id, product_id) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&item.id)
        .bind(&item.user_id)
        .bind(&item.guest_id)
        .bind(&item.product_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("wishlist entry already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(item)
    }

    /// The owner's wishlist entries with product details joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if joined product data is invalid.
    pub async fn list_with_products(
        &self,
        owner: &OwnerKey,
    ) -> Result<Vec<WishlistItemWithProduct>, RepositoryError> {
        let rows = match owner {
            OwnerKey::User(user_id) => {
                sqlx::query(LIST_FOR_USER)
                    .bind(user_id)
                    .fetch_all(self.pool)
                    .await?
            }
            OwnerKey::Guest(guest_id) => {
                sqlx::query(LIST_FOR_GUEST)
                    .bind(guest_id)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        rows.iter()
            .map(|r| {
                let product = product_from_row(r, "product_")?;
                Ok(WishlistItemWithProduct {
                    item: WishlistItem {
                        id: r.try_get("item_id")?,
                        user_id: r.try_get("user_id")?,
                        guest_id: r.try_get("guest_id")?,
                        product_id: product.id.clone(),
                    },
                    product,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::products::ProductRepository;
    use crate::db::test_pool;
    use crate::models::NewProduct;
    use velora_core::{GuestId, Price};

    async fn seeded_product(pool: &SqlitePool) -> ProductId {
        ProductRepository::new(pool)
            .create(&NewProduct {
                name: "Keyboard".to_owned(),
                price: Price::parse("80").unwrap(),
                old_price: None,
                image_url: "/assets/keyboard.png".to_owned(),
                rating: 4.6,
                reviews: 42,
                tag: None,
                category: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_then_delete() {
        let pool = test_pool().await;
        let wishlists = WishlistRepository::new(&pool);
        let product_id = seeded_product(&pool).await;
        let owner = OwnerKey::Guest(GuestId::random());

        assert!(!wishlists.delete(&owner, &product_id).await.unwrap());

        let item = wishlists.create(&owner, &product_id).await.unwrap();
        assert_eq!(item.product_id, product_id);
        assert!(item.user_id.is_none());

        assert!(wishlists.delete(&owner, &product_id).await.unwrap());
        assert!(!wishlists.delete(&owner, &product_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_entry_conflicts() {
        let pool = test_pool().await;
        let wishlists = WishlistRepository::new(&pool);
        let product_id = seeded_product(&pool).await;
        let owner = OwnerKey::Guest(GuestId::random());

        wishlists.create(&owner, &product_id).await.unwrap();
        let err = wishlists.create(&owner, &product_id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_joins_products() {
        let pool = test_pool().await;
        let wishlists = WishlistRepository::new(&pool);
        let product_id = seeded_product(&pool).await;
        let owner = OwnerKey::Guest(GuestId::random());

        wishlists.create(&owner, &product_id).await.unwrap();

        let items = wishlists.list_with_products(&owner).await.unwrap();
        assert_eq!(items.len(), 1);
        let entry = items.first().unwrap();
        assert_eq!(entry.product.name, "Keyboard");
        assert_eq!(entry.item.product_id, product_id);

        // Another owner sees nothing.
        let other = OwnerKey::Guest(GuestId::random());
        assert!(wishlists.list_with_products(&other).await.unwrap().is_empty());
    }
}
