//! Cart repository for database operations.
//!
//! One cart per owning identity. Cart creation is an atomic
//! insert-or-return-existing keyed on the owner column: the INSERT swallows
//! the uniqueness conflict and the follow-up read returns whichever row won.
//! There is deliberately no exists-check-then-insert anywhere; two concurrent
//! first-adds for the same owner collapse onto one row at the constraint.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use velora_core::{CartId, CartItemId, ProductId};

use super::RepositoryError;
use super::products::product_from_row;
use crate::models::{Cart, CartItem, CartItemWithProduct, CartWithItems, OwnerKey};

/// Repository for carts and their line items.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomic find-or-create for the owner's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails.
    pub async fn upsert_for_owner(&self, owner: &OwnerKey) -> Result<Cart, RepositoryError> {
        let id = CartId::random();

        match owner {
            OwnerKey::User(user_id) => {
                sqlx::query(
                    "INSERT INTO carts (id, user_id) VALUES (?1, ?2) \
                     ON CONFLICT(user_id) DO NOTHING",
                )
                .bind(&id)
                .bind(user_id)
                .execute(self.pool)
                .await?;
            }
            OwnerKey::Guest(guest_id) => {
                sqlx::query(
                    "INSERT INTO carts (id, guest_id) VALUES (?1, ?2) \
                     ON CONFLICT(guest_id) DO NOTHING",
                )
                .bind(&id)
                .bind(guest_id)
                .execute(self.pool)
                .await?;
            }
        }

        self.get_for_owner(owner).await?.ok_or_else(|| {
            RepositoryError::DataCorruption("cart row missing after upsert".to_owned())
        })
    }

    /// The owner's cart row, if one exists. Reads never create.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_owner(&self, owner: &OwnerKey) -> Result<Option<Cart>, RepositoryError> {
        let row = match owner {
            OwnerKey::User(user_id) => {
                sqlx::query("SELECT id, user_id, guest_id FROM carts WHERE user_id = ?1")
                    .bind(user_id)
                    .fetch_optional(self.pool)
                    .await?
            }
            OwnerKey::Guest(guest_id) => {
                sqlx::query("SELECT id, user_id, guest_id FROM carts WHERE guest_id = ?1")
                    .bind(guest_id)
                    .fetch_optional(self.pool)
                    .await?
            }
        };

        row.as_ref().map(cart_from_row).transpose()
    }

    /// The owner's cart with items and product details joined in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if joined product data is invalid.
    pub async fn get_with_items(
        &self,
        owner: &OwnerKey,
    ) -> Result<Option<CartWithItems>, RepositoryError> {
        let Some(cart) = self.get_for_owner(owner).await? else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT ci.id AS item_id, ci.cart_id, ci.quantity, \
                    p.id AS product_id, p.name AS product_name, p.price AS product_price, \
                    p.old_price AS product_old_price, p.image_url AS product_image_url, \
                    p.rating AS product_rating, p.reviews AS product_reviews, \
                    p.tag AS product_tag, p.category AS product_category, \
                    p.created_at AS product_created_at \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             WHERE ci.cart_id = ?1 \
             ORDER BY ci.rowid ASC",
        )
        .bind(&cart.id)
        .fetch_all(self.pool)
        .await?;

        let items = rows
            .iter()
            .map(|r| {
                let product = product_from_row(r, "product_")?;
                Ok(CartItemWithProduct {
                    item: CartItem {
                        id: r.try_get("item_id")?,
                        cart_id: r.try_get("cart_id")?,
                        product_id: product.id.clone(),
                        quantity: r.try_get("quantity")?,
                    },
                    product,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Some(CartWithItems {
            id: cart.id,
            user_id: cart.user_id,
            guest_id: cart.guest_id,
            items,
        }))
    }

    /// Add `quantity` of a product to a cart.
    ///
    /// An existing `(cart, product)` line is incremented rather than
    /// duplicated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails (including an
    /// unknown product id, which violates the foreign key).
    pub async fn upsert_item(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let id = CartItemId::random();

        let row = sqlx::query(
            "INSERT INTO cart_items (id, cart_id, product_id, quantity) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(cart_id, product_id) \
                 DO UPDATE SET quantity = quantity + excluded.quantity \
             RETURNING id, cart_id, product_id, quantity",
        )
        .bind(&id)
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(CartItem {
            id: row.try_get("id")?,
            cart_id: row.try_get("cart_id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
        })
    }

    /// Delete all line items matching `(cart, product)`.
    ///
    /// At most one should exist given the uniqueness constraint; returns the
    /// number deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_items(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1 AND product_id = ?2")
            .bind(cart_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Map a `carts` row to the domain type.
fn cart_from_row(row: &SqliteRow) -> Result<Cart, RepositoryError> {
    Ok(Cart {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        guest_id: row.try_get("guest_id")?,
    })
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
                name: "Gamepad".to_owned(),
                price: Price::parse("160").unwrap(),
                old_price: None,
                image_url: "/assets/gamepad.png".to_owned(),
                rating: 4.8,
                reviews: 88,
                tag: None,
                category: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_upsert_for_owner_is_stable() {
        let pool = test_pool().await;
        let carts = CartRepository::new(&pool);
        let owner = OwnerKey::Guest(GuestId::random());

        let first = carts.upsert_for_owner(&owner).await.unwrap();
        let second = carts.upsert_for_owner(&owner).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_upsert_item_increments_quantity() {
        let pool = test_pool().await;
        let carts = CartRepository::new(&pool);
        let product_id = seeded_product(&pool).await;
        let cart = carts
            .upsert_for_owner(&OwnerKey::Guest(GuestId::random()))
            .await
            .unwrap();

        let first = carts.upsert_item(&cart.id, &product_id, 2).await.unwrap();
        let second = carts.upsert_item(&cart.id, &product_id, 2).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 4);
    }

    #[tokio::test]
    async fn test_delete_items_reports_rows() {
        let pool = test_pool().await;
        let carts = CartRepository::new(&pool);
        let product_id = seeded_product(&pool).await;
        let cart = carts
            .upsert_for_owner(&OwnerKey::Guest(GuestId::random()))
            .await
            .unwrap();

        assert_eq!(carts.delete_items(&cart.id, &product_id).await.unwrap(), 0);
        carts.upsert_item(&cart.id, &product_id, 1).await.unwrap();
        assert_eq!(carts.delete_items(&cart.id, &product_id).await.unwrap(), 1);
        assert_eq!(carts.delete_items(&cart.id, &product_id).await.unwrap(), 0);
    }
}
