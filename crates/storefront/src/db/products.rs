//! Product repository for database operations.
//!
//! Catalog management itself lives outside the storefront; this repository
//! covers the listing the API serves plus the insert used by seeding and
//! tests.

use chrono::Utc;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use velora_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, price, old_price, image_url, rating, reviews, tag, category, \
                    created_at \
             FROM products ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(|r| product_from_row(r, "")).collect()
    }

    /// Insert a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::random(),
            name: new.name.clone(),
            price: new.price,
            old_price: new.old_price,
            image_url: new.image_url.clone(),
            rating: new.rating,
            reviews: new.reviews,
            tag: new.tag.clone(),
            category: new.category.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO products \
                 (id, name, price, old_price, image_url, rating, reviews, tag, category, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(product.old_price.map(|p| p.to_string()))
        .bind(&product.image_url)
        .bind(product.rating)
        .bind(product.reviews)
        .bind(&product.tag)
        .bind(&product.category)
        .bind(product.created_at)
        .execute(self.pool)
        .await?;

        Ok(product)
    }
}

/// Map product columns (optionally alias-prefixed, for joins) to the domain type.
pub(crate) fn product_from_row(row: &SqliteRow, prefix: &str) -> Result<Product, RepositoryError> {
    let col = |name: &str| format!("{prefix}{name}");

    let price: String = row.try_get(col("price").as_str())?;
    let price = Price::parse(&price).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
    })?;

    let old_price: Option<String> = row.try_get(col("old_price").as_str())?;
    let old_price = old_price
        .map(|p| {
            Price::parse(&p).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid old price in database: {e}"))
            })
        })
        .transpose()?;

    Ok(Product {
        id: row.try_get(col("id").as_str())?,
        name: row.try_get(col("name").as_str())?,
        price,
        old_price,
        image_url: row.try_get(col("image_url").as_str())?,
        rating: row.try_get(col("rating").as_str())?,
        reviews: row.try_get(col("reviews").as_str())?,
        tag: row.try_get(col("tag").as_str())?,
        category: row.try_get(col("category").as_str())?,
        created_at: row.try_get(col("created_at").as_str())?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn sample(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: Price::parse(price).unwrap(),
            old_price: None,
            image_url: "/assets/sample.png".to_owned(),
            rating: 4.8,
            reviews: 88,
            tag: None,
            category: Some("Classics".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_list_returns_insertion_order() {
        let pool = test_pool().await;
        let products = ProductRepository::new(&pool);

        products.create(&sample("First", "160")).await.unwrap();
        products.create(&sample("Second", "960")).await.unwrap();

        let listed = products.list().await.unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_price_roundtrip() {
        let pool = test_pool().await;
        let products = ProductRepository::new(&pool);

        let mut on_sale = sample("Sale", "960");
        on_sale.old_price = Some(Price::parse("1160").unwrap());
        products.create(&on_sale).await.unwrap();

        let listed = products.list().await.unwrap();
        let product = listed.first().unwrap();
        assert_eq!(product.price, Price::parse("960").unwrap());
        assert_eq!(product.old_price, Some(Price::parse("1160").unwrap()));
    }
}
