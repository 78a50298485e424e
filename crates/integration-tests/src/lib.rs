//! Integration tests for the Velora storefront.
//!
//! [`TestApp`] spawns the real router on an ephemeral port over a private
//! in-memory database and drives it over HTTP. Each [`TestApp`] owns one
//! cookie-holding client plus one [`GuestIdProvider`], together simulating a
//! single browser session; additional sessions come from [`TestApp::fresh_client`]
//! and extra providers.
//!
//! # Test Categories
//!
//! - `storefront_auth` - Signup/login/session/logout
//! - `storefront_products` - Catalog listing
//! - `storefront_cart` - Cart identity and line-item semantics
//! - `storefront_wishlist` - Toggle semantics

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use velora_core::Price;
use velora_storefront::config::StorefrontConfig;
use velora_storefront::db::MIGRATOR;
use velora_storefront::db::products::ProductRepository;
use velora_storefront::guest::GuestIdProvider;
use velora_storefront::models::{NewProduct, Product};
use velora_storefront::state::AppState;

/// A running storefront instance plus one simulated browser session.
pub struct TestApp {
    /// Base URL of the spawned server (ephemeral port).
    pub base_url: String,
    /// Cookie-holding HTTP client (the "browser").
    pub client: reqwest::Client,
    /// The browser session's guest identity cache.
    pub guest: GuestIdProvider,
    /// Direct handle to the server's database, for seeding and assertions.
    pub pool: SqlitePool,
}

impl TestApp {
    /// Spawn the storefront on an ephemeral port with a fresh database.
    ///
    /// # Panics
    ///
    /// Panics when the server cannot be brought up; there is no point
    /// continuing a test without it.
    pub async fn spawn() -> Self {
        // One connection, one in-memory database. The pool never grows or
        // reaps, so the database lives exactly as long as the test.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid sqlite url")
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("connect to in-memory database");

        MIGRATOR.run(&pool).await.expect("run migrations");

        let config = StorefrontConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().expect("loopback"),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            sentry_dsn: None,
        };

        let state = AppState::new(config, pool.clone());
        let app = velora_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: fresh_client(),
            guest: GuestIdProvider::new(),
            pool,
        }
    }

    /// Absolute URL for a path on the spawned server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A separate cookie-holding client: another browser session against the
    /// same server.
    #[must_use]
    pub fn fresh_client(&self) -> reqwest::Client {
        fresh_client()
    }

    /// Attach this session's guest header to a request.
    #[must_use]
    pub fn with_guest(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.guest.header() {
            Some((name, value)) => builder.header(name, value),
            None => builder,
        }
    }

    /// Seed one catalog product directly through the repository.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails.
    pub async fn seed_product(&self, name: &str, price: &str) -> Product {
        ProductRepository::new(&self.pool)
            .create(&NewProduct {
                name: name.to_owned(),
                price: Price::parse(price).expect("valid price"),
                old_price: None,
                image_url: "/assets/product.png".to_owned(),
                rating: 4.8,
                reviews: 88,
                tag: None,
                category: Some("Classics".to_owned()),
            })
            .await
            .expect("seed product")
    }

    /// Count rows in a table, for asserting on write paths.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count rows")
    }
}

fn fresh_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("build http client")
}
