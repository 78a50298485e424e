//! Catalog listing over HTTP.

use serde_json::Value;

use velora_integration_tests::TestApp;

#[tokio::test]
async fn products_are_listed_oldest_first() {
    let app = TestApp::spawn().await;
    app.seed_product("First", "160").await;
    app.seed_product("Second", "960").await;

    let resp = app
        .client
        .get(app.url("/products"))
        .send()
        .await
        .expect("list products");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("json body");
    let names: Vec<_> = body["products"]
        .as_array()
        .expect("products")
        .iter()
        .map(|p| p["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let app = TestApp::spawn().await;

    let body: Value = app
        .client
        .get(app.url("/products"))
        .send()
        .await
        .expect("list products")
        .json()
        .await
        .expect("json body");
    assert_eq!(body["products"].as_array().expect("products").len(), 0);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::spawn().await;

    let health = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("health");
    assert_eq!(health.status(), 200);

    let ready = app
        .client
        .get(app.url("/health/ready"))
        .send()
        .await
        .expect("readiness");
    assert_eq!(ready.status(), 200);
}
