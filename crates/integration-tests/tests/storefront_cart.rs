//! Integration tests for session carts through the full storefront router.
//!
//! Each test serves the storefront on an ephemeral port and drives it with a
//! cookie-keeping `reqwest` client, so carts persist across requests exactly
//! as they would for a browser.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use ubermelon_core::Catalog;
use ubermelon_integration_tests::{LISTING, ListingServer, Storefront};
use ubermelon_storefront::catalog::{CatalogStore, HttpCatalogSource};

fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

async fn storefront() -> Storefront {
    let catalog = Catalog::from_json_str(LISTING).expect("valid listing");
    Storefront::start(CatalogStore::with_catalog(catalog)).await
}

async fn add(client: &Client, storefront: &Storefront, code: &str) -> reqwest::Response {
    client
        .post(storefront.url("/api/cart/add"))
        .form(&[("item_code", code)])
        .send()
        .await
        .expect("add request")
}

async fn cart(client: &Client, storefront: &Storefront) -> Value {
    client
        .get(storefront.url("/api/cart"))
        .send()
        .await
        .expect("cart request")
        .json()
        .await
        .expect("cart json")
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_endpoints() {
    let storefront = storefront().await;
    let client = browser();

    let listing: Value = client
        .get(storefront.url("/api/melons"))
        .send()
        .await
        .expect("listing request")
        .json()
        .await
        .expect("listing json");
    assert_eq!(listing["wm1"]["name"], "Watermelon");
    assert_eq!(listing["hd3"]["price"], serde_json::json!(2.005));

    let missing = client
        .get(storefront.url("/api/melons/ghost"))
        .send()
        .await
        .expect("show request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_accumulates_and_rounds_at_display() {
    let storefront = storefront().await;
    let client = browser();

    for code in ["wm1", "hd3", "wm1"] {
        let response = add(&client, &storefront, code).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let cart = cart(&client, &storefront).await;
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["lines"][0]["item_code"], "wm1");
    assert_eq!(cart["lines"][0]["quantity"], 2);
    assert_eq!(cart["lines"][0]["subtotal"], "$10.00");
    assert_eq!(cart["lines"][1]["subtotal"], "$2.01");
    // 5.00 * 2 + 2.005 = 12.005, rounded once
    assert_eq!(cart["total"], "$12.01");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_from_one_visitor_are_all_counted() {
    const ADDS: u32 = 20;

    let storefront = storefront().await;
    let client = browser();

    // Establish the session cookie first.
    add(&client, &storefront, "ca2").await;

    let tasks: Vec<_> = (0..ADDS)
        .map(|_| {
            let client = client.clone();
            let url = storefront.url("/api/cart/add");
            tokio::spawn(async move {
                client
                    .post(url)
                    .form(&[("item_code", "ca2")])
                    .send()
                    .await
                    .expect("add request")
                    .status()
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.expect("task"), StatusCode::OK);
    }

    let cart = cart(&client, &storefront).await;
    assert_eq!(cart["item_count"], ADDS + 1);
    assert_eq!(cart["lines"][0]["quantity"], ADDS + 1);
    assert_eq!(cart["total"], "$73.50");
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let storefront = storefront().await;
    let alice = browser();
    let bob = browser();

    add(&alice, &storefront, "ca2").await;

    assert_eq!(cart(&alice, &storefront).await["total"], "$3.50");
    assert_eq!(cart(&bob, &storefront).await["total"], "$0.00");
}

#[tokio::test]
async fn test_blank_code_is_rejected() {
    let storefront = storefront().await;
    let client = browser();

    add(&client, &storefront, "ca2").await;
    let rejected = add(&client, &storefront, "   ").await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    assert_eq!(cart(&client, &storefront).await["item_count"], 1);
}

#[tokio::test]
async fn test_unknown_code_is_priced_after_catalog_reload() {
    let upstream = ListingServer::start(LISTING).await;
    let storefront = storefront().await;
    let client = browser();

    add(&client, &storefront, "cr4").await;
    add(&client, &storefront, "wm1").await;

    let before = cart(&client, &storefront).await;
    assert_eq!(before["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(before["total"], "$5.00");

    upstream.respond_with(
        StatusCode::OK,
        r#"{
            "wm1": { "name": "Watermelon", "image_url": "/img/wm.png", "price": 5.00 },
            "cr4": { "name": "Crenshaw", "image_url": "/img/cr.png", "price": 4.25 }
        }"#,
    );
    storefront
        .state
        .catalog_store()
        .load(&HttpCatalogSource::new(upstream.url()))
        .await
        .expect("reload");

    let after = cart(&client, &storefront).await;
    assert_eq!(after["lines"][0]["name"], "Crenshaw");
    assert_eq!(after["total"], "$9.25");
}

#[tokio::test]
async fn test_readiness_follows_catalog() {
    let storefront = Storefront::start(CatalogStore::new()).await;
    let client = browser();

    let not_ready = client
        .get(storefront.url("/health/ready"))
        .send()
        .await
        .expect("readiness request");
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    let upstream = ListingServer::start(LISTING).await;
    storefront
        .state
        .catalog_store()
        .load(&HttpCatalogSource::new(upstream.url()))
        .await
        .expect("load");

    let ready = client
        .get(storefront.url("/health/ready"))
        .send()
        .await
        .expect("readiness request");
    assert_eq!(ready.status(), StatusCode::OK);
}
