//! Integration tests for Ubermelon.
//!
//! Everything runs in-process: a stub listing endpoint and the storefront
//! are both served on ephemeral `127.0.0.1` ports, and tests talk to them
//! over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ubermelon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_loading` - HTTP catalog source and snapshot replacement
//! - `storefront_cart` - Session carts through the full router

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tokio::net::TcpListener;
use ubermelon_storefront::catalog::CatalogStore;
use ubermelon_storefront::config::{CatalogSourceConfig, StorefrontConfig};
use ubermelon_storefront::routes;
use ubermelon_storefront::state::AppState;
use url::Url;

/// Path the stub listing is served on.
pub const LISTING_PATH: &str = "/melons.json";

/// A listing with two melons, in the upstream format.
pub const LISTING: &str = r#"{
    "wm1": { "name": "Watermelon", "image_url": "/img/wm.png", "price": 5.00 },
    "ca2": { "name": "Cantaloupe", "image_url": "/img/ca.png", "price": 3.50 },
    "hd3": { "name": "Honeydew", "image_url": "/img/hd.png", "price": "2.005" }
}"#;

type Reply = Arc<Mutex<(StatusCode, String)>>;

/// A stub upstream that serves whatever reply it was last told to.
pub struct ListingServer {
    addr: SocketAddr,
    reply: Reply,
}

impl ListingServer {
    /// Start serving `body` with `200 OK`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(body: &str) -> Self {
        let reply: Reply = Arc::new(Mutex::new((StatusCode::OK, body.to_string())));
        let app = Router::new()
            .route(LISTING_PATH, get(serve_listing))
            .with_state(Arc::clone(&reply));
        let addr = spawn(app).await;
        Self { addr, reply }
    }

    /// Change what subsequent requests receive.
    pub fn respond_with(&self, status: StatusCode, body: &str) {
        let mut guard = self.reply.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = (status, body.to_string());
    }

    /// Full URL of the listing.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}{LISTING_PATH}", self.addr)).expect("valid listing URL")
    }
}

async fn serve_listing(State(reply): State<Reply>) -> (StatusCode, String) {
    reply
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// A storefront served on an ephemeral port.
pub struct Storefront {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Shared state, for reloading the catalog under a running server.
    pub state: AppState,
}

impl Storefront {
    /// Serve the full router around `store`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(store: CatalogStore) -> Self {
        let config = StorefrontConfig {
            catalog_source: CatalogSourceConfig::parse("melons.json").expect("file source"),
            host: [127, 0, 0, 1].into(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::with_catalog_store(config, store);
        let addr = spawn(routes::app(state.clone())).await;
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
