//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home banner
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness (catalog loaded)
//!
//! # Catalog
//! GET  /api/melons             - Full listing (same format as the source)
//! GET  /api/melons/{code}      - One melon
//!
//! # Cart (session-backed)
//! GET  /api/cart               - Priced cart
//! POST /api/cart/add           - Add one unit (form: item_code)
//! ```

pub mod cart;
pub mod home;
pub mod melons;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn melon_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(melons::index))
        .route("/{code}", get(melons::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/melons", melon_routes())
        .nest("/api/cart", cart_routes())
}

/// Build the full application with middleware applied.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable while the catalog is empty.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
