//! Cart route handlers.
//!
//! The session cookie identifies the visitor; the cart itself lives in the
//! [`CartRegistry`](crate::carts::CartRegistry) under the session ID. Nothing
//! is validated against the catalog until the cart is priced.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tower_sessions::session::Id;
use tracing::instrument;
use ubermelon_core::{Cart, CartView, CartViewLine, ItemCode, compute_view};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::keys;
use crate::state::AppState;

/// One priced cart row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartRow {
    pub item_code: String,
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartRow>,
    pub total: String,
    pub item_count: u32,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartViewLine> for CartRow {
    fn from(line: &CartViewLine) -> Self {
        Self {
            item_code: line.item_code.to_string(),
            name: line.name.clone(),
            quantity: line.quantity.get(),
            subtotal: line.subtotal.display(),
        }
    }
}

impl From<&CartView> for CartSummary {
    fn from(view: &CartView) -> Self {
        Self {
            lines: view.lines.iter().map(CartRow::from).collect(),
            total: view.grand_total.display(),
            item_count: view.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// The ID of a session already in the store, if any.
///
/// Reading from the session loads its record, which clears an ID whose
/// record has expired.
async fn existing_session_id(session: &Session) -> Result<Option<Id>> {
    session.get::<bool>(keys::VISITOR).await?;
    Ok(session.id())
}

/// The session's ID, creating and storing the session if it is new.
async fn ensure_session_id(session: &Session) -> Result<Id> {
    session.insert(keys::VISITOR, true).await?;
    if let Some(id) = session.id() {
        return Ok(id);
    }
    session.save().await?;
    session
        .id()
        .ok_or_else(|| AppError::Internal("session has no ID after save".to_string()))
}

/// The visitor's current cart, or an empty one.
async fn load_cart(state: &AppState, session: &Session) -> Result<Cart> {
    Ok(match existing_session_id(session).await? {
        Some(id) => state.carts().snapshot(id).await,
        None => Cart::new(),
    })
}

/// Price `cart` against the current catalog.
fn summarize(state: &AppState, cart: &Cart) -> CartSummary {
    let catalog = state.catalog();
    let view = compute_view(&catalog, cart);
    if !view.missing.is_empty() {
        tracing::debug!(missing = ?view.missing, "Cart lines not in catalog were skipped");
    }
    CartSummary::from(&view)
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_code: String,
}

/// Show the priced cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartSummary>> {
    let cart = load_cart(&state, &session).await?;
    Ok(Json(summarize(&state, &cart)))
}

/// Add one unit of an item to the cart.
///
/// Rejects an empty code with `400 Bad Request` and leaves the cart as it
/// was. Unknown codes are accepted and simply do not show up when priced.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<CartSummary>> {
    let item_code = ItemCode::parse(&form.item_code)?;

    let session_id = ensure_session_id(&session).await?;
    let cart = state.carts().add_to_cart(session_id, item_code.clone()).await;

    add_breadcrumb("cart", "Added to cart", &[("item_code", item_code.as_str())]);
    tracing::info!(item_code = %item_code, lines = cart.len(), "Added to cart");

    Ok(Json(summarize(&state, &cart)))
}
