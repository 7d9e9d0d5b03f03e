//! Catalog route handlers.
//!
//! `GET /api/melons` re-serves the loaded snapshot in the same listing
//! format the storefront consumes, so storefronts can be chained.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;
use ubermelon_core::Item;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// One melon with its display price.
#[derive(Debug, Serialize)]
pub struct MelonView<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    pub price_display: String,
}

impl<'a> From<&'a Item> for MelonView<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            item,
            price_display: item.price.display(),
        }
    }
}

/// The full catalog listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    Json(&*catalog).into_response()
}

/// A single melon by code.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(code): Path<String>) -> Result<Response> {
    let catalog = state.catalog();
    let item = catalog
        .get(code.trim())
        .ok_or_else(|| AppError::NotFound(format!("melon {code}")))?;
    Ok(Json(MelonView::from(item)).into_response())
}
