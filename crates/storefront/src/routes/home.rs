//! Home page route handler.

use axum::Json;
use serde::Serialize;

/// Store branding shown on the landing page.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HomeBanner {
    pub brand: &'static str,
    pub tagline: &'static str,
}

/// Landing page banner.
pub async fn home() -> Json<HomeBanner> {
    Json(HomeBanner {
        brand: "Ubermelon",
        tagline: "Melons on demand.",
    })
}
