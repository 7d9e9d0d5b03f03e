//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session only
//! identifies the visitor; carts are kept in [`CartRegistry`](crate::carts::CartRegistry).
//! Everything disappears when the process exits.
//!
//! `MemoryStore` never deletes expired records on its own. An expired
//! cookie is rejected on load, but its record stays in memory until the
//! process restarts. Each record holds only a marker, so the growth is one
//! small entry per visitor.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "um_session";

/// Session expiry time in seconds (1 day of inactivity).
pub const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer backed by an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
