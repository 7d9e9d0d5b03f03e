//! Server-side carts keyed by session ID.
//!
//! The session cookie only identifies the visitor. Each visitor's
//! [`CartStore`] lives here, behind its own lock, and every add runs
//! load, increment and store under that lock. Overlapping requests from one
//! session are therefore applied one after another.
//!
//! Carts idle for longer than the session inactivity window are evicted.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;
use tower_sessions::session::Id;
use ubermelon_core::{Cart, CartStore, ItemCode};

use crate::middleware::session::SESSION_EXPIRY_SECONDS;

/// How long an untouched cart is kept.
pub const CART_IDLE_TIMEOUT: Duration = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());

/// All live carts, one per session.
#[derive(Clone)]
pub struct CartRegistry {
    carts: Cache<Id, Arc<Mutex<CartStore>>>,
}

impl CartRegistry {
    /// A registry evicting carts after [`CART_IDLE_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_idle_timeout(CART_IDLE_TIMEOUT)
    }

    /// A registry evicting carts untouched for `idle`.
    #[must_use]
    pub fn with_idle_timeout(idle: Duration) -> Self {
        Self {
            carts: Cache::builder().time_to_idle(idle).build(),
        }
    }

    /// Add one unit of `item_code` to the session's cart.
    ///
    /// Returns the snapshot produced by this add.
    pub async fn add_to_cart(&self, session_id: Id, item_code: ItemCode) -> Cart {
        let store = self
            .carts
            .get_with(session_id, async { Arc::new(Mutex::new(CartStore::new())) })
            .await;
        store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_to_cart(item_code)
            .clone()
    }

    /// The session's current cart, or an empty one.
    pub async fn snapshot(&self, session_id: Id) -> Cart {
        match self.carts.get(&session_id).await {
            Some(store) => store
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .snapshot(),
            None => Cart::new(),
        }
    }
}

impl Default for CartRegistry {
    fn default() -> Self {
        Self::new()
    }
}
