//! Copy-on-write shopping cart.
//!
//! A [`Cart`] is an immutable snapshot of item code → quantity. The only
//! mutation, [`Cart::add_to_cart`], returns a new snapshot and leaves every
//! existing one untouched, so a renderer holding an older cart keeps seeing
//! consistent data.
//!
//! The cart is deliberately catalog-agnostic: any well-formed [`ItemCode`] can
//! be added. Codes the catalog does not know are dropped at valuation time.

use std::num::NonZeroU32;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::ItemCode;

/// Errors that can occur when rebuilding a cart from stored lines.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The same item code appears on more than one line.
    #[error("duplicate cart line for item {0}")]
    DuplicateLine(ItemCode),
}

/// One (item code, quantity) pair. Quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item this line refers to. May be absent from the catalog.
    pub item_code: ItemCode,
    /// Number of units.
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// A fresh line with quantity 1.
    #[must_use]
    pub const fn new(item_code: ItemCode) -> Self {
        Self {
            item_code,
            quantity: NonZeroU32::MIN,
        }
    }
}

/// An immutable cart snapshot.
///
/// Lines keep the order in which their item was first added. Cloning is
/// cheap; clones share storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Arc<[CartLine]>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new cart with one more unit of `item_code`.
    ///
    /// Increments the existing line, or appends a line with quantity 1.
    /// A quantity already at `u32::MAX` stays there.
    #[must_use]
    pub fn add_to_cart(&self, item_code: ItemCode) -> Self {
        let mut lines = self.lines.to_vec();
        match lines.iter_mut().find(|line| line.item_code == item_code) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(CartLine::new(item_code)),
        }
        Self {
            lines: lines.into(),
        }
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity for a code, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, item_code: &str) -> Option<NonZeroU32> {
        self.lines
            .iter()
            .find(|line| line.item_code.as_str() == item_code)
            .map(|line| line.quantity)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities, saturating.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (i, line) in lines.iter().enumerate() {
            if lines
                .iter()
                .skip(i + 1)
                .any(|other| other.item_code == line.item_code)
            {
                return Err(CartError::DuplicateLine(line.item_code.clone()));
            }
        }
        Ok(Self {
            lines: lines.into(),
        })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines.to_vec()
    }
}

/// Session-local holder of the current cart.
///
/// Owns the latest snapshot. Readers get clones that stay valid after
/// further adds.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    current: Cart,
}

impl CartStore {
    /// A store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item_code`, replacing the current snapshot.
    pub fn add_to_cart(&mut self, item_code: ItemCode) -> &Cart {
        self.current = self.current.add_to_cart(item_code);
        &self.current
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.current.clone()
    }

    /// Consume the store, yielding the current snapshot.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.current
    }
}
