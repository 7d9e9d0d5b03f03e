//! The catalog snapshot and its listing wire format.
//!
//! A listing is a JSON object keyed by item code:
//!
//! ```json
//! {
//!   "wm1": { "name": "Watermelon", "image_url": "/static/img/wm.png", "price": 5.0 },
//!   "ca2": { "name": "Cantaloupe", "image_url": "/static/img/ca.png", "price": "3.50" }
//! }
//! ```
//!
//! `price` may be a number or a decimal string. Numbers are converted through
//! their shortest textual form, so `2.005` becomes exactly `2.005` rather than
//! the nearest binary float.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::item::{Item, ItemCode};
use super::price::{self, Price};

/// Errors that can occur when parsing a listing into a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogParseError {
    /// The payload is not JSON of the expected shape.
    #[error("malformed listing: {0}")]
    Json(#[from] serde_json::Error),

    /// A listing key is empty or whitespace.
    #[error("listing contains an empty item code")]
    EmptyCode,

    /// Two keys trim to the same item code.
    #[error("duplicate item code: {0}")]
    DuplicateCode(ItemCode),

    /// A price is neither a number nor a decimal string.
    #[error("item {code}: unreadable price {raw}")]
    InvalidPrice {
        /// Item whose price failed to parse.
        code: ItemCode,
        /// The raw JSON value.
        raw: String,
    },

    /// A price is below zero.
    #[error("item {code}: negative price {amount}")]
    NegativePrice {
        /// Item with the negative price.
        code: ItemCode,
        /// The offending amount.
        amount: Decimal,
    },
}

/// One entry of the listing, before validation.
#[derive(Debug, Deserialize)]
struct ListingEntry {
    name: String,
    image_url: String,
    price: Value,
}

/// Borrowed form of an item for writing the listing back out.
#[derive(Serialize)]
struct ListingEntryRef<'a> {
    name: &'a str,
    image_url: &'a str,
    #[serde(serialize_with = "price::serialize_amount")]
    price: Price,
}

/// An immutable mapping from item code to [`Item`].
///
/// Iteration is ordered by item code. A catalog is never edited after
/// construction; reloading produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: BTreeMap<ItemCode, Item>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Parse a listing payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object of listing
    /// entries, if any key is empty, or if any price is unreadable or
    /// negative. A single bad entry rejects the whole payload.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogParseError> {
        let listing: BTreeMap<String, ListingEntry> = serde_json::from_slice(bytes)?;
        Self::from_listing(listing)
    }

    /// Parse a listing payload from a string.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json_slice`].
    pub fn from_json_str(s: &str) -> Result<Self, CatalogParseError> {
        Self::from_json_slice(s.as_bytes())
    }

    fn from_listing(listing: BTreeMap<String, ListingEntry>) -> Result<Self, CatalogParseError> {
        let mut items = BTreeMap::new();
        for (raw_code, entry) in listing {
            let code = ItemCode::parse(&raw_code).map_err(|_| CatalogParseError::EmptyCode)?;
            let amount = parse_price(&entry.price).ok_or_else(|| CatalogParseError::InvalidPrice {
                code: code.clone(),
                raw: entry.price.to_string(),
            })?;
            let price = Price::usd(amount);
            if price.is_negative() {
                return Err(CatalogParseError::NegativePrice { code, amount });
            }
            let item = Item::new(code.clone(), entry.name, entry.image_url, price);
            if items.insert(code.clone(), item).is_some() {
                return Err(CatalogParseError::DuplicateCode(code));
            }
        }
        Ok(Self { items })
    }

    /// Look up an item by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Item> {
        self.items.get(code)
    }

    /// Whether the catalog lists the given code.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    /// Items ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (code, item) in &self.items {
            map.serialize_entry(
                code.as_str(),
                &ListingEntryRef {
                    name: &item.name,
                    image_url: &item.image_url,
                    price: item.price,
                },
            )?;
        }
        map.end()
    }
}

/// Read a price from a JSON number or decimal string.
fn parse_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
