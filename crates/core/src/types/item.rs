//! Catalog items and their codes.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Errors that can occur when parsing an [`ItemCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemCodeError {
    /// The input is empty or only whitespace.
    #[error("item code cannot be empty")]
    Empty,
}

/// The unique key of a catalog item (e.g. `"wm1"`).
///
/// Leading and trailing whitespace is trimmed; what remains must be
/// non-empty. A code says nothing about whether the item exists in any
/// particular catalog.
///
/// ## Examples
///
/// ```
/// use ubermelon_core::ItemCode;
///
/// assert_eq!(ItemCode::parse(" wm1 ").unwrap().as_str(), "wm1");
/// assert!(ItemCode::parse("").is_err());
/// assert!(ItemCode::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ItemCode(String);

impl ItemCode {
    /// Parse an `ItemCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ItemCodeError::Empty`] if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, ItemCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ItemCodeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ItemCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemCode {
    type Err = ItemCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemCode {
    type Error = ItemCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemCode> for String {
    fn from(code: ItemCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets catalogs be queried with a plain `&str`.
impl Borrow<str> for ItemCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A purchasable catalog entry.
///
/// Items are immutable once loaded; the catalog hands out shared references
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Unique key within the catalog.
    pub code: ItemCode,
    /// Display name (e.g. "Watermelon").
    pub name: String,
    /// Product image location as given by the listing source.
    pub image_url: String,
    /// Unit price.
    #[serde(serialize_with = "super::price::serialize_amount")]
    pub price: Price,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub fn new(
        code: ItemCode,
        name: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            image_url: image_url.into(),
            price,
        }
    }
}
