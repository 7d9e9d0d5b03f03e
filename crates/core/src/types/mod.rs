//! Core types for Ubermelon.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod catalog;
pub mod item;
pub mod price;

pub use catalog::{Catalog, CatalogParseError};
pub use item::{Item, ItemCode, ItemCodeError};
pub use price::{CurrencyCode, Price};
