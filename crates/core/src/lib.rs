//! Ubermelon Core - catalog, cart and valuation.
//!
//! This crate provides the state model shared by every Ubermelon component:
//! - `storefront` - HTTP surface serving the catalog and session carts
//! - `cli` - Command-line catalog inspection and quoting
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. Loading a catalog from somewhere is the caller's job;
//! this crate only parses the listing payload.
//!
//! # Modules
//!
//! - [`types`] - Item codes, prices, items and the catalog snapshot
//! - [`cart`] - Copy-on-write cart and its session-local store
//! - [`valuation`] - Derivation of priced lines and totals from catalog + cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;
pub mod valuation;

pub use cart::{Cart, CartError, CartLine, CartStore};
pub use types::*;
pub use valuation::{CartView, CartViewLine, LineResolution, compute_view, resolve_lines};
