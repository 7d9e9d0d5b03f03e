//! Cart valuation: priced lines and totals derived from catalog + cart.
//!
//! Each cart line first resolves against the catalog to either
//! [`LineResolution::Found`] or [`LineResolution::Missing`]. Only found lines
//! are priced and counted toward the total; missing ones are reported in
//! [`CartView::missing`] and otherwise ignored. Nothing here rounds; see
//! [`Price::display`](crate::Price::display).

use std::num::NonZeroU32;

use crate::cart::Cart;
use crate::types::{Catalog, CurrencyCode, Item, ItemCode, Price};

/// The outcome of looking up one cart line in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineResolution<'a> {
    /// The catalog lists the item.
    Found {
        /// Catalog entry for the line.
        item: &'a Item,
        /// Units in the cart.
        quantity: NonZeroU32,
    },
    /// The catalog has no such item.
    Missing {
        /// Code that failed to resolve.
        item_code: &'a ItemCode,
        /// Units in the cart.
        quantity: NonZeroU32,
    },
}

/// A priced line of the cart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartViewLine {
    pub item_code: ItemCode,
    pub name: String,
    pub quantity: NonZeroU32,
    pub unit_price: Price,
    /// `unit_price × quantity`, unrounded.
    pub subtotal: Price,
}

/// Priced lines plus total for one catalog/cart snapshot pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Found lines, in cart order.
    pub lines: Vec<CartViewLine>,
    /// Sum of line subtotals, unrounded.
    pub grand_total: Price,
    /// Codes skipped because the catalog does not list them.
    pub missing: Vec<ItemCode>,
}

impl CartView {
    /// A view with no lines and a zero total.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            grand_total: Price::zero(CurrencyCode::USD),
            missing: Vec::new(),
        }
    }

    /// Total units across priced lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Whether no line was priced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::empty()
    }
}

/// Resolve every cart line against the catalog, in cart order.
pub fn resolve_lines<'a>(
    catalog: &'a Catalog,
    cart: &'a Cart,
) -> impl Iterator<Item = LineResolution<'a>> + 'a {
    cart.lines().iter().map(|line| {
        catalog.get(line.item_code.as_str()).map_or(
            LineResolution::Missing {
                item_code: &line.item_code,
                quantity: line.quantity,
            },
            |item| LineResolution::Found {
                item,
                quantity: line.quantity,
            },
        )
    })
}

/// Price a cart against a catalog.
///
/// Pure: the same inputs always give the same view.
#[must_use]
pub fn compute_view(catalog: &Catalog, cart: &Cart) -> CartView {
    resolve_lines(catalog, cart).fold(CartView::empty(), |mut view, resolution| {
        match resolution {
            LineResolution::Found { item, quantity } => {
                let subtotal = item.price.times(quantity.get());
                if view.lines.is_empty() {
                    view.grand_total = Price::zero(subtotal.currency_code);
                }
                view.grand_total = view.grand_total.plus(subtotal);
                view.lines.push(CartViewLine {
                    item_code: item.code.clone(),
                    name: item.name.clone(),
                    quantity,
                    unit_price: item.price,
                    subtotal,
                });
            }
            LineResolution::Missing { item_code, .. } => {
                view.missing.push(item_code.clone());
            }
        }
        view
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn code(s: &str) -> ItemCode {
        ItemCode::parse(s).unwrap()
    }

    fn melon_catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{
                "wm1": { "name": "Watermelon", "image_url": "/img/wm.png", "price": 5.00 },
                "ca2": { "name": "Cantaloupe", "image_url": "/img/ca.png", "price": 3.50 }
            }"#,
        )
        .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_two_watermelons() {
        let cart = Cart::new().add_to_cart(code("wm1")).add_to_cart(code("wm1"));
        let view = compute_view(&melon_catalog(), &cart);

        assert_eq!(view.lines.len(), 1);
        let line = &view.lines[0];
        assert_eq!(line.name, "Watermelon");
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(line.subtotal.amount, dec("10.00"));
        assert_eq!(view.grand_total.amount, dec("10.00"));
        assert_eq!(view.grand_total.display(), "$10.00");
    }

    #[test]
    fn test_missing_code_is_excluded() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart = cart.add_to_cart(code("ghost"));
        }
        let view = compute_view(&melon_catalog(), &cart);

        assert!(view.lines.is_empty());
        assert_eq!(view.grand_total.amount, Decimal::ZERO);
        assert_eq!(view.grand_total.display(), "$0.00");
        assert_eq!(view.missing, vec![code("ghost")]);
        assert_eq!(view.item_count(), 0);
    }

    #[test]
    fn test_missing_contributes_nothing_to_total() {
        let cart = Cart::new()
            .add_to_cart(code("ca2"))
            .add_to_cart(code("ghost"))
            .add_to_cart(code("wm1"));
        let view = compute_view(&melon_catalog(), &cart);

        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.grand_total.amount, dec("8.50"));
        assert_eq!(view.item_count(), 2);
    }

    #[test]
    fn test_lines_follow_cart_order() {
        let cart = Cart::new().add_to_cart(code("wm1")).add_to_cart(code("ca2"));
        let view = compute_view(&melon_catalog(), &cart);
        let names: Vec<&str> = view.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Watermelon", "Cantaloupe"]);
    }

    #[test]
    fn test_compute_view_is_idempotent() {
        let catalog = melon_catalog();
        let cart = Cart::new()
            .add_to_cart(code("wm1"))
            .add_to_cart(code("ghost"))
            .add_to_cart(code("ca2"))
            .add_to_cart(code("wm1"));
        assert_eq!(compute_view(&catalog, &cart), compute_view(&catalog, &cart));
    }

    #[test]
    fn test_empty_cart() {
        let view = compute_view(&melon_catalog(), &Cart::new());
        assert_eq!(view, CartView::empty());
        assert!(view.is_empty());
    }

    #[test]
    fn test_empty_catalog_drops_everything() {
        let cart = Cart::new().add_to_cart(code("wm1"));
        let view = compute_view(&Catalog::empty(), &cart);
        assert!(view.is_empty());
        assert_eq!(view.missing, vec![code("wm1")]);
    }

    #[test]
    fn test_rounding_only_at_display() {
        let catalog = Catalog::from_json_str(
            r#"{"odd": { "name": "Odd Melon", "image_url": "", "price": 2.005 }}"#,
        )
        .unwrap();
        let cart = Cart::new().add_to_cart(code("odd")).add_to_cart(code("odd"));
        let view = compute_view(&catalog, &cart);

        assert_eq!(view.lines[0].subtotal.amount, dec("4.010"));
        assert_eq!(view.lines[0].unit_price.display(), "$2.01");
        assert_eq!(view.grand_total.display(), "$4.01");
    }

    #[test]
    fn test_resolve_lines_tags_each_line() {
        let catalog = melon_catalog();
        let cart = Cart::new().add_to_cart(code("wm1")).add_to_cart(code("ghost"));
        let resolutions: Vec<LineResolution<'_>> = resolve_lines(&catalog, &cart).collect();

        assert!(matches!(
            resolutions[0],
            LineResolution::Found { item, quantity } if item.name == "Watermelon" && quantity.get() == 1
        ));
        assert!(matches!(
            resolutions[1],
            LineResolution::Missing { item_code, .. } if item_code.as_str() == "ghost"
        ));
    }
}
