//! Cart quote command.
//!
//! Builds a cart by adding one unit per code given, in order, then prices it
//! against the loaded catalog. Codes missing from the catalog are reported
//! and left out of the total.
//!
//! # Usage
//!
//! ```bash
//! um-cli quote --source melons.json wm1 wm1 ca2
//! ```

use ubermelon_core::{Cart, CartStore, CartView, ItemCode, compute_view};

use super::{CommandError, load_catalog};

/// Build a cart from `codes` and print its priced view.
pub async fn price(source: &str, codes: &[String]) -> Result<(), CommandError> {
    let cart = build_cart(codes)?;
    let catalog = load_catalog(source).await?;
    let view = compute_view(&catalog, &cart);

    for code in &view.missing {
        tracing::warn!(item_code = %code, "Not in catalog, skipped");
    }

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&view));
    }

    Ok(())
}

/// Add one unit per code, in order.
fn build_cart(codes: &[String]) -> Result<Cart, CommandError> {
    let mut store = CartStore::new();
    for code in codes {
        store.add_to_cart(ItemCode::parse(code)?);
    }
    Ok(store.into_cart())
}

/// Format the view as a plain-text table.
fn render(view: &CartView) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for line in &view.lines {
        let _ = writeln!(
            out,
            "{:<30} {:>4} x {:>10} = {:>10}",
            line.name,
            line.quantity,
            line.unit_price.display(),
            line.subtotal.display()
        );
    }
    let _ = writeln!(out, "{:<30} {:>30}", "Total", view.grand_total.display());
    out
}
