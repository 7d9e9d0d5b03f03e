//! Catalog listing command.
//!
//! # Usage
//!
//! ```bash
//! um-cli catalog --source melons.json
//! ```

use std::fmt::Write as _;

use ubermelon_core::Catalog;

use super::{CommandError, load_catalog};

/// Print every melon in the catalog, sorted by code.
pub async fn list(source: &str) -> Result<(), CommandError> {
    let catalog = load_catalog(source).await?;

    tracing::info!(items = catalog.len(), "Catalog loaded");

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&catalog));
    }

    Ok(())
}

/// One row per item: code, name, display price.
fn render(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "(catalog is empty)\n".to_string();
    }

    let mut out = String::new();
    for item in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<12} {:<30} {:>10}",
            item.code.as_str(),
            item.name,
            item.price.display()
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_sorted_by_code() {
        let catalog = Catalog::from_json_str(
            r#"{
                "wm1": { "name": "Watermelon", "image_url": "/img/wm.png", "price": 5.00 },
                "hd3": { "name": "Honeydew", "image_url": "/img/hd.png", "price": "2.005" },
                "ca2": { "name": "Cantaloupe", "image_url": "/img/ca.png", "price": 3.50 }
            }"#,
        )
        .unwrap();

        let text = render(&catalog);
        let codes: Vec<&str> = text
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(codes, ["ca2", "hd3", "wm1"]);
        assert!(text.contains("Honeydew"));
        assert!(text.contains("$2.01"));
        assert!(text.contains("$5.00"));
    }

    #[test]
    fn test_render_empty_catalog() {
        assert_eq!(render(&Catalog::empty()), "(catalog is empty)\n");
    }
}
