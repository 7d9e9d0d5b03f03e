//! HTTP listing source.

use tracing::instrument;
use ubermelon_core::Catalog;
use url::Url;

use super::{CatalogError, CatalogSource};

/// Fetches the listing with a single `GET`.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for the given listing URL.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let response = self
            .client
            .get(self.url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body first for better error diagnostics
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %String::from_utf8_lossy(&body).chars().take(500).collect::<String>(),
                "Listing endpoint returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        match Catalog::from_json_slice(&body) {
            Ok(catalog) => {
                tracing::debug!(items = catalog.len(), "Parsed catalog listing");
                Ok(catalog)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %String::from_utf8_lossy(&body).chars().take(500).collect::<String>(),
                    "Failed to parse catalog listing"
                );
                Err(e.into())
            }
        }
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
