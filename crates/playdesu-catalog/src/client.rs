//! Catalog fetching

use crate::{CatalogError, Game};
use serde::Deserialize;

/// Wire shape of the catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    docs: Vec<Game>,
}

/// Fetches the store catalog from its fixed URL.
///
/// One GET per screen session, no retry, no partial results: any transport
/// or parse failure fails the whole snapshot.
pub struct CatalogClient {
    url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new catalog client for a catalog URL
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(format!("Playdesu/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            url: url.into(),
            client,
        }
    }

    /// Fetch and parse the full catalog.
    pub async fn fetch_all(&self) -> Result<Vec<Game>, CatalogError> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::BadStatus(response.status()));
        }

        let body = response.text().await?;
        let games = parse_catalog(&body)?;

        tracing::info!("Fetched catalog with {} games", games.len());
        Ok(games)
    }
}

/// Parse a catalog JSON document into a list of game records.
pub fn parse_catalog(body: &str) -> Result<Vec<Game>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(body)?;
    Ok(document.docs)
}
