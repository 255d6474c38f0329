//! Game catalog service for Playdesu
//!
//! Fetches the remote store catalog (a single JSON document) and maps it
//! into an immutable in-memory list of game records.

mod client;
mod model;

pub use client::{CatalogClient, parse_catalog};
pub use model::Game;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog server returned {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
