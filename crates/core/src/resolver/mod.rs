//! Apple Music metadata resolution.
//!
//! This module turns a free-text album/artist query into candidate catalog
//! URLs, scrapes candidate pages into structured records, disambiguates by
//! release year and maps the winner into the caller-facing metadata value.

mod mapper;
mod provider;
mod resolve;
mod scraper;
mod search;
mod service;
mod types;

pub use mapper::{resolved_metadata, with_artwork_size};
pub use provider::{provider_key, provider_url, PROVIDER_NAME};
pub use resolve::MetadataResolver;
pub use scraper::PageScraper;
pub use search::SearchClient;
pub use service::AppleMusicService;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur when talking to the catalog.
///
/// Soft outcomes (page not found, unscrapeable page, no acceptable
/// candidate) are not errors; they are `Ok(None)` or an empty vec.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("Catalog error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body does not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The caller's cancellation token fired.
    #[error("Operation cancelled")]
    Cancelled,
}

/// The seam between candidate selection and the network.
///
/// `AppleMusicService` is the production implementation; tests drive the
/// resolver through `testing::MockMetadataService` instead.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Service name for logging.
    fn name(&self) -> &str;

    /// Search the catalog for the term, returning candidate page URLs in
    /// the catalog's relevance order, deduplicated. An empty term yields an
    /// empty list without a network call.
    async fn search(
        &self,
        term: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, CatalogError>;

    /// Fetch and parse a single catalog page. `Ok(None)` means the page is
    /// missing or unusable; only transport-level problems are errors.
    async fn scrape(
        &self,
        url: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapedRecord>, CatalogError>;
}
