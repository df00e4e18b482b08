//! Production metadata service backed by the Apple Music catalog.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

use crate::config::CatalogConfig;

use super::scraper::PageScraper;
use super::search::SearchClient;
use super::types::{ItemKind, ScrapedRecord};
use super::{CatalogError, MetadataService};

/// [`MetadataService`] implementation over the catalog's search endpoint
/// and item pages.
pub struct AppleMusicService {
    search: SearchClient,
    scraper: PageScraper,
}

impl AppleMusicService {
    /// Create a new service from catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            search: SearchClient::new(config)?,
            scraper: PageScraper::new(config)?,
        })
    }
}

#[async_trait]
impl MetadataService for AppleMusicService {
    fn name(&self) -> &str {
        "apple_music"
    }

    async fn search(
        &self,
        term: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, CatalogError> {
        let hits = self.search.search(term, kind, cancel).await?;
        Ok(dedup_candidates(hits.into_iter().map(|h| h.url)))
    }

    async fn scrape(
        &self,
        url: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapedRecord>, CatalogError> {
        self.scraper.scrape(url, kind, cancel).await
    }
}

/// Drop duplicate candidate URLs, keeping the first occurrence so the
/// catalog's relevance order is preserved.
fn dedup_candidates(urls: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.filter(|url| seen.insert(url.clone())).collect()
}
