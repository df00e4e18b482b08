//! Candidate selection over a metadata service.
//!
//! Candidates are scraped strictly in the catalog's relevance order; the
//! ordering is a correctness requirement, not an optimization, so the loop
//! never scrapes concurrently.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::mapper::resolved_metadata;
use super::types::{ItemKind, MetadataQuery, ResolvedMetadata, ScrapedRecord};
use super::{CatalogError, MetadataService};

/// Resolves metadata queries into final results by searching, scraping and
/// filtering candidates. Stateless across calls; cheap to clone.
#[derive(Clone)]
pub struct MetadataResolver {
    service: Arc<dyn MetadataService>,
}

impl MetadataResolver {
    /// Create a resolver over a metadata service.
    pub fn new(service: Arc<dyn MetadataService>) -> Self {
        Self { service }
    }

    /// Search mode: candidate page URLs in relevance order, without
    /// scraping any of them. Empty terms and zero hits yield an empty
    /// list, not an error.
    pub async fn search_urls(
        &self,
        term: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, CatalogError> {
        self.service.search(term, kind, cancel).await
    }

    /// Resolve a query to the single best match.
    ///
    /// Candidates are scraped in relevance order and the first one passing
    /// the acceptance filter wins. `Ok(None)` means the item is not in the
    /// catalog, or nothing matched the year hint. That is an expected
    /// outcome, not a fault.
    pub async fn resolve(
        &self,
        query: &MetadataQuery,
        cancel: &CancellationToken,
    ) -> Result<Option<ResolvedMetadata>, CatalogError> {
        let candidates = self.candidate_urls(query, cancel).await?;

        for url in &candidates {
            if let Some(record) = self.scrape_accepted(url, query, cancel).await? {
                return Ok(Some(resolved_metadata(record)));
            }
        }

        debug!(
            term = %query.term,
            candidates = candidates.len(),
            "No acceptable candidate"
        );
        Ok(None)
    }

    /// Multi-result mode: every candidate that scrapes successfully and
    /// passes the acceptance filter, in relevance order. Rejected and
    /// failed candidates are skipped without aborting the rest.
    pub async fn search_metadata(
        &self,
        query: &MetadataQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResolvedMetadata>, CatalogError> {
        let candidates = self.candidate_urls(query, cancel).await?;

        let mut results = Vec::new();
        for url in &candidates {
            if let Some(record) = self.scrape_accepted(url, query, cancel).await? {
                results.push(resolved_metadata(record));
            }
        }

        Ok(results)
    }

    /// Candidate URLs for a query: the stored provider URL when the caller
    /// already identified the item, otherwise a catalog search.
    async fn candidate_urls(
        &self,
        query: &MetadataQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, CatalogError> {
        if let Some(url) = &query.provider_url {
            debug!(url = %url, "Using stored provider URL, skipping search");
            return Ok(vec![url.clone()]);
        }

        self.service.search(&query.term, query.kind, cancel).await
    }

    /// Scrape one candidate and apply the acceptance filter.
    ///
    /// Scrape failures count as rejections and the caller moves on to the
    /// next candidate, except cancellation, which propagates immediately.
    async fn scrape_accepted(
        &self,
        url: &str,
        query: &MetadataQuery,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapedRecord>, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        let record = match self.service.scrape(url, query.kind, cancel).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(url = url, "Candidate page yielded no usable record");
                return Ok(None);
            }
            Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
            Err(e) => {
                warn!(url = url, error = %e, "Candidate scrape failed, trying next");
                return Ok(None);
            }
        };

        if let (Some(hint), Some(year)) = (query.year_hint, record.release_year()) {
            if hint != year {
                debug!(
                    url = url,
                    year = year,
                    hint = hint,
                    "Release year does not match hint, rejecting"
                );
                return Ok(None);
            }
        }

        Ok(Some(record))
    }
}
