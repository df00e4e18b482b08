//! Mock metadata service for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::resolver::{CatalogError, ItemKind, MetadataService, ScrapedRecord};

/// A recorded service call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Search { term: String, kind: ItemKind },
    Scrape { url: String, kind: ItemKind },
}

/// Mock implementation of the [`MetadataService`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable candidate URLs and per-URL scrape records
/// - Track calls for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use tunedex_core::testing::{fixtures, MockMetadataService};
///
/// let service = MockMetadataService::new();
/// service.set_candidates(vec!["https://example.com/album/1".into()]).await;
/// service
///     .add_record(
///         "https://example.com/album/1",
///         fixtures::album_record("OK Computer", "Radiohead", Some(1997), "1"),
///     )
///     .await;
/// ```
#[derive(Debug, Default)]
pub struct MockMetadataService {
    /// Candidate URLs returned by every search.
    candidates: Arc<RwLock<Vec<String>>>,
    /// Scrape results by URL; a missing URL scrapes to `Ok(None)`.
    records: Arc<RwLock<HashMap<String, ScrapedRecord>>>,
    /// URLs whose scrape fails with an API error.
    failing_urls: Arc<RwLock<HashSet<String>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl MockMetadataService {
    /// Create a new empty mock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate URLs returned by searches.
    pub async fn set_candidates(&self, urls: Vec<String>) {
        *self.candidates.write().await = urls;
    }

    /// Add a scrape record for a URL.
    pub async fn add_record(&self, url: impl Into<String>, record: ScrapedRecord) {
        self.records.write().await.insert(url.into(), record);
    }

    /// Make scraping the given URL fail with an API error.
    pub async fn fail_url(&self, url: impl Into<String>) {
        self.failing_urls.write().await.insert(url.into());
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of search calls performed.
    pub async fn search_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::Search { .. }))
            .count()
    }

    /// Number of scrape calls performed.
    pub async fn scrape_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::Scrape { .. }))
            .count()
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    /// Record a call.
    async fn record(&self, call: RecordedCall) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl MetadataService for MockMetadataService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        term: &str,
        kind: ItemKind,
        _cancel: &CancellationToken,
    ) -> Result<Vec<String>, CatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCall::Search {
            term: term.to_string(),
            kind,
        })
        .await;

        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.candidates.read().await.clone())
    }

    async fn scrape(
        &self,
        url: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapedRecord>, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCall::Scrape {
            url: url.to_string(),
            kind,
        })
        .await;

        if self.failing_urls.read().await.contains(url) {
            return Err(CatalogError::Api {
                status: 500,
                message: "mock scrape failure".to_string(),
            });
        }

        Ok(self.records.read().await.get(url).cloned())
    }
}
