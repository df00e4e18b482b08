//! Catalog search endpoint client.
//!
//! Thin wrapper over the iTunes Search API: builds the query URL, decodes
//! the JSON envelope and converts rows into [`SearchHit`]s. No retries, no
//! caching, no business logic beyond decoding.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::CatalogConfig;

use super::mapper::{size_dimensions, with_artwork_size};
use super::types::{ImageCandidate, ItemKind, SearchHit};
use super::CatalogError;

/// Client for the catalog's JSON search endpoint.
pub struct SearchClient {
    client: Client,
    search_url: String,
    limit: u32,
    artwork_size: String,
}

impl SearchClient {
    /// Create a new search client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.trim_end_matches('/').to_string(),
            limit: config.search_limit,
            artwork_size: config.artwork_size.clone(),
        })
    }

    /// Build the search URL for a term and item kind.
    fn build_search_url(&self, term: &str, kind: ItemKind) -> String {
        let (entity, attribute) = match kind {
            ItemKind::Album => ("album", "albumTerm"),
            ItemKind::Artist => ("musicArtist", "artistTerm"),
        };

        format!(
            "{}?term={}&media=music&entity={}&attribute={}&limit={}",
            self.search_url,
            urlencoding::encode(term),
            entity,
            attribute,
            self.limit
        )
    }

    /// Search the catalog for albums or artists matching the term.
    ///
    /// An empty or whitespace-only term returns an empty list without
    /// issuing a request. A zero-result response is an empty list, not an
    /// error.
    pub async fn search(
        &self,
        term: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchHit>, CatalogError> {
        let term = term.trim();
        if term.is_empty() {
            debug!("Empty search term, skipping catalog request");
            return Ok(Vec::new());
        }

        let envelope = self.fetch_envelope(term, kind, cancel).await?;
        if envelope.result_count == 0 {
            debug!(term = term, "Catalog search returned no results");
            return Ok(Vec::new());
        }

        Ok(envelope
            .results
            .into_iter()
            .filter_map(|r| r.into_hit(kind))
            .collect())
    }

    /// Image-only lookup: same search request, but each hit is reduced to
    /// an artwork candidate upscaled to the configured size. Hits without
    /// artwork are skipped.
    pub async fn search_artwork(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageCandidate>, CatalogError> {
        let term = term.trim();
        if term.is_empty() {
            debug!("Empty search term, skipping catalog request");
            return Ok(Vec::new());
        }

        let envelope = self.fetch_envelope(term, ItemKind::Album, cancel).await?;
        let (width, height) = size_dimensions(&self.artwork_size).unwrap_or((0, 0));

        Ok(envelope
            .results
            .into_iter()
            .filter_map(|r| r.artwork_url_100)
            .filter(|url| !url.is_empty())
            .map(|thumbnail| ImageCandidate {
                url: with_artwork_size(&thumbnail, &self.artwork_size),
                thumbnail_url: thumbnail,
                width,
                height,
            })
            .collect())
    }

    async fn fetch_envelope(
        &self,
        term: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse, CatalogError> {
        let url = self.build_search_url(term, kind);
        debug!(term = term, kind = ?kind, "Searching catalog");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
            result = self.client.get(&url).send() => result?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = tokio::select! {
                _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
                result = response.text() => result.unwrap_or_default(),
            };
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect::<String>(),
            });
        }

        let envelope = tokio::select! {
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
            result = response.json::<SearchResponse>() => result.map_err(|e| {
                CatalogError::Decode(format!("Failed to parse search response: {}", e))
            })?,
        };

        debug!(
            term = term,
            results = envelope.result_count,
            "Catalog search complete"
        );

        Ok(envelope)
    }
}

// ============================================================================
// Search API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "resultCount", default)]
    result_count: i64,
    #[serde(default)]
    results: Vec<SearchResultRow>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SearchResultRow {
    collection_id: Option<u64>,
    artist_id: Option<u64>,
    collection_name: Option<String>,
    artist_name: Option<String>,
    collection_view_url: Option<String>,
    artist_view_url: Option<String>,
    artwork_url_100: Option<String>,
}

impl SearchResultRow {
    /// Convert a response row into a hit for the requested kind. Rows
    /// missing the id or URL for that kind are dropped.
    fn into_hit(self, kind: ItemKind) -> Option<SearchHit> {
        let artist_name = self.artist_name.unwrap_or_default();
        match kind {
            ItemKind::Album => Some(SearchHit {
                id: self.collection_id?.to_string(),
                url: self.collection_view_url?,
                name: self.collection_name?,
                artist_name,
                kind,
            }),
            ItemKind::Artist => Some(SearchHit {
                id: self.artist_id?.to_string(),
                url: self.artist_view_url?,
                name: artist_name.clone(),
                artist_name,
                kind,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> SearchClient {
        SearchClient::new(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn test_build_search_url_album() {
        let url = test_client().build_search_url("Radiohead OK Computer", ItemKind::Album);
        assert!(url.starts_with("https://itunes.apple.com/search?term=Radiohead%20OK%20Computer"));
        assert!(url.contains("media=music"));
        assert!(url.contains("entity=album"));
        assert!(url.contains("attribute=albumTerm"));
        assert!(url.contains("limit=10"));
    }

    #[test]
    fn test_build_search_url_artist() {
        let url = test_client().build_search_url("Radiohead", ItemKind::Artist);
        assert!(url.contains("entity=musicArtist"));
        assert!(url.contains("attribute=artistTerm"));
    }

    #[tokio::test]
    async fn test_empty_term_skips_request() {
        // The default config points at the real catalog; an issued request
        // would fail in the test environment, so Ok(empty) proves no call
        // was made.
        let client = test_client();
        let cancel = CancellationToken::new();

        let hits = client.search("   ", ItemKind::Album, &cancel).await.unwrap();
        assert!(hits.is_empty());

        let images = client.search_artwork("\t\n", &cancel).await.unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_envelope_decoding() {
        let json = r#"{
            "resultCount": 2,
            "results": [
                {
                    "wrapperType": "collection",
                    "collectionId": 1097861387,
                    "collectionName": "OK Computer",
                    "artistName": "Radiohead",
                    "collectionViewUrl": "https://music.apple.com/us/album/ok-computer/1097861387",
                    "artworkUrl100": "https://example.mzstatic.com/image/thumb/cover/100x100bb.jpg"
                },
                {
                    "wrapperType": "collection",
                    "collectionName": "No Id Or Url"
                }
            ]
        }"#;

        let envelope: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.result_count, 2);

        let hits: Vec<SearchHit> = envelope
            .results
            .into_iter()
            .filter_map(|r| r.into_hit(ItemKind::Album))
            .collect();

        // The row without an id/URL is dropped, not an error.
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1097861387");
        assert_eq!(hits[0].name, "OK Computer");
        assert_eq!(hits[0].artist_name, "Radiohead");
        assert_eq!(
            hits[0].url,
            "https://music.apple.com/us/album/ok-computer/1097861387"
        );
    }

    #[test]
    fn test_envelope_decoding_artist() {
        let json = r#"{
            "resultCount": 1,
            "results": [
                {
                    "wrapperType": "artist",
                    "artistId": 657515,
                    "artistName": "Radiohead",
                    "artistViewUrl": "https://music.apple.com/us/artist/radiohead/657515"
                }
            ]
        }"#;

        let envelope: SearchResponse = serde_json::from_str(json).unwrap();
        let hits: Vec<SearchHit> = envelope
            .results
            .into_iter()
            .filter_map(|r| r.into_hit(ItemKind::Artist))
            .collect();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "657515");
        assert_eq!(hits[0].name, "Radiohead");
        assert_eq!(hits[0].kind, ItemKind::Artist);
    }

    #[test]
    fn test_empty_envelope() {
        let envelope: SearchResponse = serde_json::from_str(r#"{"resultCount": 0, "results": []}"#).unwrap();
        assert_eq!(envelope.result_count, 0);
        assert!(envelope.results.is_empty());
    }
}
