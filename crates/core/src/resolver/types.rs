//! Types for catalog search and metadata resolution.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of catalog item a query targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Album,
    Artist,
}

/// A lightweight hit from the catalog search endpoint.
///
/// Produced by the query client and consumed immediately by the resolver;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Numeric catalog identifier, as a string.
    pub id: String,
    /// Catalog page URL for the item.
    pub url: String,
    /// Album or artist name.
    pub name: String,
    /// Credited artist name (same as `name` for artist hits).
    pub artist_name: String,
    /// What the hit is.
    pub kind: ItemKind,
}

/// An artist credit on a scraped record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapedArtist {
    /// Artist name.
    pub name: String,
    /// Catalog identifier, when the page links the artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
}

/// A structured record extracted from a single catalog item page.
///
/// `catalog_id` and `name` are required; a page missing either is treated
/// as unscrapeable and yields no record at all. An album record must carry
/// at least one artist. Everything else is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapedRecord {
    /// Numeric catalog identifier, as a string.
    pub catalog_id: String,
    /// Item name.
    pub name: String,
    /// Descriptive text, when the page has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Release date (albums only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    /// Credited artists in page order. First entry is the primary artist.
    #[serde(default)]
    pub artists: Vec<ScrapedArtist>,
    /// Primary artwork URL, highest resolution the page exposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// What the record describes.
    pub kind: ItemKind,
}

impl ScrapedRecord {
    /// Get the release year from the release date.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }
}

/// Input contract for metadata resolution. Immutable per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataQuery {
    /// Free-text search term, typically "{artist} {album}".
    pub term: String,
    /// Kind of item to resolve.
    pub kind: ItemKind,
    /// When set, candidates whose release year is known and differs are
    /// rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_hint: Option<i32>,
    /// Previously stored catalog page URL. When set, search is skipped and
    /// only this URL is scraped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
}

impl MetadataQuery {
    /// Query for an album by free-text term.
    pub fn album(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            kind: ItemKind::Album,
            year_hint: None,
            provider_url: None,
        }
    }

    /// Query for an artist by free-text term.
    pub fn artist(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            kind: ItemKind::Artist,
            year_hint: None,
            provider_url: None,
        }
    }

    /// Restrict acceptable candidates to the given release year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year_hint = Some(year);
        self
    }

    /// Resolve directly from a stored provider URL, skipping search.
    pub fn with_provider_url(mut self, url: impl Into<String>) -> Self {
        self.provider_url = Some(url.into());
        self
    }
}

/// The final resolved metadata returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedMetadata {
    /// Item name.
    pub name: String,
    /// Descriptive text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Artist names in credit order. First entry is the primary artist.
    #[serde(default)]
    pub artists: Vec<String>,
    /// Catalog identifier to store for later direct lookup.
    pub provider_id: String,
    /// Primary artwork URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// What the metadata describes.
    pub kind: ItemKind,
}

impl ResolvedMetadata {
    /// The primary (first-credited) artist, if any.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|s| s.as_str())
    }
}

/// An artwork candidate from the image-only lookup path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageCandidate {
    /// Full-size artwork URL.
    pub url: String,
    /// Thumbnail URL as returned by the catalog.
    pub thumbnail_url: String,
    /// Width of the full-size variant in pixels.
    pub width: u32,
    /// Height of the full-size variant in pixels.
    pub height: u32,
}
