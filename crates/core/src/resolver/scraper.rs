//! Catalog item page scraper.
//!
//! Catalog pages embed a schema.org JSON-LD block alongside the
//! human-readable markup; that block is the source of truth here. No DOM
//! parsing is attempted: a lightweight regex locates the script tags and
//! serde_json does the rest.
//!
//! Missing pages and unusable pages are soft failures (`Ok(None)`): stale
//! search-hit URLs are common and must not abort a multi-candidate
//! resolution.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::CatalogConfig;

use super::types::{ItemKind, ScrapedArtist, ScrapedRecord};
use super::CatalogError;

static LD_JSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<script[^>]*type="application/ld\+json"[^>]*>(.*?)</script>"#).unwrap()
});

static SIZE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)x(\d+)").unwrap());

/// Scraper for catalog item pages.
pub struct PageScraper {
    client: Client,
}

impl PageScraper {
    /// Create a new page scraper.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch and parse a single catalog item page.
    ///
    /// Returns `Ok(None)` when the page is gone, redirects somewhere
    /// without a matching JSON-LD block, or is missing a required field.
    pub async fn scrape(
        &self,
        url: &str,
        kind: ItemKind,
        cancel: &CancellationToken,
    ) -> Result<Option<ScrapedRecord>, CatalogError> {
        debug!(url = url, kind = ?kind, "Scraping catalog page");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
            result = self.client.get(url).send() => result?,
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            debug!(url = url, "Catalog page does not exist");
            return Ok(None);
        }
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

        // The fetch may have been redirected; the id comes from where we
        // actually landed.
        let final_url = response.url().to_string();

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
            result = response.text() => result?,
        };

        Ok(record_from_page(&body, &final_url, kind))
    }
}

/// Parse a fetched page into a record, or None when the page is unusable.
fn record_from_page(html: &str, page_url: &str, kind: ItemKind) -> Option<ScrapedRecord> {
    let item = find_ld_item(html, kind)?;

    if item.name.trim().is_empty() {
        debug!(url = page_url, "Page item has no name, discarding");
        return None;
    }

    let Some(catalog_id) = catalog_id_from_url(page_url) else {
        debug!(url = page_url, "No catalog id in page URL, discarding");
        return None;
    };

    let artists: Vec<ScrapedArtist> = item
        .by_artist
        .map(LdArtists::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter(|a| !a.name.trim().is_empty())
        .map(|a| ScrapedArtist {
            catalog_id: a.url.as_deref().and_then(catalog_id_from_url),
            name: a.name,
        })
        .collect();

    // An album credited to nobody is a broken page, not partial metadata.
    if kind == ItemKind::Album && artists.is_empty() {
        debug!(url = page_url, "Album page has no artists, discarding");
        return None;
    }

    Some(ScrapedRecord {
        catalog_id,
        name: item.name,
        overview: item.description.filter(|d| !d.trim().is_empty()),
        release_date: item.date_published.as_deref().and_then(parse_release_date),
        artists,
        image_url: item.image.and_then(best_image),
        kind,
    })
}

/// Locate the JSON-LD block matching the expected item kind.
///
/// Pages can carry several `ld+json` scripts (breadcrumbs and the like);
/// the first block that parses and has the right `@type` wins. A page with
/// no matching block, including a redirect to an unrelated page, yields
/// None.
fn find_ld_item(html: &str, kind: ItemKind) -> Option<LdItem> {
    let expected = match kind {
        ItemKind::Album => "MusicAlbum",
        ItemKind::Artist => "MusicGroup",
    };

    for captures in LD_JSON_RE.captures_iter(html) {
        let raw = captures.get(1)?.as_str();
        match serde_json::from_str::<LdItem>(raw) {
            Ok(item) if item.item_type == expected => return Some(item),
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "Skipping unparseable JSON-LD block");
                continue;
            }
        }
    }

    None
}

/// Extract the trailing numeric path segment of a catalog URL.
///
/// Handles both modern (`/album/ok-computer/1097861387`) and legacy
/// (`/album/id1097861387`) forms; query string and fragment are ignored.
fn catalog_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let last = path.trim_end_matches('/').rsplit('/').next()?;
    let digits = last.strip_prefix("id").unwrap_or(last);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits.to_string())
    } else {
        None
    }
}

/// Parse a published date, tolerating bare-year values.
fn parse_release_date(raw: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            raw.parse::<i32>()
                .ok()
                .and_then(|year| chrono::NaiveDate::from_ymd_opt(year, 1, 1))
        })
}

/// Pick the highest-resolution variant when the page exposes several
/// artwork URLs; sizes are compared by the `{W}x{H}` token in the URL.
fn best_image(image: LdImage) -> Option<String> {
    match image {
        LdImage::One(url) => Some(url),
        LdImage::Many(urls) => urls
            .iter()
            .enumerate()
            // On equal area (no size token anywhere) the earliest entry wins.
            .max_by_key(|(i, url)| (image_area(url), std::cmp::Reverse(*i)))
            .map(|(_, url)| url.clone()),
    }
}

fn image_area(url: &str) -> u64 {
    SIZE_TOKEN_RE
        .captures(url)
        .and_then(|c| {
            let width: u64 = c.get(1)?.as_str().parse().ok()?;
            let height: u64 = c.get(2)?.as_str().parse().ok()?;
            Some(width * height)
        })
        .unwrap_or(0)
}

// ============================================================================
// JSON-LD Shapes (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct LdItem {
    #[serde(rename = "@type", default)]
    item_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<LdImage>,
    #[serde(rename = "datePublished", default)]
    date_published: Option<String>,
    #[serde(rename = "byArtist", default)]
    by_artist: Option<LdArtists>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdImage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdArtists {
    One(LdArtist),
    Many(Vec<LdArtist>),
}

impl LdArtists {
    fn into_vec(self) -> Vec<LdArtist> {
        match self {
            LdArtists::One(artist) => vec![artist],
            LdArtists::Many(artists) => artists,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LdArtist {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM_URL: &str = "https://music.apple.com/us/album/ok-computer/1097861387";

    fn album_page() -> String {
        r##"<!DOCTYPE html>
<html>
<head>
<script type="application/ld+json">
{"@context":"https://schema.org","@type":"BreadcrumbList","itemListElement":[]}
</script>
<script id="schema:music-album" type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "MusicAlbum",
  "name": "OK Computer",
  "description": "Radiohead's third studio album.",
  "datePublished": "1997-06-16",
  "image": [
    "https://example.mzstatic.com/image/thumb/cover/100x100cc.jpg",
    "https://example.mzstatic.com/image/thumb/cover/1200x630wp.png"
  ],
  "byArtist": [
    {"@type": "MusicGroup", "name": "Radiohead", "url": "https://music.apple.com/us/artist/radiohead/657515"}
  ]
}
</script>
</head>
<body><h1>OK Computer</h1></body>
</html>"##
            .to_string()
    }

    #[test]
    fn test_record_from_album_page() {
        let record = record_from_page(&album_page(), ALBUM_URL, ItemKind::Album).unwrap();

        assert_eq!(record.catalog_id, "1097861387");
        assert_eq!(record.name, "OK Computer");
        assert_eq!(
            record.overview.as_deref(),
            Some("Radiohead's third studio album.")
        );
        assert_eq!(record.release_year(), Some(1997));
        assert_eq!(record.artists.len(), 1);
        assert_eq!(record.artists[0].name, "Radiohead");
        assert_eq!(record.artists[0].catalog_id.as_deref(), Some("657515"));
        // The larger variant wins over the 100x100 thumbnail.
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://example.mzstatic.com/image/thumb/cover/1200x630wp.png")
        );
        assert_eq!(record.kind, ItemKind::Album);
    }

    #[test]
    fn test_record_from_artist_page() {
        let html = r##"<html><head>
<script type="application/ld+json">
{"@type": "MusicGroup", "name": "Radiohead", "image": "https://example.com/artist/100x100cc.jpg"}
</script>
</head></html>"##;

        let record = record_from_page(
            html,
            "https://music.apple.com/us/artist/radiohead/657515",
            ItemKind::Artist,
        )
        .unwrap();

        assert_eq!(record.catalog_id, "657515");
        assert_eq!(record.name, "Radiohead");
        assert!(record.artists.is_empty());
        assert!(record.release_date.is_none());
        assert_eq!(record.kind, ItemKind::Artist);
    }

    #[test]
    fn test_wrong_item_type_discarded() {
        // An album query landing on an artist page yields nothing.
        let html = r##"<html><head>
<script type="application/ld+json">
{"@type": "MusicGroup", "name": "Radiohead"}
</script>
</head></html>"##;

        assert!(record_from_page(html, ALBUM_URL, ItemKind::Album).is_none());
    }

    #[test]
    fn test_page_without_ld_json_discarded() {
        let html = "<html><body>Storefront landing page</body></html>";
        assert!(record_from_page(html, ALBUM_URL, ItemKind::Album).is_none());
    }

    #[test]
    fn test_missing_name_discarded() {
        let html = r##"<script type="application/ld+json">
{"@type": "MusicAlbum", "byArtist": [{"name": "Someone"}]}
</script>"##;

        assert!(record_from_page(html, ALBUM_URL, ItemKind::Album).is_none());
    }

    #[test]
    fn test_album_without_artists_discarded() {
        let html = r##"<script type="application/ld+json">
{"@type": "MusicAlbum", "name": "Orphan Album"}
</script>"##;

        assert!(record_from_page(html, ALBUM_URL, ItemKind::Album).is_none());
    }

    #[test]
    fn test_non_numeric_page_url_discarded() {
        let html = album_page();
        assert!(record_from_page(
            &html,
            "https://music.apple.com/us/browse",
            ItemKind::Album
        )
        .is_none());
    }

    #[test]
    fn test_partial_metadata_is_kept() {
        // Only name, id and one artist: still a usable record.
        let html = r##"<script type="application/ld+json">
{"@type": "MusicAlbum", "name": "Sparse", "byArtist": {"name": "Solo Act"}}
</script>"##;

        let record = record_from_page(html, ALBUM_URL, ItemKind::Album).unwrap();
        assert_eq!(record.name, "Sparse");
        assert!(record.overview.is_none());
        assert!(record.release_date.is_none());
        assert!(record.image_url.is_none());
        assert_eq!(record.artists[0].name, "Solo Act");
    }

    #[test]
    fn test_catalog_id_from_url() {
        assert_eq!(
            catalog_id_from_url("https://music.apple.com/us/album/ok-computer/1097861387"),
            Some("1097861387".to_string())
        );
        assert_eq!(
            catalog_id_from_url("https://music.apple.com/album/id1097861387?uo=4"),
            Some("1097861387".to_string())
        );
        assert_eq!(
            catalog_id_from_url("https://music.apple.com/us/album/ok-computer/1097861387/"),
            Some("1097861387".to_string())
        );
        assert_eq!(catalog_id_from_url("https://music.apple.com/us/browse"), None);
        assert_eq!(catalog_id_from_url(""), None);
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("1997-06-16"),
            chrono::NaiveDate::from_ymd_opt(1997, 6, 16)
        );
        // Bare year collapses to January 1st.
        assert_eq!(
            parse_release_date("1997"),
            chrono::NaiveDate::from_ymd_opt(1997, 1, 1)
        );
        assert_eq!(parse_release_date("next tuesday"), None);
    }

    #[test]
    fn test_best_image_single() {
        assert_eq!(
            best_image(LdImage::One("https://example.com/a.jpg".to_string())),
            Some("https://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_best_image_no_size_tokens_keeps_first() {
        let urls = vec![
            "https://example.com/first.jpg".to_string(),
            "https://example.com/second.jpg".to_string(),
        ];
        assert_eq!(
            best_image(LdImage::Many(urls)),
            Some("https://example.com/first.jpg".to_string())
        );
    }
}
