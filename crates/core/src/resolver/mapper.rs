//! Mapping from scraped records to the caller-facing output contract.

use super::types::{ResolvedMetadata, ScrapedRecord};

/// Artwork size token on thumbnails in the search JSON.
pub const SEARCH_ARTWORK_TOKEN: &str = "100x100bb";

/// Artwork size token on page-embedded artwork URLs.
pub const PAGE_ARTWORK_TOKEN: &str = "100x100cc";

/// Map a scraped record into resolved metadata.
///
/// Pure transformation; any record reaching this point already satisfies
/// the scraper's required-field invariants. Artist order is preserved, the
/// first artist being the primary one.
pub fn resolved_metadata(record: ScrapedRecord) -> ResolvedMetadata {
    let year = record.release_year();
    ResolvedMetadata {
        name: record.name,
        overview: record.overview,
        year,
        artists: record.artists.into_iter().map(|a| a.name).collect(),
        provider_id: record.catalog_id,
        image_url: record.image_url,
        kind: record.kind,
    }
}

/// Substitute the catalog's default artwork size token in `url` with the
/// requested `size` token.
///
/// The match is a case-insensitive literal substring search over the known
/// default tokens. When neither token occurs (the catalog changed its URL
/// format), the URL is returned unchanged rather than producing a
/// malformed one; callers must tolerate receiving the default size.
pub fn with_artwork_size(url: &str, size: &str) -> String {
    for token in [SEARCH_ARTWORK_TOKEN, PAGE_ARTWORK_TOKEN] {
        if let Some(replaced) = replace_ignore_case(url, token, size) {
            return replaced;
        }
    }
    url.to_string()
}

/// Parse "{width}x{height}{suffix}" into pixel dimensions.
pub(crate) fn size_dimensions(size: &str) -> Option<(u32, u32)> {
    let (width, rest) = size.split_once('x')?;
    let height: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((width.parse().ok()?, height.parse().ok()?))
}

/// Replace every case-insensitive occurrence of `token`, or None when the
/// token does not occur. Tokens are ASCII, so byte-offset math is safe.
fn replace_ignore_case(haystack: &str, token: &str, replacement: &str) -> Option<String> {
    let lower_haystack = haystack.to_ascii_lowercase();
    let lower_token = token.to_ascii_lowercase();

    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    let mut found = false;

    while let Some(pos) = lower_haystack[cursor..].find(&lower_token) {
        let start = cursor + pos;
        out.push_str(&haystack[cursor..start]);
        out.push_str(replacement);
        cursor = start + token.len();
        found = true;
    }

    if !found {
        return None;
    }

    out.push_str(&haystack[cursor..]);
    Some(out)
}
