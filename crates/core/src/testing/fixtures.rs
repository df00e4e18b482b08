//! Ready-made records and queries for tests.

use chrono::NaiveDate;

use crate::resolver::{ItemKind, MetadataQuery, ScrapedArtist, ScrapedRecord};

/// An album record with a single artist and an optional release year.
pub fn album_record(
    name: &str,
    artist: &str,
    year: Option<i32>,
    catalog_id: &str,
) -> ScrapedRecord {
    ScrapedRecord {
        catalog_id: catalog_id.to_string(),
        name: name.to_string(),
        overview: Some(format!("{} by {}", name, artist)),
        release_date: year.and_then(|y| NaiveDate::from_ymd_opt(y, 6, 1)),
        artists: vec![ScrapedArtist {
            name: artist.to_string(),
            catalog_id: None,
        }],
        image_url: Some(format!(
            "https://example.mzstatic.com/{}/100x100cc.jpg",
            catalog_id
        )),
        kind: ItemKind::Album,
    }
}

/// An artist record.
pub fn artist_record(name: &str, catalog_id: &str) -> ScrapedRecord {
    ScrapedRecord {
        catalog_id: catalog_id.to_string(),
        name: name.to_string(),
        overview: None,
        release_date: None,
        artists: Vec::new(),
        image_url: Some(format!(
            "https://example.mzstatic.com/{}/100x100cc.jpg",
            catalog_id
        )),
        kind: ItemKind::Artist,
    }
}

/// An album query for the given term.
pub fn album_query(term: &str) -> MetadataQuery {
    MetadataQuery::album(term)
}
