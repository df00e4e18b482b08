//! Provider-key conventions for callers that persist catalog identifiers.

use super::types::ItemKind;

/// Human-readable provider name.
pub const PROVIDER_NAME: &str = "Apple Music";

const PROVIDER_KEY_ALBUM: &str = "AppleMusicAlbum";
const PROVIDER_KEY_ARTIST: &str = "AppleMusicArtist";

const PAGE_BASE_URL: &str = "https://music.apple.com";

/// The key under which callers store a resolved item's catalog identifier.
pub fn provider_key(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Album => PROVIDER_KEY_ALBUM,
        ItemKind::Artist => PROVIDER_KEY_ARTIST,
    }
}

/// Rebuild an item page URL from a stored catalog identifier. The
/// storefront-less form redirects to the caller's default storefront.
pub fn provider_url(kind: ItemKind, id: &str) -> String {
    match kind {
        ItemKind::Album => format!("{}/album/{}", PAGE_BASE_URL, id),
        ItemKind::Artist => format!("{}/artist/{}", PAGE_BASE_URL, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_keys_differ_by_kind() {
        assert_ne!(provider_key(ItemKind::Album), provider_key(ItemKind::Artist));
    }

    #[test]
    fn test_provider_url() {
        assert_eq!(
            provider_url(ItemKind::Album, "1097861387"),
            "https://music.apple.com/album/1097861387"
        );
        assert_eq!(
            provider_url(ItemKind::Artist, "657515"),
            "https://music.apple.com/artist/657515"
        );
    }
}
