pub mod config;
pub mod resolver;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    ServerConfig,
};
pub use resolver::{
    provider_key, provider_url, resolved_metadata, with_artwork_size, AppleMusicService,
    CatalogError, ImageCandidate, ItemKind, MetadataQuery, MetadataResolver, MetadataService,
    PageScraper, ResolvedMetadata, ScrapedArtist, ScrapedRecord, SearchClient, SearchHit,
    PROVIDER_NAME,
};
