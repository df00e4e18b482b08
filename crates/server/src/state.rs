use tunedex_core::{Config, MetadataResolver, SearchClient};

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: MetadataResolver,
    artwork: SearchClient,
}

impl AppState {
    pub fn new(config: Config, resolver: MetadataResolver, artwork: SearchClient) -> Self {
        Self {
            config,
            resolver,
            artwork,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub fn artwork(&self) -> &SearchClient {
        &self.artwork
    }
}
