use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Catalog client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Search endpoint (default: https://itunes.apple.com/search).
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent string sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum number of search hits requested per query (default: 10).
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Artwork size token for full-size image URLs (default: 1400x1400bb).
    #[serde(default = "default_artwork_size")]
    pub artwork_size: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            search_limit: default_search_limit(),
            artwork_size: default_artwork_size(),
        }
    }
}

fn default_search_url() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("Tunedex/{}", env!("CARGO_PKG_VERSION"))
}

fn default_search_limit() -> u32 {
    10
}

fn default_artwork_size() -> String {
    "1400x1400bb".to_string()
}
