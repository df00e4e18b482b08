use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog search URL is an http(s) URL
/// - Timeout and search limit are sensible
/// - Artwork size is a "{width}x{height}{suffix}" token
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Catalog validation
    let url = &config.catalog.search_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "catalog.search_url must be an http(s) URL, got '{}'",
            url
        )));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.catalog.search_limit == 0 || config.catalog.search_limit > 200 {
        return Err(ConfigError::ValidationError(format!(
            "catalog.search_limit must be between 1 and 200, got {}",
            config.catalog.search_limit
        )));
    }

    if !is_size_token(&config.catalog.artwork_size) {
        return Err(ConfigError::ValidationError(format!(
            "catalog.artwork_size must look like '1400x1400bb', got '{}'",
            config.catalog.artwork_size
        )));
    }

    Ok(())
}

/// A size token starts with "{digits}x{digits}"; a short style suffix may follow.
fn is_size_token(token: &str) -> bool {
    let Some((width, rest)) = token.split_once('x') else {
        return false;
    };
    if width.is_empty() || !width.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let height_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    height_len > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, Config, ServerConfig};

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse().unwrap(),
                port: 0,
            },
            catalog: CatalogConfig::default(),
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_bad_search_url_fails() {
        let config = Config {
            server: ServerConfig::default(),
            catalog: CatalogConfig {
                search_url: "itunes.apple.com/search".to_string(),
                ..CatalogConfig::default()
            },
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_artwork_size_token() {
        let mut config = Config::default();
        config.catalog.artwork_size = "600x600cc".to_string();
        assert!(validate_config(&config).is_ok());

        config.catalog.artwork_size = "large".to_string();
        assert!(validate_config(&config).is_err());

        config.catalog.artwork_size = "x600".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_search_limit_bounds() {
        let mut config = Config::default();
        config.catalog.search_limit = 0;
        assert!(validate_config(&config).is_err());

        config.catalog.search_limit = 201;
        assert!(validate_config(&config).is_err());

        config.catalog.search_limit = 200;
        assert!(validate_config(&config).is_ok());
    }
}
