use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Endpoint URL parses and uses http or https
/// - Timeout, if set, is not 0
/// - Poll interval is not 0
/// - Output path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint.url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "endpoint.url '{}' is not a valid URL: {}",
            config.endpoint.url, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "endpoint.url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.endpoint.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "endpoint.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.poller.interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "poller.interval_ms cannot be 0".to_string(),
        ));
    }

    if config.output.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_interval_zero_fails() {
        let mut config = Config::default();
        config.poller.interval_ms = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_bad_url_fails() {
        let mut config = Config::default();
        config.endpoint.url = "not a url".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_non_http_scheme_fails() {
        let mut config = Config::default();
        config.endpoint.url = "ftp://example.com/graphql".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.endpoint.timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_output_path_fails() {
        let mut config = Config::default();
        config.output.path = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }
}
