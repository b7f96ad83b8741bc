use crate::config::types::Config;
use crate::ConfigError;

/// Validates a loaded configuration
///
/// Rejects values that would make the engine useless (zero attempts, zero
/// concurrency) or internally inconsistent (default limit above the cap).
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.fetch.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "fetch.max-attempts must be at least 1".to_string(),
        ));
    }

    if config.fetch.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "fetch.request-timeout-ms must be positive".to_string(),
        ));
    }

    if config.crawl.concurrency == 0 {
        return Err(ConfigError::Validation(
            "crawl.concurrency must be at least 1".to_string(),
        ));
    }

    if config.crawl.max_limit == 0 {
        return Err(ConfigError::Validation(
            "crawl.max-limit must be positive".to_string(),
        ));
    }

    if config.crawl.default_limit > config.crawl.max_limit {
        return Err(ConfigError::Validation(format!(
            "crawl.default-limit ({}) exceeds crawl.max-limit ({})",
            config.crawl.default_limit, config.crawl.max_limit
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = Config::default();
        config.fetch.max_attempts = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.crawl.concurrency = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_default_limit_above_cap_rejected() {
        let mut config = Config::default();
        config.crawl.default_limit = 50_000;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("default-limit"));
    }
}
