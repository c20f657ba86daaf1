use crate::config::types::{
    BrowserConfig, Config, CrawlerConfig, EmailsConfig, HttpConfig, RegistryConfig, SearchConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_search_config(&config.search)?;
    validate_crawler_config(&config.crawler)?;
    validate_emails_config(&config.emails)?;
    validate_registry_config(&config.registry)?;
    validate_browser_config(&config.browser)?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    validate_http_url("search endpoint", &config.endpoint)?;

    if config.max_results == 0 {
        return Err(ConfigError::Validation(
            "max_results must be >= 1".to_string(),
        ));
    }

    if config.blocklist.iter().any(|entry| entry.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "blocklist entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages_per_site == 0 {
        return Err(ConfigError::Validation(
            "max_pages_per_site must be >= 1".to_string(),
        ));
    }

    // Shortest possible candidate is "a@b.cd"
    if config.max_candidate_length < 6 {
        return Err(ConfigError::Validation(format!(
            "max_candidate_length must be >= 6, got {}",
            config.max_candidate_length
        )));
    }

    Ok(())
}

fn validate_emails_config(config: &EmailsConfig) -> Result<(), ConfigError> {
    if config.company_column.is_empty() {
        return Err(ConfigError::Validation(
            "company_column cannot be empty".to_string(),
        ));
    }

    if config.input_path.is_empty() || config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "emails input_path and output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_registry_config(config: &RegistryConfig) -> Result<(), ConfigError> {
    validate_http_url("registry base_url", &config.base_url)?;
    validate_http_url("registry search_url", &config.search_url)?;

    if !config.detail_path_prefix.starts_with('/') || config.detail_path_prefix.contains('"') {
        return Err(ConfigError::Validation(format!(
            "detail_path_prefix must start with '/' and contain no quotes, got '{}'",
            config.detail_path_prefix
        )));
    }

    if config
        .challenge_phrases
        .iter()
        .any(|phrase| phrase.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "challenge_phrases cannot contain empty entries".to_string(),
        ));
    }

    if config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "registry output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "browser request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if let Some(remote) = &config.remote_debugging_url {
        Url::parse(remote).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid remote_debugging_url '{}': {}", remote, e))
        })?;
    }

    Ok(())
}

/// Checks that a value is an absolute HTTP(S) URL
fn validate_http_url(label: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", label, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            label, value
        )));
    }

    Ok(())
}
