use super::models::Config;
use crate::discovery::media;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: &'static str, value: u64 },

    #[error("fetch.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("Size limit must be positive: {field}")]
    ZeroSizeLimit { field: &'static str },

    #[error("discovery.feed_types must list at least one media type")]
    NoFeedTypes,

    #[error("discovery.feed_types contains an invalid media type: '{0}'")]
    InvalidFeedType(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_fetch(config)?;
    validate_limits(config)?;
    validate_discovery(config)?;
    Ok(())
}

fn validate_fetch(config: &Config) -> Result<(), ValidationError> {
    let fetch = &config.fetch;

    if fetch.connect_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "fetch.connect_timeout_secs",
            value: fetch.connect_timeout_secs,
        });
    }

    if fetch.request_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "fetch.request_timeout_secs",
            value: fetch.request_timeout_secs,
        });
    }

    if fetch.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    Ok(())
}

fn validate_limits(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_request_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroSizeLimit {
            field: "server.max_request_bytes",
        });
    }

    if config.fetch.max_page_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroSizeLimit {
            field: "fetch.max_page_bytes",
        });
    }

    Ok(())
}

fn validate_discovery(config: &Config) -> Result<(), ValidationError> {
    let feed_types = &config.discovery.feed_types;

    if feed_types.is_empty() {
        return Err(ValidationError::NoFeedTypes);
    }

    if let Some(invalid) = feed_types.iter().find(|t| media::essence(t).is_none()) {
        return Err(ValidationError::InvalidFeedType(invalid.clone()));
    }

    Ok(())
}
