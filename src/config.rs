use std::time::Duration;

use clap::ValueEnum;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
pub const DEFAULT_DELAY_MS: u64 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DIAGNOSE_PATH: &str = "api/chatbot/diagnose";

/// Which responder answers the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponderKind {
    /// Local keyword rules
    Rules,
    /// Remote diagnosis endpoint
    Remote,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("endpoint URL '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Resolved runtime settings for a chat session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub responder: ResponderKind,
    pub diagnose_url: Url,
    pub reply_delay: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn new(
        responder: ResponderKind,
        endpoint: &str,
        delay_ms: u64,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            responder,
            diagnose_url: diagnose_url(endpoint)?,
            reply_delay: Duration::from_millis(delay_ms),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Builds the full diagnose URL from a base endpoint, keeping any path
/// prefix the endpoint already carries.
pub fn diagnose_url(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = |source| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    };

    let mut base = Url::parse(endpoint.trim()).map_err(invalid)?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(endpoint.to_string()));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(DIAGNOSE_PATH).map_err(invalid)
}
