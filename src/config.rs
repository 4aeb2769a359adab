//! Process configuration.
//!
//! Values come from CLI flags, which fall back to environment variables (a
//! `.env` file in the working directory is loaded first). The search endpoint
//! is validated once at startup: a missing or malformed URL is a configuration
//! error, reported before any request is attempted.

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

/// Search endpoint base URL.
pub const SEARCH_URL_ENV: &str = "SEARCH_URL";
/// Per-request search timeout in seconds (unset = transport default).
pub const SEARCH_TIMEOUT_ENV: &str = "SEARCH_TIMEOUT_SECS";
/// Markdown content root.
pub const CONTENT_DIR_ENV: &str = "BLOG_CONTENT_DIR";
/// Insert-statement artifact path.
pub const OUTPUT_ENV: &str = "SEARCH_INSERTS_OUTPUT";

pub const DEFAULT_CONTENT_DIR: &str = "src/markdown";
pub const DEFAULT_OUTPUT: &str = "search-inserts.sql";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search endpoint is not configured (set SEARCH_URL or pass --search-url)")]
    MissingSearchUrl,

    #[error("search endpoint `{url}` is not a valid http(s) URL: {reason}")]
    InvalidSearchUrl { url: String, reason: String },
}

/// Load `.env` from the working directory (or the nearest ancestor holding one).
///
/// Returns the loaded path, `None` when there is no `.env`. Runs before the log
/// subscriber exists, so reporting is left to the caller.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Validated search client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    endpoint: String,
    timeout_secs: Option<u64>,
}

impl SearchConfig {
    pub fn new(endpoint: Option<String>, timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let endpoint = endpoint
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSearchUrl)?;

        let parsed = Url::parse(&endpoint).map_err(|e| ConfigError::InvalidSearchUrl {
            url: endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSearchUrl {
                url: endpoint,
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        Ok(Self {
            endpoint,
            timeout_secs: timeout_secs.filter(|s| *s > 0),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }
}
