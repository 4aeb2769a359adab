//! HTTP client for the external full-text search service.
//!
//! One GET per call, no caching, no retries. Failures are swallowed by
//! [`SearchClient::search`] and reported as "no results"; callers that want the
//! reason can use [`SearchClient::try_search`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::model::types::SearchResultItem;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("building http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("search service returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("decoding search response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    endpoint: String,
    http: Client,
}

impl SearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut builder =
            Client::builder().user_agent(concat!("blog-search/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(SearchError::Client)?;
        Ok(Self {
            endpoint: config.endpoint().to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}?q={query}` with the query percent-encoded.
    ///
    /// An empty query is sent as-is (`q=`); the service decides what that means.
    pub fn request_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }

    /// Run the query and surface why it failed, if it did.
    pub async fn try_search(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        let url = self.request_url(query);
        debug!(url = %url, "search request");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status { status });
        }

        response
            .json::<Vec<SearchResultItem>>()
            .await
            .map_err(SearchError::Decode)
    }

    /// Run the query; any failure yields an empty list.
    ///
    /// An empty result is therefore ambiguous between "no matches" and "search
    /// backend unavailable". The failure reason is logged at `warn`.
    pub async fn search(&self, query: &str) -> Vec<SearchResultItem> {
        match self.try_search(query).await {
            Ok(items) => {
                debug!(query, count = items.len(), "search complete");
                items
            }
            Err(e) => {
                warn!(query, error = %e, "search unavailable, returning no results");
                Vec::new()
            }
        }
    }
}
