//! Moviebox Content-Index Client
//!
//! HTTP client for the Moviebox catalog API: title search, item detail,
//! and per-server link lists for an item or episode.

use super::types::*;
use super::ContentIndex;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Content-index API error types
#[derive(Debug, Error)]
pub enum IndexError {
    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// JSON parsing error
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Moviebox API client
///
/// One instance is built at startup and shared across requests; the inner
/// reqwest client pools connections.
pub struct MovieboxClient {
    http: Client,
    base_url: String,
}

impl MovieboxClient {
    /// Create a new Moviebox client
    ///
    /// # Arguments
    /// * `base_url` - Index base URL (e.g., "https://api.moviebox.example")
    /// * `timeout_secs` - Request timeout applied to every call
    /// * `user_agent` - User-Agent header sent with every call
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(if timeout_secs == 0 {
                DEFAULT_TIMEOUT_SECS
            } else {
                timeout_secs
            }))
            .user_agent(user_agent.to_string())
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request against an API path
    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, IndexError> {
        let url = format!("{}{}", self.base_url, path_and_query);

        debug!("Moviebox API request: {}", path_and_query);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IndexError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| IndexError::Network(e.to_string()))?;

        // Some deployments answer "null" where an empty list is meant
        if text.is_empty() || text == "null" {
            return serde_json::from_str("[]").map_err(|e| IndexError::Parse(e.to_string()));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(
                "Failed to parse Moviebox response for '{}': {}",
                path_and_query, e
            );
            debug!("Response text: {}", &text[..text.len().min(500)]);
            IndexError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl ContentIndex for MovieboxClient {
    async fn search(&self, title: &str) -> Result<Vec<CatalogItem>, IndexError> {
        self.get(&format!(
            "/api/search?keyword={}",
            urlencoding::encode(title)
        ))
        .await
    }

    async fn details(&self, item: &CatalogItem) -> Result<CatalogDetails, IndexError> {
        self.get(&format!("/api/detail?id={}", urlencoding::encode(&item.id)))
            .await
    }

    async fn movie_server_groups(
        &self,
        details: &CatalogDetails,
    ) -> Result<Vec<ServerGroup>, IndexError> {
        self.get(&format!(
            "/api/servers?id={}",
            urlencoding::encode(&details.id)
        ))
        .await
    }

    async fn episode_server_groups(
        &self,
        episode: &Episode,
    ) -> Result<Vec<ServerGroup>, IndexError> {
        self.get(&format!(
            "/api/servers?episode_id={}",
            urlencoding::encode(&episode.id)
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_trailing_slash() {
        let client = MovieboxClient::new("https://api.moviebox.example/", 30, "test-agent");

        // Should not keep the trailing slash around for path concatenation
        assert_eq!(client.base_url, "https://api.moviebox.example");
    }

    #[test]
    fn test_client_zero_timeout_falls_back_to_default() {
        // Constructing with 0 must not produce an instant-timeout client
        let _client = MovieboxClient::new("https://api.moviebox.example", 0, "test-agent");
    }

    #[test]
    fn test_search_keyword_is_percent_encoded() {
        let encoded = urlencoding::encode("Sample Film & Friends");

        assert_eq!(encoded, "Sample%20Film%20%26%20Friends");
    }
}
