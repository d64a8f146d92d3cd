//! Cinemeta Metadata Resolver
//!
//! Translates an IMDb-style identifier into human-readable titles via the
//! Cinemeta-shaped metadata service: `GET {base}/meta/{type}/{id}.json`
//! returns a `meta` object with a `name` and, for series, a flat `videos`
//! array tagged with season/episode numbers.

use crate::models::request::{MediaType, RequestId};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Request timeout for metadata lookups
const METADATA_TIMEOUT_SECS: u64 = 10;

/// Metadata service error types
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Request did not complete within the deadline
    #[error("Metadata request timed out")]
    Timeout,
    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// JSON parsing error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Payload carried no usable title
    #[error("Metadata payload has no title")]
    MissingTitle,
}

/// Resolved titles for one identifier
///
/// `episode_title` is the empty string when the requested season/episode
/// pair is not listed; that is distinct from resolution failing outright,
/// which surfaces as a [`MetadataError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub main_title: String,
    pub episode_title: String,
}

/// Title lookup the resolution pipeline depends on
#[async_trait]
pub trait MetadataService: Send + Sync {
    async fn resolve(&self, request: &RequestId) -> Result<ResolvedTitle, MetadataError>;
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct MetaEnvelope {
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    videos: Vec<Video>,
}

/// One entry of the flat per-episode listing
#[derive(Debug, Deserialize)]
struct Video {
    #[serde(default)]
    season: Option<u32>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    title: Option<String>,
}

/// Select the episode title for an exact season/episode pair
///
/// First match wins when the listing carries duplicates; no match yields
/// the empty string.
fn episode_title(videos: &[Video], season: u32, episode: u32) -> String {
    videos
        .iter()
        .find(|v| v.season == Some(season) && v.number == Some(episode))
        .and_then(|v| v.title.clone())
        .unwrap_or_default()
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Cinemeta API client
pub struct CinemetaClient {
    http: Client,
    base_url: String,
}

impl CinemetaClient {
    /// Create a new Cinemeta client
    ///
    /// # Arguments
    /// * `base_url` - Service base URL (e.g., "https://v3-cinemeta.strem.io")
    /// * `user_agent` - User-Agent header sent with every call
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(METADATA_TIMEOUT_SECS))
            .user_agent(user_agent.to_string())
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetadataService for CinemetaClient {
    async fn resolve(&self, request: &RequestId) -> Result<ResolvedTitle, MetadataError> {
        let url = format!(
            "{}/meta/{}/{}.json",
            self.base_url, request.media_type, request.base_id
        );

        debug!("Metadata request: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MetadataError::Timeout
            } else {
                MetadataError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let envelope: MetaEnvelope = serde_json::from_str(&text).map_err(|e| {
            debug!("Response text: {}", &text[..text.len().min(500)]);
            MetadataError::Parse(e.to_string())
        })?;

        let meta = envelope.meta.ok_or(MetadataError::MissingTitle)?;
        let main_title = match meta.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(MetadataError::MissingTitle),
        };

        let episode_title = match (request.media_type, request.season, request.episode) {
            (MediaType::Series, Some(season), Some(episode)) => {
                episode_title(&meta.videos, season, episode)
            }
            _ => String::new(),
        };

        Ok(ResolvedTitle {
            main_title,
            episode_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos() -> Vec<Video> {
        vec![
            Video {
                season: Some(1),
                number: Some(1),
                title: Some("Pilot".to_string()),
            },
            Video {
                season: Some(1),
                number: Some(2),
                title: Some("Second".to_string()),
            },
            Video {
                season: Some(2),
                number: Some(1),
                title: Some("Return".to_string()),
            },
        ]
    }

    #[test]
    fn test_episode_title_exact_match() {
        assert_eq!(episode_title(&videos(), 1, 2), "Second");
        assert_eq!(episode_title(&videos(), 2, 1), "Return");
    }

    #[test]
    fn test_episode_title_no_match_is_empty() {
        assert_eq!(episode_title(&videos(), 1, 99), "");
        assert_eq!(episode_title(&videos(), 3, 1), "");
        assert_eq!(episode_title(&[], 1, 1), "");
    }

    #[test]
    fn test_episode_title_duplicate_pair_takes_first() {
        let mut listing = videos();
        listing.push(Video {
            season: Some(1),
            number: Some(1),
            title: Some("Pilot (redux)".to_string()),
        });

        assert_eq!(episode_title(&listing, 1, 1), "Pilot");
    }

    #[test]
    fn test_episode_title_untitled_entry_is_empty() {
        let listing = vec![Video {
            season: Some(1),
            number: Some(1),
            title: None,
        }];

        assert_eq!(episode_title(&listing, 1, 1), "");
    }

    #[test]
    fn test_meta_envelope_parses_series_payload() {
        let payload = r#"{
            "meta": {
                "name": "Sample Show",
                "videos": [
                    {"season": 1, "number": 1, "title": "Pilot"},
                    {"season": 1, "number": 2, "title": "Second"}
                ]
            }
        }"#;

        let envelope: MetaEnvelope = serde_json::from_str(payload).expect("payload parses");
        let meta = envelope.meta.expect("meta present");

        assert_eq!(meta.name.as_deref(), Some("Sample Show"));
        assert_eq!(meta.videos.len(), 2);
    }

    #[test]
    fn test_meta_envelope_parses_movie_payload_without_videos() {
        let payload = r#"{"meta": {"name": "Sample Film"}}"#;

        let envelope: MetaEnvelope = serde_json::from_str(payload).expect("payload parses");
        let meta = envelope.meta.expect("meta present");

        assert_eq!(meta.name.as_deref(), Some("Sample Film"));
        assert!(meta.videos.is_empty());
    }

    #[test]
    fn test_meta_envelope_tolerates_missing_meta() {
        let envelope: MetaEnvelope = serde_json::from_str("{}").expect("payload parses");

        assert!(envelope.meta.is_none());
    }
}
