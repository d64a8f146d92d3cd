//! Resolution Pipeline
//!
//! Turns a raw request identifier into a list of playable streams in four
//! sequential stages: parse the identifier, resolve it to titles via the
//! metadata service, match the title against the content index (descending
//! into season/episode for series), and flatten the per-server link lists
//! into display-ready stream descriptors.
//!
//! Every stage returns `Result<_, PipelineFault>`; the single public entry
//! point maps any fault to an empty list after logging it, so resolution
//! failures never surface as HTTP errors.

use crate::models::request::{MediaType, RequestId};
use crate::models::stream::Stream;
use crate::services::cinemeta::{MetadataService, ResolvedTitle};
use crate::services::moviebox::{CatalogItem, ContentIndex, IndexError, ServerGroup};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Short label prefix on every stream candidate
const PROVIDER_TAG: &str = "Moviebox";

/// Shown in place of a size the index did not report
const SIZE_PLACEHOLDER: &str = "N/A";

/// Everything that can sink a resolution attempt
///
/// Each variant is recovered locally into an empty stream list; the variant
/// decides the log level.
#[derive(Debug, Error)]
pub enum PipelineFault {
    /// Identifier does not parse into a usable request
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),
    /// Metadata service unreachable, timed out, or returned no usable title
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(String),
    /// Search or season/episode lookup found nothing to play
    #[error("No match: {0}")]
    NoMatch(String),
    /// Unexpected content-index failure during detail/server fetch
    #[error("Content index fault: {0}")]
    CollaboratorFault(#[from] IndexError),
}

impl PipelineFault {
    fn log(&self, raw_id: &str) {
        match self {
            PipelineFault::MalformedIdentifier(_) => warn!("{} (id: {})", self, raw_id),
            PipelineFault::MetadataUnavailable(_) => warn!("{} (id: {})", self, raw_id),
            PipelineFault::NoMatch(_) => info!("{} (id: {})", self, raw_id),
            PipelineFault::CollaboratorFault(_) => error!("{} (id: {})", self, raw_id),
        }
    }
}

/// Parse the composite request identifier
///
/// Movies take the id as-is. Series ids must be exactly
/// `base:season:episode` with non-negative integer season and episode.
pub fn parse_request_id(media_type: MediaType, raw: &str) -> Result<RequestId, PipelineFault> {
    match media_type {
        MediaType::Movie => Ok(RequestId {
            base_id: raw.to_string(),
            media_type,
            season: None,
            episode: None,
        }),
        MediaType::Series => {
            let parts: Vec<&str> = raw.split(':').collect();
            if parts.len() != 3 || parts[0].is_empty() {
                return Err(PipelineFault::MalformedIdentifier(raw.to_string()));
            }

            let season: u32 = parts[1]
                .parse()
                .map_err(|_| PipelineFault::MalformedIdentifier(raw.to_string()))?;
            let episode: u32 = parts[2]
                .parse()
                .map_err(|_| PipelineFault::MalformedIdentifier(raw.to_string()))?;

            Ok(RequestId {
                base_id: parts[0].to_string(),
                media_type,
                season: Some(season),
                episode: Some(episode),
            })
        }
    }
}

/// Pick the authoritative match from the search results
///
/// First result wins. A scored strategy (normalized-title comparison, edit
/// distance) can replace the body as long as the first result stays the
/// fallback when scoring is inconclusive.
fn select_best_match<'a>(candidates: &'a [CatalogItem], _title: &str) -> Option<&'a CatalogItem> {
    candidates.first()
}

/// First line of the stream description
///
/// Movies use the main title alone; series append the episode code and, when
/// known, the episode title.
fn stream_heading(request: &RequestId, resolved: &ResolvedTitle) -> String {
    match (request.media_type, request.season, request.episode) {
        (MediaType::Series, Some(season), Some(episode)) => {
            if resolved.episode_title.is_empty() {
                format!("{} S{:02}E{:02}", resolved.main_title, season, episode)
            } else {
                format!(
                    "{} S{:02}E{:02} - {}",
                    resolved.main_title, season, episode, resolved.episode_title
                )
            }
        }
        _ => resolved.main_title.clone(),
    }
}

/// Flatten server groups into stream descriptors
///
/// Output order is the nested collection order: server groups first, links
/// within each group second. No re-sorting by quality or size.
fn normalize(groups: &[ServerGroup], request: &RequestId, resolved: &ResolvedTitle) -> Vec<Stream> {
    let heading = stream_heading(request, resolved);

    let mut streams = Vec::new();
    for group in groups {
        for link in &group.links {
            streams.push(Stream {
                name: format!("{}\n{}", PROVIDER_TAG, link.quality),
                title: format!(
                    "{}\n{} | {}\nServer: {}",
                    heading,
                    link.quality,
                    link.size.as_deref().unwrap_or(SIZE_PLACEHOLDER),
                    group.server_name
                ),
                url: link.url.clone(),
            });
        }
    }
    streams
}

/// Request-scoped resolution pipeline over shared collaborator handles
pub struct Pipeline {
    metadata: Arc<dyn MetadataService>,
    index: Arc<dyn ContentIndex>,
}

impl Pipeline {
    pub fn new(metadata: Arc<dyn MetadataService>, index: Arc<dyn ContentIndex>) -> Self {
        Self { metadata, index }
    }

    /// Resolve an identifier to stream candidates
    ///
    /// Never fails: any pipeline fault is logged and degrades to an empty
    /// list, per the contract with the calling client.
    pub async fn streams(&self, media_type: MediaType, raw_id: &str) -> Vec<Stream> {
        match self.resolve(media_type, raw_id).await {
            Ok(streams) => {
                info!("Resolved {} stream(s) for {} {}", streams.len(), media_type, raw_id);
                streams
            }
            Err(fault) => {
                fault.log(raw_id);
                Vec::new()
            }
        }
    }

    async fn resolve(
        &self,
        media_type: MediaType,
        raw_id: &str,
    ) -> Result<Vec<Stream>, PipelineFault> {
        let request = parse_request_id(media_type, raw_id)?;

        let resolved = self
            .metadata
            .resolve(&request)
            .await
            .map_err(|e| PipelineFault::MetadataUnavailable(e.to_string()))?;

        self.match_content(&request, &resolved).await
    }

    /// Search, disambiguate, and fetch server groups for the request
    async fn match_content(
        &self,
        request: &RequestId,
        resolved: &ResolvedTitle,
    ) -> Result<Vec<Stream>, PipelineFault> {
        let candidates = self.index.search(&resolved.main_title).await?;

        let item = select_best_match(&candidates, &resolved.main_title).ok_or_else(|| {
            PipelineFault::NoMatch(format!("no search results for '{}'", resolved.main_title))
        })?;

        let details = self.index.details(item).await?;

        let groups = match request.media_type {
            MediaType::Movie => self.index.movie_server_groups(&details).await?,
            MediaType::Series => {
                // The parser guarantees both numbers for series requests
                let (Some(season_no), Some(episode_no)) = (request.season, request.episode) else {
                    return Err(PipelineFault::MalformedIdentifier(request.base_id.clone()));
                };

                let season = details.season(season_no).ok_or_else(|| {
                    PipelineFault::NoMatch(format!(
                        "'{}' has no season {}",
                        details.title, season_no
                    ))
                })?;
                let episode = season.episode(episode_no).ok_or_else(|| {
                    PipelineFault::NoMatch(format!(
                        "'{}' season {} has no episode {}",
                        details.title, season_no, episode_no
                    ))
                })?;

                self.index.episode_server_groups(episode).await?
            }
        };

        Ok(normalize(&groups, request, resolved))
    }
}
