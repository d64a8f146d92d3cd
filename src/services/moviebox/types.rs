//! Moviebox Catalog Types
//!
//! Type definitions for Moviebox content-index API responses.

use serde::{Deserialize, Serialize};

/// Search hit from the content index
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
}

/// Expanded catalog item (from the detail endpoint)
///
/// Movies carry an empty `seasons` list; series expose the full
/// season/episode structure in catalog order.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogDetails {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

/// Season within a series detail
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Season {
    pub number: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Episode within a season
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Episode {
    pub id: String,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// Per-server group of playable links
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerGroup {
    pub server_name: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Single playable link as the index reports it
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Link {
    pub url: String,
    pub quality: String,
    #[serde(default)]
    pub size: Option<String>,
}

impl CatalogDetails {
    /// Find a season by exact number, preserving catalog order on ties
    pub fn season(&self, number: u32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.number == number)
    }
}

impl Season {
    /// Find an episode by exact number
    pub fn episode(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.number == number)
    }
}
