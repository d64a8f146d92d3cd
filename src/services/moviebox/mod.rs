//! Moviebox Content-Index Integration
//!
//! This module provides the content-index side of the resolution pipeline:
//!
//! - **Search**: look up catalog items by resolved title
//! - **Detail**: expand an item into its season/episode structure
//! - **Servers**: fetch per-server link lists for an item or episode
//!
//! The pipeline depends on the [`ContentIndex`] trait rather than the HTTP
//! client directly, so tests can substitute canned catalogs.

use async_trait::async_trait;

pub mod client;
pub mod types;

// Re-exports for convenience
pub use client::{IndexError, MovieboxClient};
pub use types::{CatalogDetails, CatalogItem, Episode, Link, Season, ServerGroup};

/// Operations the resolution pipeline requires from the content index
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Search the catalog by title; may return an empty list
    async fn search(&self, title: &str) -> Result<Vec<CatalogItem>, IndexError>;

    /// Expand a search hit into full details
    async fn details(&self, item: &CatalogItem) -> Result<CatalogDetails, IndexError>;

    /// Server groups for a movie
    async fn movie_server_groups(
        &self,
        details: &CatalogDetails,
    ) -> Result<Vec<ServerGroup>, IndexError>;

    /// Server groups for a single episode
    async fn episode_server_groups(
        &self,
        episode: &Episode,
    ) -> Result<Vec<ServerGroup>, IndexError>;
}
