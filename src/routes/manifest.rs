//! Addon Descriptor Route
//!
//! Serves the static manifest the media client reads to discover what this
//! addon answers. Identical output for every request.

use axum::{response::IntoResponse, Json};

use crate::models::manifest::Manifest;

/// GET / and GET /manifest.json
pub async fn manifest() -> impl IntoResponse {
    Json(Manifest::new())
}
