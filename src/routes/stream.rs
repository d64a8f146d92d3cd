//! Stream Resolution Route
//!
//! The one route with behavior: runs the resolution pipeline for a composite
//! identifier. Only route-level problems (unknown media type, missing `.json`
//! suffix) are rejected; every resolution failure inside the pipeline comes
//! back as `200 { "streams": [] }`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::models::request::MediaType;
use crate::models::stream::StreamsResponse;
use crate::AppState;

/// GET /stream/:media_type/:id (id carries a `.json` suffix)
pub async fn get_streams(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let media_type: MediaType = media_type.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid media type. Use: movie or series"})),
        )
    })?;

    let raw_id = id.strip_suffix(".json").ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Stream path must end in .json"})),
        )
    })?;

    let streams = state.pipeline.streams(media_type, raw_id).await;

    Ok(Json(StreamsResponse { streams }))
}
