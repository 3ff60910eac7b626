use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Limited, LengthLimitError};

use super::{
    models::{DiscoverRequest, DiscoverResponse, HealthResponse},
    state::AppState,
    utils::is_json_content_type,
};
use crate::api::error::ApiError;

/// Feed discovery endpoint (POST /)
///
/// ## Flow:
/// 1. Read the body (bounded by `server.max_request_bytes`)
/// 2. Decode `{"blogUrl": ...}`; a non-JSON content type counts as an empty object
/// 3. Validate the URL, fetch the page, extract feed links
/// 4. Return 200 with `{"feedUrls": [...]}`
///
/// Any stage failure short-circuits into an HTML error page carrying the
/// stage's status code.
pub async fn discover_feeds(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    state.metrics.request_received();

    let result = discover(&state, &headers, body).await;
    match &result {
        Ok(response) => state.metrics.discovery_succeeded(response.feed_urls.len()),
        Err(_) => state.metrics.discovery_failed(),
    }

    result.map(|response| (StatusCode::OK, Json(response)))
}

async fn discover(
    state: &AppState,
    headers: &HeaderMap,
    body: axum::body::Body,
) -> Result<DiscoverResponse, ApiError> {
    let body_bytes = read_body(body, state.config.server.max_request_bytes.as_usize()).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let request = if is_json_content_type(content_type) {
        serde_json::from_slice::<DiscoverRequest>(&body_bytes)?
    } else {
        DiscoverRequest::default()
    };

    let feed_urls = state.discoverer.discover(request.blog_url()).await?;

    tracing::info!(
        url = request.blog_url().unwrap_or_default(),
        feeds = feed_urls.len(),
        "Feeds discovered"
    );

    Ok(DiscoverResponse { feed_urls })
}

/// Reads the request body, failing once it grows past `max_size`
///
/// Decompression is handled by `RequestDecompressionLayer`, so the limit
/// applies to decoded bytes.
async fn read_body(body: axum::body::Body, max_size: usize) -> Result<Bytes, ApiError> {
    let collected = Limited::new(body, max_size).collect().await.map_err(|err| {
        if err.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge(max_size)
        } else {
            ApiError::Internal(err.to_string())
        }
    })?;

    Ok(collected.to_bytes())
}

/// Health check endpoint (GET /health)
///
/// Reports the crate version and discovery counters.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(response))
}
