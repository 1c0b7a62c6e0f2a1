// crates/server/src/routes/channel.rs
//! Channel statistics endpoints.
//!
//! - GET /{channel}              - HTML page rendered from the `statistics` template
//! - GET /api/channels/{channel} - the same record as JSON

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use kstats_core::{ChannelStats, CHANNEL_PREFIX};

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_request;
use crate::render::STATISTICS_TEMPLATE;
use crate::state::AppState;

/// Fetch the record for a path token. Tokens without the `#` prefix are not
/// channels and never reach the cache or the database.
async fn load(state: &AppState, token: &str) -> ApiResult<ChannelStats> {
    if !token.starts_with(CHANNEL_PREFIX) {
        return Err(ApiError::NotFound(token.to_string()));
    }
    Ok(state.dashboard.channel_stats(token).await?)
}

fn finish<T>(endpoint: &'static str, start: Instant, result: ApiResult<T>) -> ApiResult<T> {
    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status().as_u16(),
    };
    record_request(endpoint, status, start.elapsed());
    result
}

/// GET /{channel} - Render the channel page.
///
/// Rendering happens only after the record has been stored in the cache.
pub async fn channel_page(
    State(state): State<Arc<AppState>>,
    Path(channel): Path<String>,
) -> ApiResult<Html<String>> {
    let start = Instant::now();
    let result = render_page(&state, &channel).await;
    finish("channel_page", start, result)
}

async fn render_page(state: &AppState, token: &str) -> ApiResult<Html<String>> {
    let stats = load(state, token).await?;
    let html = state.renderer.render(STATISTICS_TEMPLATE, &stats)?;
    Ok(Html(html))
}

/// GET /api/channels/{channel} - Channel record as JSON.
pub async fn channel_json(
    State(state): State<Arc<AppState>>,
    Path(channel): Path<String>,
) -> ApiResult<Json<ChannelStats>> {
    let start = Instant::now();
    let result = load(&state, &channel).await.map(Json);
    finish("channel_api", start, result)
}

/// Create the channel routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/channels/{channel}", get(channel_json))
        .route("/{channel}", get(channel_page))
}
