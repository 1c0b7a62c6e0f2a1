//! Route handlers for the kstats server.

pub mod assets;
pub mod channel;
pub mod ops;

use std::path::Path;
use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined router.
///
/// Routes:
/// - GET /healthz - Liveness check
/// - GET /metrics - Prometheus metrics
/// - GET /assets/* - Static files from `asset_dir`
/// - GET /api/channels/{channel} - Channel record as JSON
/// - GET /{channel} - Channel page (token must start with `#`, sent as `%23`)
pub fn app_routes(state: Arc<AppState>, asset_dir: &Path) -> Router {
    Router::new()
        .merge(ops::router())
        .merge(assets::router(asset_dir))
        .merge(channel::router())
        .with_state(state)
}
