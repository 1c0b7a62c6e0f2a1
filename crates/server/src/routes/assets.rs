// crates/server/src/routes/assets.rs
//! Static files under `/assets`.

use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

/// One year.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Serve `asset_dir` under `/assets` with long-lived caching headers.
pub fn router(asset_dir: &Path) -> Router<Arc<AppState>> {
    let files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(ASSET_CACHE_CONTROL),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::VARY,
            HeaderValue::from_static("Accept-Encoding"),
        ))
        .service(ServeDir::new(asset_dir));

    Router::new().nest_service("/assets", files)
}
