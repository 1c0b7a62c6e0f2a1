// crates/server/src/lib.rs
//! kstats server library.
//!
//! Axum HTTP server for the read-only IRC channel statistics dashboard:
//! HTML and JSON views of per-channel records, served cache-aside from
//! Redis or an in-process cache.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod render;
pub mod routes;
pub mod state;

pub use cache::{CacheError, MemoryCache, RedisCache, StatsCache, CACHE_TTL};
pub use config::{Config, ConfigError};
pub use dashboard::{Dashboard, DashboardError};
pub use error::*;
pub use crate::metrics::init_metrics;
pub use render::Renderer;
pub use routes::app_routes;
pub use state::AppState;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and request tracing.
pub fn create_app(state: Arc<AppState>, asset_dir: &Path) -> Router {
    app_routes(state, asset_dir).layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use kstats_db::test_support::Seed;
    use kstats_db::Database;
    use std::fs;
    use tower::ServiceExt;

    struct TestApp {
        _dirs: (tempfile::TempDir, tempfile::TempDir),
        app: Router,
    }

    async fn test_app() -> TestApp {
        let db = Database::new_in_memory().await.expect("in-memory DB");
        let seed = Seed::new(&db);
        seed.channel(1, "#test").await;
        seed.user("h-alice", "alice").await;
        seed.message(1, "h-alice").words(3).insert().await;

        let templates = tempfile::tempdir().unwrap();
        fs::write(templates.path().join("statistics.html"), "{{ name }}: {{ lines }}").unwrap();
        let assets = tempfile::tempdir().unwrap();
        fs::write(assets.path().join("style.css"), "body { margin: 0; }").unwrap();

        let dashboard = Dashboard::new(db, Arc::new(MemoryCache::new()));
        let state = AppState::new(dashboard, Renderer::new(templates.path()));
        let app = create_app(state, assets.path());
        TestApp {
            _dirs: (templates, assets),
            app,
        }
    }

    async fn send(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Helper to make a GET request to the app.
    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = send(app, uri).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_healthz() {
        let t = test_app().await;
        let (status, body) = get(t.app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_metrics_route() {
        init_metrics();
        crate::metrics::record_cache_lookup(false);
        let t = test_app().await;
        let (status, body) = get(t.app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("kstats_cache_lookups_total"));
    }

    #[tokio::test]
    async fn test_channel_page() {
        let t = test_app().await;
        let (status, body) = get(t.app, "/%23test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "#test: 1");
    }

    #[tokio::test]
    async fn test_channel_lookup_ignores_case() {
        let t = test_app().await;
        let (status, body) = get(t.app, "/%23TEST").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "#test: 1");
    }

    #[tokio::test]
    async fn test_channel_api() {
        let t = test_app().await;
        let (status, body) = get(t.app, "/api/channels/%23test").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["words"], 3);
    }

    #[tokio::test]
    async fn test_unknown_channel_returns_json_404() {
        let t = test_app().await;
        let (status, body) = get(t.app, "/api/channels/%23nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Channel not found");
    }

    #[tokio::test]
    async fn test_root_is_404() {
        let t = test_app().await;
        let response = send(t.app, "/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assets_carry_cache_headers() {
        let t = test_app().await;
        let response = send(t.app, "/assets/style.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CACHE_CONTROL).unwrap(),
            routes::assets::ASSET_CACHE_CONTROL
        );
        assert_eq!(headers.get(header::VARY).unwrap(), "Accept-Encoding");
        assert!(headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let t = test_app().await;
        let response = send(t.app, "/assets/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
