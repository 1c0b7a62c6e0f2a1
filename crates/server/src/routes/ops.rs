// crates/server/src/routes/ops.rs
//! Operational endpoints. Neither touches the database or the cache.
//!
//! - GET /healthz - liveness, always `OK`
//! - GET /metrics - Prometheus scrape, 503 until the recorder is installed

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    routing::get,
    Router,
};

use crate::metrics::render_metrics;
use crate::state::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

type Scrape = ([(header::HeaderName, &'static str); 1], String);

async fn healthz() -> &'static str {
    "OK"
}

async fn scrape() -> Result<Scrape, (StatusCode, &'static str)> {
    render_metrics()
        .map(|text| ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], text))
        .ok_or((StatusCode::SERVICE_UNAVAILABLE, "Metrics not initialized"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(scrape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_healthz_body() {
        assert_eq!(healthz().await, "OK");
    }

    #[tokio::test]
    async fn test_scrape_after_init() {
        crate::metrics::init_metrics();
        crate::metrics::record_cache_lookup(true);

        let response = scrape().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROMETHEUS_CONTENT_TYPE
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("kstats_cache_lookups_total"));
    }
}
