// crates/server/src/main.rs
//! kstats server binary.
//!
//! Reads configuration, opens the statistics store, picks a cache backend and
//! serves until Ctrl-C or SIGTERM, then closes the database pool.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use kstats_db::Database;
use kstats_server::{
    create_app, init_metrics, AppState, Config, Dashboard, MemoryCache, RedisCache, Renderer,
    StatsCache,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn connect_cache(config: &Config) -> Result<Arc<dyn StatsCache>> {
    match config.redis_address() {
        Some(address) => {
            let cache = RedisCache::connect(address, config.redis_password.as_deref())
                .await
                .with_context(|| format!("connecting to Redis at {address}"))?;
            Ok(Arc::new(cache))
        }
        None => {
            warn!("No Redis address configured, caching channel records in process");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kstats_server=info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    init_metrics();

    let db = Database::connect(&config.database_url)
        .await
        .context("opening statistics database")?;
    let cache = connect_cache(&config).await?;

    let dashboard = Dashboard::new(db, cache);
    info!(cache = dashboard.cache_backend(), "Cache backend ready");

    let state = AppState::new(dashboard, Renderer::new(&config.template_dir));
    let app = create_app(state.clone(), &config.asset_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        templates = %config.template_dir.display(),
        assets = %config.asset_dir.display(),
        "kstats v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.dashboard.db().close().await;
    info!(uptime_secs = state.uptime_secs(), "Server stopped");
    Ok(())
}
