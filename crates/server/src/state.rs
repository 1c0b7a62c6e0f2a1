// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Dashboard;
use crate::render::Renderer;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Cache-aside access to channel records.
    pub dashboard: Dashboard,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new(dashboard: Dashboard, renderer: Renderer) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            dashboard,
            renderer,
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
