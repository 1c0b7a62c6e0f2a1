// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kstats_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::cache::CacheError;
use crate::dashboard::DashboardError;

/// Structured JSON error response
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Handler errors and the HTTP status each maps to
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(DbError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ChannelNotFound(token) => ApiError::ChannelNotFound(token),
            e => ApiError::Database(e),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Database(e) => e.into(),
            DashboardError::Cache(e) => ApiError::Cache(e),
            DashboardError::Encode(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ChannelNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = match &self {
            ApiError::ChannelNotFound(token) => {
                tracing::info!(channel = %token, "Channel not found");
                ErrorResponse::with_details("Channel not found", format!("Channel: {}", token))
            }
            ApiError::NotFound(path) => {
                tracing::debug!(path = %path, "Not a channel path");
                ErrorResponse::new("Not found")
            }
            ApiError::Database(db_err) => {
                tracing::error!(error = %db_err, "Database error");
                ErrorResponse::with_details("Database error", db_err.to_string())
            }
            ApiError::Cache(cache_err) => {
                tracing::error!(error = %cache_err, "Cache error");
                ErrorResponse::with_details("Cache error", cache_err.to_string())
            }
            ApiError::Render(render_err) => {
                tracing::error!(error = %render_err, "Template render failed");
                ErrorResponse::with_details("Render error", render_err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "Internal server error");
                ErrorResponse::new("Internal server error")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
