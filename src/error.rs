//! Unified error types for the backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Unified error type for the backend.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Props fetch error.
    #[error(transparent)]
    Props(#[from] PropsError),

    /// PDF rendering error.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Props fetching errors.
#[derive(Error, Debug)]
pub enum PropsError {
    /// League key is not one of the supported leagues.
    #[error("Unsupported league: {league}")]
    UnsupportedLeague {
        /// The key as it was requested.
        league: String,
    },

    /// Upstream call or response decoding failed.
    #[error("failed to fetch projections: {0}")]
    FetchFailed(#[from] FetchFailure),
}

/// Why an upstream fetch failed.
#[derive(Error, Debug)]
pub enum FetchFailure {
    /// Connection error, timeout or non-success status.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a projections document.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchFailure {
    /// Whether the failure was the client timeout firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchFailure::Transport(e) if e.is_timeout())
    }
}

/// PDF rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Document assembly or encoding failed.
    #[error("failed to render PDF: {0}")]
    RenderFailed(String),
}

/// JSON body returned with every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human readable error message.
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        let body = ErrorBody {
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServerError>;
