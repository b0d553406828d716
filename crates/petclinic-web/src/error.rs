//! Error types for the web layer.
//!
//! [`WebError`] unifies all failure modes of a request into a single enum
//! that renders the `error.html` view via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use petclinic_core::ServiceError;

use crate::views;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The requested owner or pet does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A path segment is not a UUID.
    #[error("Given UUID '{value}' for entity {entity} is invalid")]
    InvalidId {
        /// Entity kind the id was meant for.
        entity: &'static str,
        /// The raw path segment.
        value: String,
    },

    /// A template failed to load or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Anything else, including store failures.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    /// HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
            Self::Template(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for WebError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "Request failed");
        } else {
            tracing::warn!(%status, error = %message, "Request rejected");
        }

        (status, Html(views::render_error_page(status, &message))).into_response()
    }
}
