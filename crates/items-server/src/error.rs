//! Request errors and their HTTP rendering.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No item has the requested id.
    #[error("Item not found")]
    ItemNotFound,

    /// The item exists but lacks the requested property.
    #[error("Property '{name}' not found")]
    PropertyNotFound { name: String },

    /// The request body was not JSON.
    #[error("{0}")]
    BadBody(#[from] JsonRejection),

    /// The query string could not be read.
    #[error("{0}")]
    BadQuery(#[from] QueryRejection),

    /// A store, pagination or validation failure.
    #[error(transparent)]
    Items(#[from] items_core::Error),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub detail: String,
}

impl ServerError {
    pub fn as_status_and_msg(&self) -> (StatusCode, String) {
        match self {
            ServerError::ItemNotFound | ServerError::PropertyNotFound { .. } => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ServerError::BadBody(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ServerError::BadQuery(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ServerError::Items(items_core::Error::InvalidToken(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid cursor format".to_string())
            }
            ServerError::Items(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ServerError::Items(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, detail) = self.as_status_and_msg();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(%status, error = %self, "Request rejected");
        }
        (status, Json(ErrorResponseBody { detail })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
