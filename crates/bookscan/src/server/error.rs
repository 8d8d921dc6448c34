use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;

use crate::{Error, ErrorKind};

/// Failures of a request handler, each mapped to an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// The request cannot be served as sent.
    BadRequest(String),
    /// No book is known for the requested ISBN.
    NotFound(String),
    /// A book source failed.
    Upstream(Error),
    /// Anything else.
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.kind() {
            ErrorKind::NoValue => ApiError::NotFound(err.to_string()),
            ErrorKind::IO | ErrorKind::Status | ErrorKind::Timeout => ApiError::Upstream(err),
            ErrorKind::Deserialize => ApiError::Internal(err.to_string()),
        }
    }
}

impl ApiError {
    /// The status this error answers with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
            ApiError::Upstream(err) => err.to_string(),
        };

        if status.is_server_error() {
            error!("{status}: {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
