use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::services::ServiceError;

/// Error body shared by every endpoint: `{"error": "..."}`.
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (
            self.status_code,
            Json(json!({
                "error": self.message,
            })),
        )
            .into_response()
    }
}

impl Error {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code,
            message,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }
}

// Clients see a 400 for every failure, store errors included.
impl From<ServiceError> for Error {
    fn from(error: ServiceError) -> Self {
        match &error {
            ServiceError::Database(e) => tracing::error!(error = %e, "database request failed"),
            _ => tracing::debug!(%error, "rejected request"),
        }
        Self::bad_request(error.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "rejected request path");
        Self::bad_request(rejection.body_text())
    }
}
