//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use bustrack_domain::error::{BusTrackError, ValidationError};

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps request and domain failures to an HTTP response with a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be parsed.
    Malformed(String),
    /// A service call failed.
    Domain(BusTrackError),
}

impl ApiError {
    /// Wrap a parse failure; its description is returned to the caller.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<BusTrackError> for ApiError {
    fn from(err: BusTrackError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(BusTrackError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(BusTrackError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            // Debug output carries the whole source chain; the caller only
            // gets the top-level description.
            Self::Domain(err @ BusTrackError::Storage(_)) => {
                tracing::error!(error = ?err, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
