use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cryptick_core::{QueryError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// JSON error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    #[serde(rename = "errorType")]
    pub error_type: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

/// Adapter-level error, mapped onto an HTTP status class: bad input shape
/// is a client error, missing data is not-found.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Query(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorDetails {
            error_type: status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_owned(),
            error_message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
