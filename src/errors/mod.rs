/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Failures of the rover availability calculation and calendar parsing
#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("invalid manifest for {rover}: {reason}")]
    InvalidManifest { rover: String, reason: String },

    #[error("malformed calendar date '{value}': {source}")]
    MalformedDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("calendar date for sol {sol} is out of range")]
    DateOutOfRange { sol: u32 },
}

impl AvailabilityError {
    pub fn invalid_manifest(rover: impl Into<String>, reason: impl Into<String>) -> Self {
        AvailabilityError::InvalidManifest {
            rover: rover.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("External API error: {0}")]
    ExternalApi(#[from] reqwest::Error),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("Unknown rover: {0}")]
    UnknownRover(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl ApiError {
    /// Machine readable code and HTTP status for the error envelope
    pub fn code_and_status(&self) -> (&'static str, StatusCode) {
        match self {
            ApiError::ExternalApi(e) => match e.status().map(|s| s.as_u16()) {
                Some(403) => ("UPSTREAM_403", StatusCode::BAD_GATEWAY),
                Some(404) => ("UPSTREAM_404", StatusCode::NOT_FOUND),
                Some(429) => ("UPSTREAM_429", StatusCode::TOO_MANY_REQUESTS),
                Some(500..=599) => ("UPSTREAM_5XX", StatusCode::BAD_GATEWAY),
                _ => ("UPSTREAM_ERROR", StatusCode::BAD_GATEWAY),
            },
            ApiError::Availability(AvailabilityError::MalformedDate { .. }) => {
                ("INVALID_DATE", StatusCode::BAD_REQUEST)
            }
            ApiError::Availability(_) => ("INVALID_MANIFEST", StatusCode::UNPROCESSABLE_ENTITY),
            ApiError::UnknownRover(_) => ("UNKNOWN_ROVER", StatusCode::NOT_FOUND),
            ApiError::NotFound(_) => ("NOT_FOUND", StatusCode::NOT_FOUND),
            ApiError::InvalidInput(_) => ("INVALID_INPUT", StatusCode::BAD_REQUEST),
            ApiError::Internal(_) => ("INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, status) = self.code_and_status();

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
