// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eunlg_core::PipelineError;
use eunlg_realizer::RealizeError;
use serde::Serialize;
use thiserror::Error;

/// Structured JSON error response for API errors
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

/// API error types that map to HTTP status codes.
///
/// The validation variants carry the exact client-facing strings; clients
/// match on them, so they are part of the wire contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid value for 'language', query /languages for valid options.")]
    InvalidLanguage,

    #[error("Missing 'dataset' field")]
    MissingDataset,

    #[error("Invalid value for 'dataset', query /datasets for valid options.")]
    InvalidDataset,

    #[error("Missing 'location' field")]
    MissingLocation,

    #[error("Invalid value for 'location', query /locations for valid options.")]
    InvalidLocation,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Realize(#[from] RealizeError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::InvalidLanguage
            | ApiError::MissingDataset
            | ApiError::InvalidDataset
            | ApiError::MissingLocation
            | ApiError::InvalidLocation => {
                tracing::warn!(error = %self, "Rejected request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(self.to_string()))
            }
            ApiError::Pipeline(pipeline_err) => match pipeline_err {
                PipelineError::Filter(filter_err) => {
                    tracing::error!(error = %filter_err, "Similarity filter failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::with_details(
                            "Internal server error",
                            filter_err.to_string(),
                        ),
                    )
                }
                _ => {
                    tracing::warn!(error = %pipeline_err, "Report generation failed");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::new(pipeline_err.to_string()),
                    )
                }
            },
            ApiError::Realize(realize_err) => {
                tracing::warn!(error = %realize_err, "Realization failed");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(realize_err.to_string()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
