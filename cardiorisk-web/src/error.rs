//! Error types for cardiorisk-web
//!
//! Every failure on `/predict` is reported as a JSON diagnostic with HTTP 200
//! so the form flow never ends in a server error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardiorisk_common::InferenceError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Model unavailable, invalid feature value, or model failure
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Request body could not be read as a form
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Inference(err) => err.code(),
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (StatusCode::OK, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
