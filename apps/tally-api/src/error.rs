//! Error types for the Tally API.
//!
//! Every error becomes a plain-text body with the matching status code.
//! Calculation errors from the rule engine never reach this type. They flag
//! the receipt and get logged, and the caller still receives a 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tally_store::StoreError;
use tracing::{debug, error};

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body is not a receipt document.
    #[error("{0}")]
    MalformedPayload(String),

    #[error("receipt not found")]
    ReceiptNotFound { id: String },

    /// No route matched.
    #[error("404 not found")]
    RouteNotFound,

    /// Missing or unknown API key.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal Server Error")]
    Store(#[from] StoreError),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::ReceiptNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(source) => error!(error = %source, "Points store failure"),
            ApiError::ReceiptNotFound { id } => debug!(receipt_id = %id, "Receipt not found"),
            _ => {}
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
