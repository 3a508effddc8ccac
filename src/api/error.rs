use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::response::ApiResponse;
use crate::finance_store::error::StoreError;

/// Every failure is reported to the client as a 500 carrying the underlying
/// message; the variants only differ in what gets logged.
#[derive(Debug)]
pub enum ApiError {
    InvalidPayload(String),
    InternalError(String),
    DatabaseError(String),
}

impl ApiError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::DatabaseError(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidPayload(msg) => msg.clone(),
            ApiError::InternalError(msg) => msg.clone(),
            ApiError::DatabaseError(msg) => msg.clone(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Task(e) => ApiError::internal_error(e.to_string()),
            other => ApiError::database_error(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::InvalidPayload(msg) => tracing::warn!("Rejected request body: {}", msg),
            ApiError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
            ApiError::DatabaseError(msg) => tracing::error!("Database error: {}", msg),
        }
        let error_response = ApiResponse::<serde_json::Value>::error(self.message());

        (status, Json(error_response)).into_response()
    }
}
