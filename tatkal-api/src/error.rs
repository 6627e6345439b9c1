use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use tatkal_core::DomainError;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Unauthenticated(String),
    Forbidden(String),
    Internal(anyhow::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Domain(DomainError::InvalidRequest(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg)
            }
            ApiError::Domain(DomainError::TrainNotFound(msg)) => {
                (StatusCode::NOT_FOUND, "TRAIN_NOT_FOUND", msg)
            }
            ApiError::Domain(DomainError::SeatsUnavailable(msg)) => {
                (StatusCode::BAD_REQUEST, "SEATS_NOT_AVAILABLE", msg)
            }
            ApiError::Domain(err @ DomainError::BookingNotFound) => {
                (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND", err.to_string())
            }
            ApiError::Domain(DomainError::DuplicateUser(msg)) => {
                (StatusCode::BAD_REQUEST, "DATA_INTEGRITY_VIOLATION", msg)
            }
            ApiError::Domain(err @ DomainError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_FAILED", err.to_string())
            }
            ApiError::Domain(DomainError::Storage(err)) => {
                tracing::error!("Storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_FAILED", msg)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "ACCESS_DENIED", msg),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "timestamp": Utc::now(),
            "status": status.as_u16(),
            "errorCode": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
