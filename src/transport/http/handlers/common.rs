use crate::domain::CoreError;
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

/// A path segment that does not parse as an id.
pub fn path_400(err: PathRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid path: {} (ids must be integers)", err),
    )
}

/// `NotFound` -> 404, `Validation` -> 400, anything else -> 500.
pub fn core_error_response(err: CoreError) -> Response {
    let status = match &err {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Storage(cause) => {
            error!(error = %cause, "storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let message = match &err {
        CoreError::Storage(_) => "Internal error".to_string(),
        other => other.to_string(),
    };
    error_response(status, message)
}

pub fn ok_response<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "response serialization failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

/// Turns a service result into the response envelope.
pub fn respond<T: Serialize>(result: Result<T, CoreError>) -> Response {
    match result {
        Ok(data) => ok_response(StatusCode::OK, &data),
        Err(err) => core_error_response(err),
    }
}

/// Like `respond`, for operations without a payload.
pub fn respond_empty(result: Result<(), CoreError>) -> Response {
    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: None,
                error: None,
            }),
        )
            .into_response(),
        Err(err) => core_error_response(err),
    }
}
