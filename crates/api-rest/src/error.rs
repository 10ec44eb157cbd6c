//! Mapping of failures onto the JSON error envelope.

use api_shared::{auth::AuthError, ErrorCode, ErrorRes};
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drills_core::DrillsError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound(&'static str),
    Validation {
        message: &'static str,
        details: Vec<String>,
    },
    /// The cause is logged, never returned to the caller.
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        tracing::debug!(reason = %e, "caller rejected");
        ApiError::Unauthorized
    }
}

impl From<DrillsError> for ApiError {
    fn from(e: DrillsError) -> Self {
        match e {
            DrillsError::DrillNotFound(_) => ApiError::NotFound("Drill not found"),
            DrillsError::UserNotFound(_) => ApiError::NotFound("User not found"),
            DrillsError::InvalidDrill(e) => ApiError::Validation {
                message: "Invalid drill",
                details: e.problems.iter().map(ToString::to_string).collect(),
            },
            DrillsError::InvalidInput(msg) => ApiError::Validation {
                message: "Invalid input data",
                details: vec![msg],
            },
            DrillsError::InvalidText(e) => ApiError::Validation {
                message: "Invalid input data",
                details: vec![e.to_string()],
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: "Invalid input data",
            details: vec![rejection.body_text()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::Unauthorized => ErrorRes::unauthorized(),
            ApiError::NotFound(message) => ErrorRes::not_found(message),
            ApiError::Validation { message, details } => ErrorRes::validation(message, details),
            ApiError::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                ErrorRes::internal()
            }
        };

        (status_for(body.error.code), Json(body)).into_response()
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// `Json` whose rejections are reported as `VALIDATION_ERROR`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
