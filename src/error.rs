/*
 * Responsibility
 * - App-wide ApiError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - Maps request-reader errors (token, body, multipart) onto HTTP
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::request_reader::{GraphQLRequestError, InvalidToken};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("payload too large")]
    PayloadTooLarge,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    /// Body read failures: over the limit is 413, anything else 400 `UNREADABLE_BODY`.
    pub fn unreadable_body(status: StatusCode, message: impl Into<String>) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::bad_request("UNREADABLE_BODY", message)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "invalid token".into(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "request body exceeds the configured limit".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvalidToken> for AppError {
    // The cause is logged by the auth middleware, not echoed to the client.
    fn from(_: InvalidToken) -> Self {
        AppError::Unauthorized
    }
}

impl From<GraphQLRequestError> for AppError {
    fn from(e: GraphQLRequestError) -> Self {
        let message = e.to_string();
        match e {
            GraphQLRequestError::UnreadableBody(_) => {
                AppError::bad_request("UNREADABLE_BODY", message)
            }
            GraphQLRequestError::MalformedJsonBody(_) => {
                AppError::bad_request("MALFORMED_JSON_BODY", message)
            }
            GraphQLRequestError::MalformedVariables(_) => {
                AppError::bad_request("MALFORMED_VARIABLES", message)
            }
            GraphQLRequestError::InvariantViolation(_) => {
                AppError::bad_request("INVARIANT_VIOLATION", message)
            }
        }
    }
}
