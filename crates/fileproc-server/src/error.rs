//! Caller-facing error taxonomy
//!
//! Every failure the server reports maps to one [`AppError`] variant, and
//! each variant maps to a stable HTTP status and error code. Caller errors
//! carry their specific message. System errors log their cause and answer
//! with a generic message only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api::response::ErrorResponse;

/// Result type alias for handler and pipeline operations
pub type AppResult<T> = std::result::Result<T, AppError>;

pub const PROCESSING_FAILURE_MESSAGE: &str = "failed to process uploaded file";
pub const INTERNAL_ERROR_MESSAGE: &str = "an unexpected error occurred, please try again later";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty upload, or a malformed request
    #[error("{0}")]
    InvalidInput(String),

    /// Missing extension or an extension outside the allow-set
    #[error("{message}")]
    UnsupportedFileType {
        message: String,
        /// The rejected extension, absent when the filename had none
        value: Option<String>,
        allowed: Vec<String>,
    },

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("file exceeds configured size")]
    PayloadTooLarge,

    /// I/O failure while counting; the cause stays out of the message
    #[error("failed to process uploaded file")]
    ProcessingFailure {
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::UnsupportedFileType { .. } => {
                StatusCode::BAD_REQUEST
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ProcessingFailure { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::ProcessingFailure { .. } => "PROCESSING_FAILURE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let body = match self {
            AppError::UnsupportedFileType {
                ref message,
                ref value,
                ref allowed,
            } => {
                tracing::warn!(code, message = %message, "bad_request");
                ErrorResponse::with_details(
                    code,
                    message.clone(),
                    json!({ "value": value, "allowed": allowed }),
                )
            },
            // The cause is reported once by the ingestion events
            AppError::ProcessingFailure { .. } => {
                ErrorResponse::new(code, PROCESSING_FAILURE_MESSAGE)
            },
            AppError::Internal(ref message) => {
                tracing::error!(message = %message, "internal_error");
                ErrorResponse::new(code, INTERNAL_ERROR_MESSAGE)
            },
            other => {
                tracing::warn!(code, message = %other, "request_rejected");
                ErrorResponse::new(code, other.to_string())
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::events::recording::ErrorEventCounter;
    use http_body_util::BodyExt;
    use tracing_subscriber::layer::SubscriberExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_keeps_message() {
        let (status, body) = body_json(AppError::InvalidInput("no content".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["message"], "no content");
    }

    #[tokio::test]
    async fn test_unsupported_type_carries_value() {
        let err = AppError::UnsupportedFileType {
            message: "unsupported type: pdf".into(),
            value: Some("pdf".into()),
            allowed: vec!["csv".into(), "txt".into()],
        };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE_TYPE");
        assert_eq!(body["error"]["details"]["value"], "pdf");
        assert_eq!(body["error"]["details"]["allowed"][1], "txt");
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = body_json(AppError::NotFound("abc".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "file not found: abc");
    }

    #[tokio::test]
    async fn test_processing_failure_hides_cause() {
        let err = AppError::ProcessingFailure {
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire at /tmp/x"),
        };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PROCESSING_FAILURE");
        assert_eq!(body["error"]["message"], PROCESSING_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_processing_failure_response_does_not_log_cause() {
        let errors = ErrorEventCounter::default();
        let subscriber = tracing_subscriber::registry().with(errors.clone());

        tracing::subscriber::with_default(subscriber, || {
            let err = AppError::ProcessingFailure {
                source: std::io::Error::new(std::io::ErrorKind::Other, "reset"),
            };
            let _ = err.into_response();
        });

        assert_eq!(errors.count(), 0);
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let (status, body) = body_json(AppError::Internal("lock poisoned".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_payload_too_large() {
        let (status, body) = body_json(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
