//! API response envelopes
//!
//! Successful calls answer with `{ "success": true, "data": ... }` and
//! failures with `{ "success": false, "error": { "code", "message" } }`.

use serde::Serialize;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(code.into(), message.into(), None)
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::build(code.into(), message.into(), Some(details))
    }

    fn build(code: String, message: String, details: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_omits_empty_meta() {
        let value = serde_json::to_value(ApiResponse::success(json!({"a": 1}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"a": 1}}));
    }

    #[test]
    fn test_success_envelope_with_meta() {
        let value =
            serde_json::to_value(ApiResponse::success_with_meta(vec![1, 2], json!({"count": 2})))
                .unwrap();
        assert_eq!(value["meta"]["count"], 2);
    }

    #[test]
    fn test_error_envelope() {
        let value = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": {"code": "NOT_FOUND", "message": "gone"}})
        );
    }
}
