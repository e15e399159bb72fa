//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::analysis::{AnalysisError, ModelError};

/// Error response body. `error` is a human-readable message shown by the
/// upload form; `details` carries upstream diagnostics when available.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Missing OPENROUTER_API_KEY in environment")]
    MissingApiKey,
    #[error("API error {status}")]
    Upstream { status: u16, details: String },
    #[error("Server error: {0}")]
    Server(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::PayloadTooLarge(message) => (StatusCode::PAYLOAD_TOO_LARGE, message, None),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing OPENROUTER_API_KEY in environment".to_string(),
                None,
            ),
            ApiError::Upstream { status, details } => {
                tracing::warn!(status, "Model API returned an error");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("API error {status}"),
                    Some(upstream_details(details)),
                )
            }
            ApiError::Server(detail) => {
                tracing::warn!(detail = %detail, "Model request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Server error".to_string(),
                    Some(serde_json::Value::String(detail)),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Upstream bodies are usually JSON; pass them through structured when so.
fn upstream_details(body: String) -> serde_json::Value {
    serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body))
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MissingApiKey => ApiError::MissingApiKey,
            ModelError::Upstream { status, body } => ApiError::Upstream {
                status,
                details: body,
            },
            other => ApiError::Server(other.to_string()),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyRequest => {
                ApiError::BadRequest(AnalysisError::EmptyRequest.to_string())
            }
            AnalysisError::Extraction(detail) => ApiError::Internal(detail),
            AnalysisError::Model(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn bad_request_returns_400_with_message() {
        let response = ApiError::BadRequest("Too many files".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Too many files");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn missing_api_key_returns_500() {
        let response = ApiError::MissingApiKey.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing OPENROUTER_API_KEY in environment");
    }

    #[tokio::test]
    async fn upstream_returns_502_with_json_details() {
        let response = ApiError::Upstream {
            status: 401,
            details: r#"{"error":{"message":"No auth credentials found"}}"#.into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "API error 401");
        assert_eq!(json["details"]["error"]["message"], "No auth credentials found");
    }

    #[tokio::test]
    async fn upstream_plain_text_details_kept_as_string() {
        let response = ApiError::Upstream {
            status: 500,
            details: "upstream exploded".into(),
        }
        .into_response();
        let json = body_json(response).await;
        assert_eq!(json["details"], "upstream exploded");
    }

    #[tokio::test]
    async fn server_error_returns_502() {
        let response = ApiError::Server("Model request timed out after 90s".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Server error");
        assert_eq!(json["details"], "Model request timed out after 90s");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("join error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "An internal error occurred");
    }

    #[test]
    fn model_errors_map_to_api_errors() {
        assert!(matches!(ApiError::from(ModelError::MissingApiKey), ApiError::MissingApiKey));
        assert!(matches!(
            ApiError::from(ModelError::Upstream { status: 429, body: String::new() }),
            ApiError::Upstream { status: 429, .. }
        ));
        assert!(matches!(ApiError::from(ModelError::Timeout(90)), ApiError::Server(_)));
    }

    #[test]
    fn empty_analysis_maps_to_bad_request() {
        match ApiError::from(AnalysisError::EmptyRequest) {
            ApiError::BadRequest(msg) => {
                assert_eq!(msg, "Please provide a question and/or at least one report image or PDF.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
