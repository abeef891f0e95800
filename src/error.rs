// Error types for the API server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::pipeline::PipelineError;

/// API server error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    UnsupportedMediaType(String),
    UnprocessableEntity(String),
    InternalServerError(String),

    // Application-specific errors
    ImageDecodeError(String),
    NoFaceDetected(String),
    PipelineFailure(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            Self::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),

            // Map application-specific errors to appropriate HTTP status codes
            Self::ImageDecodeError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NoFaceDetected(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            // The caller only ever sees a generic failure message; the backend
            // detail goes to the logs, not over the wire.
            Self::PipelineFailure(msg) => {
                tracing::error!("Beauty pipeline failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Beauty pipeline failed to process the image".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "status": status.as_u16(),
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        Self::PipelineFailure(error.to_string())
    }
}

// Schema constraint violations are well-formed input that the server
// understands but cannot accept.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::UnprocessableEntity(format!("Invalid beautyConfig: {}", errors))
    }
}

/// Classify a `serde_json` failure for the `beautyConfig` form field: syntax
/// problems are malformed input (400), type mismatches in well-formed JSON are
/// schema violations (422).
pub fn beauty_config_json_error(error: serde_json::Error) -> ApiError {
    use serde_json::error::Category;

    match error.classify() {
        Category::Syntax | Category::Eof | Category::Io => {
            ApiError::BadRequest(format!("Invalid beautyConfig JSON: {}", error))
        }
        Category::Data => {
            ApiError::UnprocessableEntity(format!("Invalid beautyConfig value: {}", error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_json_is_bad_request() {
        let err = serde_json::from_str::<crate::models::BeautyConfig>("{not json").unwrap_err();
        match beauty_config_json_error(err) {
            ApiError::BadRequest(msg) => assert!(msg.contains("Invalid beautyConfig JSON")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_unprocessable() {
        let err = serde_json::from_str::<crate::models::BeautyConfig>(
            r#"{"skinValues": {"whiten": "fifty"}}"#,
        )
        .unwrap_err();
        match beauty_config_json_error(err) {
            ApiError::UnprocessableEntity(_) => {}
            other => panic!("expected UnprocessableEntity, got {:?}", other),
        }
    }
}
