use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::DocumentError;
use crate::llm_client::LlmError;
use crate::screening::Stage;

/// Failure of one candidate's screening pipeline.
/// Every variant aborts the candidate; nothing is retried locally.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("{stage} reply failed schema validation: {message}")]
    SchemaValidation { stage: Stage, message: String },

    #[error("{stage} could not reach the reasoning capability: {source}")]
    ExternalCapability {
        stage: Stage,
        #[source]
        source: LlmError,
    },
}

impl ScreeningError {
    /// Maps a capability failure to the error kind the stage reports.
    /// A reply that is not JSON at all is a shape failure, not an outage.
    pub fn from_llm(stage: Stage, error: LlmError) -> Self {
        match error {
            LlmError::Parse(e) => ScreeningError::SchemaValidation {
                stage,
                message: format!("reply is not valid JSON: {e}"),
            },
            LlmError::EmptyContent => ScreeningError::SchemaValidation {
                stage,
                message: "reply was empty".to_string(),
            },
            source => ScreeningError::ExternalCapability { stage, source },
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ScreeningError::Document(DocumentError::UnsupportedFileType(_)) => {
                "UNSUPPORTED_FILE_TYPE"
            }
            ScreeningError::Document(DocumentError::Io { .. }) => "IO_ERROR",
            ScreeningError::Document(DocumentError::Extraction { .. }) => "EXTRACTION_ERROR",
            ScreeningError::SchemaValidation { .. } => "SCHEMA_VALIDATION_ERROR",
            ScreeningError::ExternalCapability { .. } => "EXTERNAL_CAPABILITY_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ScreeningError::Document(DocumentError::UnsupportedFileType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ScreeningError::Document(DocumentError::Io { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ScreeningError::Document(DocumentError::Extraction { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ScreeningError::SchemaValidation { .. } | ScreeningError::ExternalCapability { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Screening(#[from] ScreeningError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Screening(e) => {
                tracing::error!("Screening error: {e}");
                (e.status(), e.code(), e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_parse_failure_is_schema_validation() {
        let err = ScreeningError::from_llm(Stage::CvParser, LlmError::Parse(parse_error()));
        assert!(matches!(
            err,
            ScreeningError::SchemaValidation {
                stage: Stage::CvParser,
                ..
            }
        ));
        assert_eq!(err.code(), "SCHEMA_VALIDATION_ERROR");
    }

    #[test]
    fn test_api_failure_is_external_capability() {
        let err = ScreeningError::from_llm(
            Stage::SkillMatcher,
            LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            },
        );
        assert_eq!(err.code(), "EXTERNAL_CAPABILITY_ERROR");
        assert!(err.to_string().contains("skill matcher"));
    }

    #[test]
    fn test_document_codes() {
        let err = ScreeningError::from(DocumentError::UnsupportedFileType(".rtf".to_string()));
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert_eq!(err.to_string(), "Unsupported file type: .rtf");
    }

    #[test]
    fn test_screening_error_response_status() {
        let response = AppError::from(ScreeningError::SchemaValidation {
            stage: Stage::RedFlagDetector,
            message: "unknown variant `Critical`".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::Validation("no cvs".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
