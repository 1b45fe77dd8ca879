use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Unsupported file format: {media_type}")]
    UnsupportedFormat { media_type: String },

    #[error("File too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Text extraction failed: {message}")]
    ExtractionFailed { message: String },

    #[error("Analysis timed out during {stage}")]
    AnalysisTimeout { stage: &'static str },

    #[error("Invalid weight configuration: weights sum to {sum}, expected 1.0")]
    InvalidWeightConfiguration { sum: f64 },

    #[error("Analyzer {analyzer} failed: {message}")]
    InternalAnalyzerError { analyzer: String, message: String },

    #[error("Analysis not found: {id}")]
    AnalysisNotFound { id: Uuid },

    #[error("Rate limit exceeded: maximum concurrent analyses reached")]
    RateLimitExceeded,

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::ExtractionFailed { .. } => "EXTRACTION_FAILED",
            AppError::AnalysisTimeout { .. } => "ANALYSIS_TIMEOUT",
            AppError::InvalidWeightConfiguration { .. } => "INVALID_WEIGHT_CONFIGURATION",
            AppError::InternalAnalyzerError { .. } => "INTERNAL_ANALYZER_ERROR",
            AppError::AnalysisNotFound { .. } => "ANALYSIS_NOT_FOUND",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::ExtractionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::AnalysisTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::InvalidWeightConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalAnalyzerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AnalysisNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show end users. Mid-run causes stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::UnsupportedFormat { .. }
            | AppError::FileTooLarge { .. }
            | AppError::MissingFile
            | AppError::AnalysisNotFound { .. }
            | AppError::RateLimitExceeded => self.to_string(),
            AppError::AnalysisTimeout { .. } => {
                "The analysis took too long and was stopped. Please try again.".to_string()
            }
            AppError::ExtractionFailed { .. } => {
                "We could not read this document. Please check the file and try again.".to_string()
            }
            _ => "There was an error analyzing your resume. Please try again.".to_string(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::ExtractionFailed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn analyzer(analyzer: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InternalAnalyzerError {
            analyzer: analyzer.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.user_message();
        let request_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %self,
            "API error occurred"
        );

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
                "request_id": request_id,
                "timestamp": timestamp
            },
            "data": null
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}
