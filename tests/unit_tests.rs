//! Unit tests for individual components

use std::env;

use resumelens::{
    config::Config,
    error::AppError,
    models::{AnalysisState, AnalyzeAccepted, MediaType},
    scoring::{self, ScoreWeights},
};
use uuid::Uuid;

#[test]
fn test_config_loading() {
    // Clean up environment variables from other tests
    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("MAX_FILE_SIZE_MB");
    env::remove_var("MAX_CONCURRENT_ANALYSES");
    env::remove_var("STAGE_TIMEOUT_SECONDS");
    env::remove_var("STRICT_ANALYZERS");

    env::set_var("SERVER_HOST", "127.0.0.1");
    env::set_var("SERVER_PORT", "8080");
    env::set_var("MAX_FILE_SIZE_MB", "5");
    env::set_var("MAX_CONCURRENT_ANALYSES", "4");
    env::set_var("STAGE_TIMEOUT_SECONDS", "15");
    env::set_var("STRICT_ANALYZERS", "true");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "127.0.0.1");
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.max_file_size_mb, 5);
    assert_eq!(config.max_file_size_bytes(), 5 * 1024 * 1024);
    assert_eq!(config.max_concurrent_analyses, 4);
    assert_eq!(config.stage_timeout_seconds, 15);
    assert!(config.strict_analyzers);
    assert_eq!(config.weights, ScoreWeights::default());

    // Clean up after test
    env::remove_var("SERVER_HOST");
    env::remove_var("SERVER_PORT");
    env::remove_var("MAX_FILE_SIZE_MB");
    env::remove_var("MAX_CONCURRENT_ANALYSES");
    env::remove_var("STAGE_TIMEOUT_SECONDS");
    env::remove_var("STRICT_ANALYZERS");
}

#[test]
fn test_error_codes() {
    assert_eq!(
        AppError::UnsupportedFormat {
            media_type: "text/plain".to_string()
        }
        .error_code(),
        "UNSUPPORTED_FORMAT"
    );
    assert_eq!(AppError::MissingFile.error_code(), "MISSING_FILE");
    assert_eq!(
        AppError::RateLimitExceeded.error_code(),
        "RATE_LIMIT_EXCEEDED"
    );
    assert_eq!(
        AppError::FileTooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024
        }
        .error_code(),
        "FILE_TOO_LARGE"
    );
    assert_eq!(AppError::extraction("test").error_code(), "EXTRACTION_FAILED");
    assert_eq!(AppError::internal("test").error_code(), "INTERNAL_ERROR");
}

#[test]
fn test_error_status_codes() {
    use axum::http::StatusCode;

    assert_eq!(
        AppError::UnsupportedFormat {
            media_type: "text/plain".to_string()
        }
        .status_code(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
        AppError::FileTooLarge { size: 20, limit: 10 }.status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        AppError::RateLimitExceeded.status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        AppError::extraction("bad bytes").status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AppError::AnalysisTimeout { stage: "analysis" }.status_code(),
        StatusCode::REQUEST_TIMEOUT
    );
    assert_eq!(
        AppError::AnalysisNotFound { id: Uuid::new_v4() }.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn test_error_helper_methods() {
    let extraction_error = AppError::extraction("corrupt xref table");
    match extraction_error {
        AppError::ExtractionFailed { message } => assert_eq!(message, "corrupt xref table"),
        _ => panic!("Expected ExtractionFailed"),
    }

    let analyzer_error = AppError::analyzer("keywords", "boom");
    match analyzer_error {
        AppError::InternalAnalyzerError { analyzer, message } => {
            assert_eq!(analyzer, "keywords");
            assert_eq!(message, "boom");
        }
        _ => panic!("Expected InternalAnalyzerError"),
    }
}

#[test]
fn test_weight_validation() {
    ScoreWeights::default().validate().unwrap();

    let skewed = ScoreWeights {
        format: 0.5,
        keywords: 0.5,
        structure: 0.5,
        content: 0.0,
        contact: 0.0,
    };
    match skewed.validate() {
        Err(AppError::InvalidWeightConfiguration { sum }) => assert!((sum - 1.5).abs() < 1e-9),
        other => panic!("Expected InvalidWeightConfiguration, got {:?}", other),
    }
}

#[test]
fn test_pass_likelihood_bounds() {
    assert_eq!(scoring::pass_likelihood(0), 30);
    assert_eq!(scoring::pass_likelihood(100), 95);
    for score in 0..=100u8 {
        let likelihood = scoring::pass_likelihood(score);
        assert!((5..=95).contains(&likelihood));
    }
}

#[test]
fn test_media_type_detection() {
    assert_eq!(
        MediaType::from_mime("application/pdf"),
        Some(MediaType::Pdf)
    );
    assert_eq!(
        MediaType::from_mime(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ),
        Some(MediaType::Docx)
    );
    assert_eq!(MediaType::from_mime("text/plain"), None);
    assert_eq!(MediaType::from_file_name("resume.docx"), Some(MediaType::Docx));
    assert_eq!(MediaType::from_file_name("resume.txt"), None);
}

#[test]
fn test_accepted_response_shape() {
    let id = Uuid::new_v4();
    let body = serde_json::to_value(AnalyzeAccepted::new(id)).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["analysis_id"], id.to_string());
    assert_eq!(body["data"]["state"], "pending");
}

#[test]
fn test_terminal_states() {
    assert!(!AnalysisState::Pending.is_terminal());
    assert!(!AnalysisState::Extracting.is_terminal());
    assert!(!AnalysisState::Analyzing.is_terminal());
    assert!(AnalysisState::Complete.is_terminal());
    assert!(AnalysisState::Failed {
        code: "EXTRACTION_FAILED".to_string(),
        message: "test".to_string()
    }
    .is_terminal());
}
