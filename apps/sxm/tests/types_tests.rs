//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use sxm::api::{
    AnswerJson, AssessRequest, AssessResponse, HealthResponse, MAX_EMAIL_LENGTH,
    MAX_SHARE_URL_LENGTH, NotifyRequest, NotifyResponse, QuestionsResponse, ShareRequest,
    ShareResponse, status_for,
};
use sxm_core::{Content, Stage, SxmError};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_deserialization() {
    let json = r#"{"status":"healthy","version":"1.0.0"}"#;
    let health: HealthResponse = serde_json::from_str(json).unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, "1.0.0");
}

// =============================================================================
// QUESTIONS RESPONSE TESTS
// =============================================================================

#[test]
fn test_questions_response_serialization() {
    let response = QuestionsResponse::from_content(Content::builtin());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["count"], 5);
    assert_eq!(json["questions"][1]["category"], "Data gathering");
    assert_eq!(json["questions"][1]["options"][0]["value"], 1);
}

// =============================================================================
// ASSESS REQUEST TESTS
// =============================================================================

#[test]
fn test_assess_request_deserialization() {
    let json = r#"{"answers":[{"question":0,"value":3},{"question":4,"value":5}]}"#;
    let request: AssessRequest = serde_json::from_str(json).unwrap();

    assert_eq!(
        request.answers,
        vec![
            AnswerJson {
                question: 0,
                value: 3
            },
            AnswerJson {
                question: 4,
                value: 5
            },
        ]
    );
}

#[test]
fn test_assess_request_missing_answers_defaults_empty() {
    let request: AssessRequest = serde_json::from_str("{}").unwrap();
    assert!(request.answers.is_empty());
}

#[test]
fn test_assess_request_negative_value_rejected_by_serde() {
    let json = r#"{"answers":[{"question":0,"value":-1}]}"#;
    assert!(serde_json::from_str::<AssessRequest>(json).is_err());
}

#[test]
fn test_assess_request_to_session() {
    let request = AssessRequest {
        answers: vec![AnswerJson {
            question: 1,
            value: 2,
        }],
    };
    let session = request.to_session(Content::builtin()).unwrap();

    assert_eq!(session.answered_count(), 1);
    assert_eq!(session.answer(1).map(|v| v.value()), Some(2));
}

#[test]
fn test_assess_request_to_session_rejects_zero() {
    let request = AssessRequest {
        answers: vec![AnswerJson {
            question: 0,
            value: 0,
        }],
    };
    assert!(matches!(
        request.to_session(Content::builtin()),
        Err(SxmError::InvalidAnswerValue(0))
    ));
}

// =============================================================================
// ASSESS RESPONSE TESTS
// =============================================================================

#[test]
fn test_assess_response_success_serialization() {
    let session = AssessRequest {
        answers: (0..5).map(|question| AnswerJson { question, value: 3 }).collect(),
    }
    .to_session(Content::builtin())
    .unwrap();
    let response = AssessResponse::success(session.result().unwrap());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["score"], "3.0");
    assert_eq!(json["complete"], true);
    assert_eq!(json["result"]["stage"], serde_json::to_value(Stage::S3).unwrap());
    assert_eq!(json["result"]["profile"]["label"], "Scaling & Systematic");
    assert_eq!(json["result"]["breakdown"][0]["category"], "Overall maturity");
    assert!(json["error"].is_null());
}

#[test]
fn test_assess_response_error() {
    let response = AssessResponse::error("bad");
    assert!(!response.success);
    assert!(response.score.is_none());
    assert!(response.result.is_none());
    assert_eq!(response.error.as_deref(), Some("bad"));
}

// =============================================================================
// SHARE TESTS
// =============================================================================

#[test]
fn test_share_request_rejects_oversized_url() {
    let request = ShareRequest {
        url: format!("https://example.com/{}", "a".repeat(MAX_SHARE_URL_LENGTH)),
    };
    assert!(matches!(
        request.to_links(Content::builtin()),
        Err(SxmError::InvalidInput(msg)) if msg.contains("exceeds maximum")
    ));
}

#[test]
fn test_share_request_rejects_blank_url_as_input_error() {
    let request = ShareRequest {
        url: "   ".to_string(),
    };
    let err = request.to_links(Content::builtin()).unwrap_err();
    assert!(matches!(err, SxmError::InvalidInput(ref msg) if msg.contains("must not be empty")));
    assert_eq!(err.to_string(), "Invalid input: Page URL must not be empty");
}

#[test]
fn test_share_response_error_has_no_links() {
    let json = serde_json::to_value(ShareResponse::error("nope")).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["linkedin"].is_null());
    assert!(json["twitter"].is_null());
}

// =============================================================================
// NOTIFY TESTS
// =============================================================================

#[test]
fn test_notify_request_rejects_oversized_email() {
    let request = NotifyRequest {
        email: "a".repeat(MAX_EMAIL_LENGTH + 1),
        answers: Vec::new(),
    };
    assert!(matches!(
        request.to_session(Content::builtin()),
        Err(SxmError::InvalidInput(msg)) if msg.starts_with("Email length")
    ));
}

#[test]
fn test_notify_response_success() {
    let response = NotifyResponse::success("a@b.c".to_string(), "ok".to_string());
    assert!(response.success);
    assert!(response.error.is_none());
}

// =============================================================================
// ERROR MAPPING TESTS
// =============================================================================

#[test]
fn test_status_for_caller_errors() {
    assert_eq!(
        status_for(&SxmError::InvalidAnswerValue(7)),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(&SxmError::QuestionOutOfRange { index: 9, count: 5 }),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(status_for(&SxmError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_for(&SxmError::InvalidInput("Page URL must not be empty".to_string())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_status_for_server_errors() {
    assert_eq!(
        status_for(&SxmError::MissingStageProfile(Stage::S2)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_for(&SxmError::InvalidContent("x".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
