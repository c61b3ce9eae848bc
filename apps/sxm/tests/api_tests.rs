//! Integration tests for the SXM HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
// Allow holding MutexGuard across await - tests are serialized intentionally
// to avoid env var conflicts
#![allow(clippy::unwrap_used, clippy::panic, clippy::await_holding_lock)]

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::json;
use std::sync::{Arc, Mutex};
use sxm::api::{
    AnswerJson, AppState, AssessRequest, AssessResponse, ErrorResponse, HealthResponse,
    NotifyRequest, NotifyResponse, QuestionsResponse, ShareRequest, ShareResponse, create_router,
};
use sxm_core::{AssessmentResult, Confirmation, Content, ResultNotifier, Stage, SxmError};

/// Mutex to serialize tests since the router reads env vars.
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Guard wrapper that holds the mutex and ensures cleanup on drop.
struct TestGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl Drop for TestGuard {
    fn drop(&mut self) {
        // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
        unsafe { std::env::remove_var("SXM_RATE_LIMIT") };
    }
}

fn lock_env() -> TestGuard {
    let guard = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::remove_var("SXM_RATE_LIMIT") };
    TestGuard { _guard: guard }
}

/// Create a test server over the built-in content.
/// Returns a guard that must be kept alive during the test.
fn create_test_server() -> (TestServer, TestGuard) {
    let guard = lock_env();
    let state = AppState::new(Content::builtin().clone());
    (TestServer::new(create_router(state)).unwrap(), guard)
}

fn answers(values: &[u8]) -> AssessRequest {
    AssessRequest {
        answers: values
            .iter()
            .enumerate()
            .map(|(question, &value)| AnswerJson { question, value })
            .collect(),
    }
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_via_tower_oneshot() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let _guard = lock_env();
    let router = create_router(AppState::new(Content::builtin().clone()));

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// QUESTIONS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_questions_lists_builtin_set() {
    let (server, _guard) = create_test_server();

    let response = server.get("/questions").await;

    response.assert_status_ok();
    let body: QuestionsResponse = response.json();
    assert_eq!(body.count, 5);
    assert_eq!(body.questions[0].category, "Overall maturity");
    assert_eq!(body.questions[4].category, "AI data readiness");
    assert!(body.questions.iter().all(|q| q.options.len() == 5));
}

// =============================================================================
// ASSESS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_assess_low_maturity() {
    let (server, _guard) = create_test_server();

    let response = server.post("/assess").json(&answers(&[1, 2, 1, 2, 1])).await;

    response.assert_status_ok();
    let body: AssessResponse = response.json();
    assert!(body.success);
    assert!(body.complete);
    assert_eq!(body.score.as_deref(), Some("1.4"));

    let result = body.result.unwrap();
    assert_eq!(result.stage, Stage::S1);
    assert_eq!(result.profile.label, "Fragmented & Reactive");
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(
        result.recommendations[0].category,
        "Analytics & insights infrastructure"
    );
}

#[tokio::test]
async fn test_assess_all_fives_falls_back() {
    let (server, _guard) = create_test_server();

    let response = server.post("/assess").json(&answers(&[5, 5, 5, 5, 5])).await;

    response.assert_status_ok();
    let result = response.json::<AssessResponse>().result.unwrap();
    assert_eq!(result.stage, Stage::S5);
    assert_eq!(
        result.recommendations[0].category,
        "Stage 5 → Continued Innovation"
    );
}

#[tokio::test]
async fn test_assess_partial_answers() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/assess")
        .json(&json!({ "answers": [{ "question": 2, "value": 4 }] }))
        .await;

    response.assert_status_ok();
    let body: AssessResponse = response.json();
    assert!(!body.complete);
    assert_eq!(body.score.as_deref(), Some("4.0"));

    let result = body.result.unwrap();
    assert_eq!(result.answered, 1);
    assert_eq!(result.breakdown.get("Learning and analysis"), Some(4));
    assert_eq!(result.breakdown.get("Data gathering"), Some(0));
}

#[tokio::test]
async fn test_assess_empty_body_scores_zero() {
    let (server, _guard) = create_test_server();

    let response = server.post("/assess").json(&json!({})).await;

    response.assert_status_ok();
    let body: AssessResponse = response.json();
    assert_eq!(body.score.as_deref(), Some("0.0"));
    assert_eq!(body.result.unwrap().stage, Stage::S1);
}

#[tokio::test]
async fn test_assess_repeated_question_overwrites() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/assess")
        .json(&json!({ "answers": [
            { "question": 0, "value": 1 },
            { "question": 0, "value": 5 }
        ] }))
        .await;

    response.assert_status_ok();
    let result = response.json::<AssessResponse>().result.unwrap();
    assert_eq!(result.answered, 1);
    assert_eq!(result.breakdown.get("Overall maturity"), Some(5));
}

#[tokio::test]
async fn test_assess_rejects_out_of_range_value() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/assess")
        .json(&json!({ "answers": [{ "question": 0, "value": 6 }] }))
        .await;

    response.assert_status_bad_request();
    let body: AssessResponse = response.json();
    assert!(!body.success);
    assert!(body.result.is_none());
    assert!(body.error.unwrap().contains("Invalid answer value: 6"));
}

#[tokio::test]
async fn test_assess_rejects_unknown_question() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/assess")
        .json(&json!({ "answers": [{ "question": 5, "value": 3 }] }))
        .await;

    response.assert_status_bad_request();
    let body: AssessResponse = response.json();
    assert!(body.error.unwrap().contains("out of range"));
}

// =============================================================================
// REPORT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_report_is_plain_text_attachment() {
    let (server, _guard) = create_test_server();

    let response = server.post("/report").json(&answers(&[3, 4, 2, 3, 4])).await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"sxm-maturity-assessment-results.txt\""
    );
    assert!(
        response
            .header(header::CONTENT_TYPE)
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let body = response.text();
    assert!(body.starts_with("SXM MATURITY ASSESSMENT RESULTS\n\n"));
    assert!(body.contains("Current Stage: Scaling & Systematic (Stage 3)\n"));
    assert!(body.contains("Overall Score: 3.2/5.0\n"));
    assert!(body.contains("Learning and analysis: 2/5\n"));
}

#[tokio::test]
async fn test_report_invalid_answers_is_json_error() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/report")
        .json(&json!({ "answers": [{ "question": 0, "value": 0 }] }))
        .await;

    response.assert_status_bad_request();
    let body: ErrorResponse = response.json();
    assert!(!body.success);
    assert!(body.error.starts_with("Report failed"));
}

// =============================================================================
// SHARE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_share_builds_encoded_links() {
    let (server, _guard) = create_test_server();

    let request = ShareRequest {
        url: "https://example.com/sxm?ref=a b".to_string(),
    };
    let response = server.post("/share").json(&request).await;

    response.assert_status_ok();
    let body: ShareResponse = response.json();
    assert!(body.success);

    let linkedin = body.linkedin.unwrap();
    assert!(linkedin.starts_with(
        "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fexample.com%2Fsxm%3Fref%3Da%20b&summary="
    ));
    let twitter = body.twitter.unwrap();
    assert!(twitter.starts_with("https://twitter.com/intent/tweet?text=I%20just%20completed"));
    assert!(twitter.ends_with("&url=https%3A%2F%2Fexample.com%2Fsxm%3Fref%3Da%20b"));
}

#[tokio::test]
async fn test_share_rejects_blank_url() {
    let (server, _guard) = create_test_server();

    let response = server.post("/share").json(&json!({ "url": "  " })).await;

    response.assert_status_bad_request();
    let body: ShareResponse = response.json();
    assert!(!body.success);
    assert!(body.linkedin.is_none());
}

// =============================================================================
// NOTIFY ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_notify_acknowledges() {
    let (server, _guard) = create_test_server();

    let request = NotifyRequest {
        email: " lead@example.com ".to_string(),
        answers: answers(&[2, 2, 2, 2, 2]).answers,
    };
    let response = server.post("/notify").json(&request).await;

    response.assert_status_ok();
    let body: NotifyResponse = response.json();
    assert!(body.success);
    assert_eq!(body.email.as_deref(), Some("lead@example.com"));
    assert_eq!(
        body.message.as_deref(),
        Some("Results will be sent to lead@example.com")
    );
}

#[tokio::test]
async fn test_notify_rejects_blank_email() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/notify")
        .json(&json!({ "email": "", "answers": [] }))
        .await;

    response.assert_status_bad_request();
    let body: NotifyResponse = response.json();
    assert!(!body.success);
    assert!(body.error.unwrap().contains("Email address must not be empty"));
}

/// Notifier that records every stage it was asked to send.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, Stage)>>,
}

impl ResultNotifier for RecordingNotifier {
    fn notify(&self, email: &str, result: &AssessmentResult) -> Result<Confirmation, SxmError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), result.stage));
        Ok(Confirmation {
            email: email.to_string(),
            message: "queued".to_string(),
        })
    }
}

#[tokio::test]
async fn test_notify_uses_configured_notifier() {
    let _guard = lock_env();
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::with_notifier(Content::builtin().clone(), notifier.clone());
    let server = TestServer::new(create_router(state)).unwrap();

    let request = NotifyRequest {
        email: "cto@example.com".to_string(),
        answers: answers(&[4, 4, 4, 4, 4]).answers,
    };
    let response = server.post("/notify").json(&request).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<NotifyResponse>().message.as_deref(),
        Some("queued")
    );
    assert_eq!(
        *notifier.sent.lock().unwrap(),
        vec![("cto@example.com".to_string(), Stage::S4)]
    );
}

// =============================================================================
// RATE LIMIT TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let guard = lock_env();
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::set_var("SXM_RATE_LIMIT", "1") };
    let server =
        TestServer::new(create_router(AppState::new(Content::builtin().clone()))).unwrap();
    let _guard = guard;

    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/unknown").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let (server, _guard) = create_test_server();

    // /assess is POST only
    let response = server.get("/assess").await;
    assert_eq!(response.status_code().as_u16(), 405);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/assess")
        .text("not valid json")
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
}
