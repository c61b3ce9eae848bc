//! # API Endpoint Handlers
//!
//! Every handler is stateless: the request carries the answers, a throw-away
//! session scores them, and only the shared content bundle is read.

use super::{
    AppState,
    types::{
        AssessRequest, AssessResponse, ErrorResponse, HealthResponse, NotifyRequest,
        NotifyResponse, QuestionsResponse, ShareRequest, ShareResponse,
    },
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use sxm_core::SxmError;

/// Map an engine error to the HTTP status the client should see.
pub fn status_for(error: &SxmError) -> StatusCode {
    match error {
        SxmError::InvalidAnswerValue(_)
        | SxmError::QuestionOutOfRange { .. }
        | SxmError::InvalidEmail
        | SxmError::InvalidInput(_)
        | SxmError::SerializationError(_) => StatusCode::BAD_REQUEST,
        SxmError::MissingStageProfile(_) | SxmError::InvalidContent(_) | SxmError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// QUESTIONS HANDLER
// =============================================================================

/// List the question set.
pub async fn questions_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(QuestionsResponse::from_content(&state.content)),
    )
}

// =============================================================================
// ASSESS HANDLER
// =============================================================================

/// Score a set of answers.
pub async fn assess_handler(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> impl IntoResponse {
    let result = request
        .to_session(&state.content)
        .and_then(|session| session.result());

    match result {
        Ok(result) => {
            tracing::debug!(
                stage = result.stage.number(),
                answered = result.answered,
                "Assessment scored"
            );
            (StatusCode::OK, Json(AssessResponse::success(result)))
        }
        Err(e) => (
            status_for(&e),
            Json(AssessResponse::error(format!("Assessment failed: {}", e))),
        ),
    }
}

// =============================================================================
// REPORT HANDLER
// =============================================================================

/// Render the downloadable text report.
pub async fn report_handler(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> Response {
    let result = request
        .to_session(&state.content)
        .and_then(|session| session.result());

    match result {
        Ok(result) => {
            let report = result.report(&state.content);
            let disposition = format!("attachment; filename=\"{}\"", report.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                report.body,
            )
                .into_response()
        }
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse::new(format!("Report failed: {}", e))),
        )
            .into_response(),
    }
}

// =============================================================================
// SHARE HANDLER
// =============================================================================

/// Build the outbound share links for a page.
pub async fn share_handler(
    State(state): State<AppState>,
    Json(request): Json<ShareRequest>,
) -> impl IntoResponse {
    match request.to_links(&state.content) {
        Ok(links) => (StatusCode::OK, Json(ShareResponse::success(links))),
        Err(e) => (
            status_for(&e),
            Json(ShareResponse::error(format!("Invalid share request: {}", e))),
        ),
    }
}

// =============================================================================
// NOTIFY HANDLER
// =============================================================================

/// Hand a result to the configured notifier.
pub async fn notify_handler(
    State(state): State<AppState>,
    Json(request): Json<NotifyRequest>,
) -> impl IntoResponse {
    let confirmation = request
        .to_session(&state.content)
        .and_then(|session| session.result())
        .and_then(|result| state.notifier.notify(&request.email, &result));

    match confirmation {
        Ok(confirmation) => {
            tracing::info!(email = %confirmation.email, "Result notification requested");
            (
                StatusCode::OK,
                Json(NotifyResponse::success(
                    confirmation.email,
                    confirmation.message,
                )),
            )
        }
        Err(e) => (
            status_for(&e),
            Json(NotifyResponse::error(format!("Notification failed: {}", e))),
        ),
    }
}
