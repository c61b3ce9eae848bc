//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use sxm_core::{AssessmentResult, AssessmentSession, Content, Question, ShareLinks, SxmError};

/// Maximum length of a page URL accepted by `/share`.
pub const MAX_SHARE_URL_LENGTH: usize = 2048;

/// Maximum length of an email address accepted by `/notify`.
pub const MAX_EMAIL_LENGTH: usize = 254;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// QUESTIONS RESPONSE
// =============================================================================

/// The question set, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub count: usize,
    pub questions: Vec<Question>,
}

impl QuestionsResponse {
    pub fn from_content(content: &Content) -> Self {
        Self {
            count: content.question_count(),
            questions: content.questions().to_vec(),
        }
    }
}

// =============================================================================
// ASSESS REQUEST/RESPONSE
// =============================================================================

/// One answer: the question index and the chosen option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerJson {
    pub question: usize,
    pub value: u8,
}

/// Body of `/assess` and `/report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub answers: Vec<AnswerJson>,
}

impl AssessRequest {
    /// Replay the answers into a fresh session, validating each one.
    ///
    /// A repeated question index overwrites the earlier answer.
    pub fn to_session<'c>(&self, content: &'c Content) -> Result<AssessmentSession<'c>, SxmError> {
        AssessmentSession::from_answers(content, self.answers.iter().map(|a| (a.question, a.value)))
    }
}

/// Scored assessment response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessResponse {
    pub success: bool,
    /// Average formatted to one decimal.
    pub score: Option<String>,
    pub complete: bool,
    pub result: Option<AssessmentResult>,
    pub error: Option<String>,
}

impl AssessResponse {
    pub fn success(result: AssessmentResult) -> Self {
        Self {
            success: true,
            score: Some(result.display_score()),
            complete: result.is_complete(),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            score: None,
            complete: false,
            result: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SHARE REQUEST/RESPONSE
// =============================================================================

/// Share link request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub url: String,
}

impl ShareRequest {
    /// Build the share links, validating the page URL.
    pub fn to_links(&self, content: &Content) -> Result<ShareLinks, SxmError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(SxmError::InvalidInput(
                "Page URL must not be empty".to_string(),
            ));
        }
        if url.len() > MAX_SHARE_URL_LENGTH {
            return Err(SxmError::InvalidInput(format!(
                "Page URL length {} exceeds maximum {} bytes",
                url.len(),
                MAX_SHARE_URL_LENGTH
            )));
        }
        Ok(ShareLinks::new(url, content.share_message()))
    }
}

/// Share link response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    pub success: bool,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub error: Option<String>,
}

impl ShareResponse {
    pub fn success(links: ShareLinks) -> Self {
        Self {
            success: true,
            linkedin: Some(links.linkedin),
            twitter: Some(links.twitter),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            linkedin: None,
            twitter: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// NOTIFY REQUEST/RESPONSE
// =============================================================================

/// Request to send a result to an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub email: String,
    #[serde(default)]
    pub answers: Vec<AnswerJson>,
}

impl NotifyRequest {
    /// Validate the address length and replay the answers.
    pub fn to_session<'c>(&self, content: &'c Content) -> Result<AssessmentSession<'c>, SxmError> {
        if self.email.len() > MAX_EMAIL_LENGTH {
            return Err(SxmError::InvalidInput(format!(
                "Email length {} exceeds maximum {} bytes",
                self.email.len(),
                MAX_EMAIL_LENGTH
            )));
        }
        AssessmentSession::from_answers(content, self.answers.iter().map(|a| (a.question, a.value)))
    }
}

/// Notification acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub email: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl NotifyResponse {
    pub fn success(email: String, message: String) -> Self {
        Self {
            success: true,
            email: Some(email),
            message: Some(message),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            email: None,
            message: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body for endpoints whose success response is not JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
